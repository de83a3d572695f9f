//! Comment ranges
//!
//! Comments are not part of the AST. The scanner records them as trivia in
//! front of the token that follows, and the parser attaches the last JSDoc
//! comment it sees to the declaration or member it precedes.

use serde::Serialize;

/// A range representing a comment in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// Create a new comment range.
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }

    /// `/** ... */`, but not a `/***` banner.
    pub fn is_jsdoc(&self, source: &str) -> bool {
        let text = self.get_text(source);
        self.is_multi_line && text.starts_with("/**") && !text.starts_with("/***") && text != "/**/"
    }
}

/// Find the end of a multi-line comment whose body starts at `from`.
///
/// Returns the offset just past the closing `*/`, or `None` when the comment
/// is unterminated.
pub fn find_multi_line_comment_end(bytes: &[u8], from: usize) -> Option<usize> {
    let rest = bytes.get(from..)?;
    memchr::memmem::find(rest, b"*/").map(|idx| from + idx + 2)
}

/// Find the end of a single-line comment starting at `from` (the line break is
/// not part of the comment).
pub fn find_single_line_comment_end(bytes: &[u8], from: usize) -> usize {
    let rest = bytes.get(from..).unwrap_or_default();
    match memchr::memchr2(b'\n', b'\r', rest) {
        Some(idx) => from + idx,
        None => bytes.len(),
    }
}

/// Format a multi-line comment for output.
///
/// Continuation lines are re-indented with `indent` followed by a single
/// space, so `*` gutters line up under the opening `/**`. Lines without a
/// gutter lose only the indentation they share, so nested text such as code
/// samples keeps its shape.
pub fn format_multi_line_comment(text: &str, indent: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= 1 {
        return text.to_string();
    }

    let common = lines[1..]
        .iter()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            (!trimmed.is_empty() && !trimmed.starts_with('*')).then(|| line.len() - trimmed.len())
        })
        .min()
        .unwrap_or(0);

    let mut result = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            result.push('\n');
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            result.push_str(indent);
            if trimmed.starts_with('*') {
                result.push(' ');
                result.push_str(trimmed);
            } else {
                result.push_str(line.get(common..).unwrap_or(trimmed).trim_end());
            }
        } else {
            result.push_str(line.trim_end());
        }
    }
    result
}

#[cfg(test)]
#[path = "tests/comments_tests.rs"]
mod comments_tests;
