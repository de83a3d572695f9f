//! Cosmetic printer for generated declarations.
//!
//! The generator produces text with correct structure but uneven layout:
//! declarations copied from source keep their original indentation and
//! quoting. `format_output` normalizes that text line by line:
//! - indentation follows bracket depth, type argument lists included, with
//!   one extra level for continuation lines (`| 'a'`, `& B`);
//! - string literals use the configured quote when no escaping is needed;
//! - single-line object types get (or lose) inner padding, `{ a }`;
//! - missing semicolons are added after type members and declarations;
//! - runs of blank lines collapse to one, and none are kept at the edges of
//!   a block.
//!
//! Comment bodies are re-indented as a block; indentation inside them is
//! kept relative to the line that opened the comment.

use serde::Deserialize;

/// Formatting options, as found under `format` in the config file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintOptions {
    pub tab_width: usize,
    pub semi: bool,
    pub single_quote: bool,
    pub bracket_spacing: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            tab_width: 2,
            semi: true,
            single_quote: true,
            bracket_spacing: true,
        }
    }
}

/// What an open bracket started; decides whether members get semicolons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockKind {
    Namespace,
    Enum,
    TypeBody,
    Paren,
    Bracket,
    /// `<...>` type arguments or parameters.
    Angle,
}

#[derive(Clone, Copy, Debug)]
enum BracketEvent {
    Open(BlockKind),
    Close,
    /// A `>` that is not part of `=>`. Only closes an open `Angle`.
    CloseAngle,
}

/// One rewritten line plus what the indenter needs to know about it.
struct LineScan {
    text: String,
    /// Byte length of `text` up to the last code character; zero for lines
    /// holding only comments.
    code_end: usize,
    events: Vec<BracketEvent>,
    /// Closing brackets before any other code on the line.
    leading_closers: usize,
    /// The line ends inside a `/* ... */` comment.
    opens_comment: bool,
}

impl LineScan {
    fn code(&self) -> &str {
        &self.text[..self.code_end]
    }
}

/// Format generated declarations according to `options`.
pub fn format_output(text: &str, options: &PrintOptions) -> String {
    let unit = " ".repeat(options.tab_width);
    let raw_lines: Vec<&str> = text.lines().collect();
    let lines: Vec<&str> = raw_lines.iter().map(|l| l.trim()).collect();
    let mut stack: Vec<BlockKind> = Vec::new();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_comment = false;
    let mut comment_base = 0;
    let mut dangling = false;

    for (index, &line) in lines.iter().enumerate() {
        if line.is_empty() {
            if out
                .last()
                .is_some_and(|last| !last.is_empty() && !last.ends_with('{'))
            {
                out.push(String::new());
            }
            continue;
        }

        if in_comment {
            if line.contains("*/") {
                in_comment = false;
            }
            let gutter = if line.starts_with('*') {
                " ".to_string()
            } else {
                " ".repeat(leading_width(raw_lines[index]).saturating_sub(comment_base))
            };
            out.push(format!("{}{gutter}{line}", unit.repeat(stack.len())));
            continue;
        }

        let mut scan = scan_line(line, options);
        in_comment = scan.opens_comment;
        if in_comment {
            comment_base = leading_width(raw_lines[index]);
        }
        if scan.leading_closers > 0 {
            // No blank line before a block's closing bracket.
            while out.last().is_some_and(String::is_empty) {
                out.pop();
            }
        }
        let depth = stack.len().saturating_sub(scan.leading_closers);
        let continued = dangling || starts_with_continuation(line);

        let mut closed = None;
        for event in &scan.events {
            match event {
                BracketEvent::Open(kind) => stack.push(*kind),
                BracketEvent::Close => closed = stack.pop(),
                BracketEvent::CloseAngle => {
                    if stack.last() == Some(&BlockKind::Angle) {
                        closed = stack.pop();
                    }
                }
            }
        }

        if scan.code_end > 0 {
            dangling = ends_dangling(scan.code());
            let next = lines[index + 1..].iter().find(|l| !l.is_empty()).copied();
            if options.semi && needs_semicolon(&scan, stack.last().copied(), closed, next) {
                scan.text.insert(scan.code_end, ';');
            }
        }

        let indent = unit.repeat(depth + usize::from(continued));
        out.push(format!("{indent}{}", scan.text));
    }

    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    let mut result = out.join("\n");
    result.push('\n');
    result
}

fn scan_line(line: &str, options: &PrintOptions) -> LineScan {
    let chars: Vec<char> = line.chars().collect();
    let mut text = String::with_capacity(line.len() + 4);
    let mut code_end = 0;
    let mut events = Vec::new();
    let mut leading_closers = 0;
    let mut seen_code = false;
    let mut opens_comment = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            '/' if next == Some('/') => {
                text.extend(&chars[i..]);
                break;
            }
            '/' if next == Some('*') => {
                let end = block_comment_end(&chars, i);
                text.extend(&chars[i..end]);
                if end == chars.len() && !text.ends_with("*/") {
                    opens_comment = true;
                }
                i = end;
                continue;
            }
            '"' | '\'' | '`' => {
                let end = string_end(&chars, i);
                let literal: String = chars[i..end].iter().collect();
                text.push_str(&requote(&literal, options));
                code_end = text.len();
                seen_code = true;
                i = end;
                continue;
            }
            '{' | '[' | '(' => {
                let kind = match c {
                    '{' => brace_kind(text.trim_end()),
                    '[' => BlockKind::Bracket,
                    _ => BlockKind::Paren,
                };
                events.push(BracketEvent::Open(kind));
                text.push(c);
                code_end = text.len();
                seen_code = true;
                if c == '{' {
                    if options.bracket_spacing {
                        if next.is_some_and(|n| !n.is_whitespace() && n != '}') {
                            text.push(' ');
                        }
                    } else {
                        while chars.get(i + 1) == Some(&' ') {
                            i += 1;
                        }
                    }
                }
            }
            '}' | ']' | ')' => {
                if !seen_code {
                    leading_closers += 1;
                }
                if c == '}' && !text.is_empty() {
                    if options.bracket_spacing {
                        if text.ends_with(|p: char| !p.is_whitespace() && p != '{') {
                            text.push(' ');
                        }
                    } else if text.ends_with(' ') && !text.trim_end().ends_with('{') {
                        text.truncate(text.trim_end().len());
                    }
                }
                events.push(BracketEvent::Close);
                text.push(c);
                code_end = text.len();
            }
            '<' if text.ends_with(is_name_char) && next != Some('<') => {
                events.push(BracketEvent::Open(BlockKind::Angle));
                text.push(c);
                code_end = text.len();
                seen_code = true;
            }
            '>' if !text.ends_with('=') => {
                if !seen_code {
                    leading_closers += 1;
                }
                events.push(BracketEvent::CloseAngle);
                text.push(c);
                code_end = text.len();
            }
            _ => {
                text.push(c);
                if !c.is_whitespace() {
                    seen_code = true;
                    code_end = text.len();
                }
            }
        }
        i += 1;
    }

    LineScan {
        text,
        code_end,
        events,
        leading_closers,
        opens_comment,
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn leading_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Index just past the `*/` closing the comment that starts at `start`, or
/// the end of the line.
fn block_comment_end(chars: &[char], start: usize) -> usize {
    let mut j = start + 2;
    while j + 1 < chars.len() {
        if chars[j] == '*' && chars[j + 1] == '/' {
            return j + 2;
        }
        j += 1;
    }
    chars.len()
}

/// Index just past the quote closing the literal that starts at `start`.
fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut j = start + 1;
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 2,
            c if c == quote => return j + 1,
            _ => j += 1,
        }
    }
    chars.len()
}

/// Switch the quotes of a string literal to the preferred style when the
/// content needs no escaping. Template literals are kept.
fn requote(literal: &str, options: &PrintOptions) -> String {
    let (preferred, other) = if options.single_quote {
        ('\'', '"')
    } else {
        ('"', '\'')
    };
    let mut chars = literal.chars();
    let first = chars.next();
    let last = chars.next_back();
    if first != Some(other) || last != Some(other) {
        return literal.to_string();
    }
    let content = &literal[1..literal.len() - 1];
    if content.contains(preferred) || content.contains('\\') {
        return literal.to_string();
    }
    format!("{preferred}{content}{preferred}")
}

/// What a `{` opens, judged by the code before it on the same line.
fn brace_kind(prefix: &str) -> BlockKind {
    let words: Vec<&str> = prefix.split_whitespace().collect();
    if words.len() >= 2 && words[words.len() - 2] == "enum" {
        return BlockKind::Enum;
    }
    let is_namespace = !prefix.contains('=')
        && words
            .iter()
            .any(|w| matches!(*w, "namespace" | "module" | "global"));
    if is_namespace {
        BlockKind::Namespace
    } else {
        BlockKind::TypeBody
    }
}

fn starts_with_continuation(line: &str) -> bool {
    line.starts_with('|')
        || line.starts_with('&')
        || line.starts_with('?')
        || line.starts_with(':')
        || line.starts_with("=>")
        || line.starts_with("extends ")
        || (line.starts_with('.') && !line.starts_with("..."))
}

/// The code ends with an operator that expects more on the next line.
fn ends_dangling(code: &str) -> bool {
    code.ends_with("=>")
        || code.ends_with(['=', '|', '&', ':', '?', '.'])
        || code.ends_with(" extends")
}

fn needs_semicolon(
    scan: &LineScan,
    context: Option<BlockKind>,
    closed: Option<BlockKind>,
    next_line: Option<&str>,
) -> bool {
    let code = scan.code();
    if ends_dangling(code)
        || code.ends_with([';', ',', '{', '[', '(', '<'])
        || code.starts_with('@')
    {
        return false;
    }
    if matches!(
        context,
        Some(BlockKind::Enum | BlockKind::Paren | BlockKind::Bracket | BlockKind::Angle)
    ) {
        return false;
    }
    if next_line.is_some_and(starts_with_continuation) {
        return false;
    }
    // Enum and namespace blocks are statements of their own.
    if code.ends_with('}') && matches!(closed, Some(BlockKind::Enum | BlockKind::Namespace)) {
        return false;
    }
    let only_closers = code.chars().all(|c| matches!(c, '}' | ']' | ')' | '>'));
    !only_closers || matches!(closed, Some(BlockKind::TypeBody | BlockKind::Angle))
}

#[cfg(test)]
#[path = "tests/printer_tests.rs"]
mod printer_tests;
