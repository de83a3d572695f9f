//! Scanner state machine.
//!
//! `ScannerState` produces one token per `scan()` call. Whitespace and
//! comments are trivia: line breaks set `has_preceding_line_break`, and
//! comments are collected as `CommentRange`s belonging to the next token.

use crate::char_codes::{
    is_digit, is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use dtoc_common::CommentRange;
use dtoc_common::comments::{find_multi_line_comment_end, find_single_line_comment_end};
use dtoc_common::diagnostics::diagnostic_codes;

/// An error found while scanning. The parser turns these into diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub pos: u32,
    pub length: u32,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner state for speculative lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    leading_comments: Vec<CommentRange>,
    error_count: usize,
}

pub struct ScannerState {
    text: String,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    leading_comments: Vec<CommentRange>,
    errors: Vec<ScanError>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        let mut scanner = ScannerState {
            text,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            preceding_line_break: false,
            leading_comments: Vec::new(),
            errors: Vec::new(),
        };
        scanner.skip_shebang();
        scanner
    }

    fn skip_shebang(&mut self) {
        if self.text.starts_with("#!") {
            self.pos = find_single_line_comment_end(self.text.as_bytes(), 0);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    #[inline]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Identifier text, unquoted string contents, or literal source text.
    #[inline]
    pub fn get_token_value_ref(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    /// Comments between the previous token and the current one.
    pub fn leading_comments(&self) -> &[CommentRange] {
        &self.leading_comments
    }

    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            leading_comments: self.leading_comments.clone(),
            error_count: self.errors.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.leading_comments = snapshot.leading_comments;
        self.errors.truncate(snapshot.error_count);
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(offset..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(offset).copied()
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.errors.push(ScanError {
            pos: pos as u32,
            length: length as u32,
            message,
            code,
        });
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.leading_comments.clear();
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.peek_char() else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if is_line_break(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            if ch == '/' {
                match self.byte_at(self.pos + 1) {
                    Some(b'/') => {
                        self.scan_single_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        self.scan_multi_line_comment();
                        continue;
                    }
                    _ => {}
                }
            }

            self.token = self.scan_token(ch);
            return self.token;
        }
    }

    fn scan_single_line_comment(&mut self) {
        let start = self.pos;
        let end = find_single_line_comment_end(self.text.as_bytes(), start + 2);
        let has_trailing_new_line = end < self.text.len();
        self.leading_comments.push(CommentRange::new(
            start as u32,
            end as u32,
            false,
            has_trailing_new_line,
        ));
        self.pos = end;
    }

    fn scan_multi_line_comment(&mut self) {
        let start = self.pos;
        let end = match find_multi_line_comment_end(self.text.as_bytes(), start + 2) {
            Some(end) => end,
            None => {
                self.error(
                    start,
                    2,
                    "'*/' expected.",
                    diagnostic_codes::UNTERMINATED_COMMENT,
                );
                self.text.len()
            }
        };
        if self.text[start..end].contains(['\n', '\r']) {
            self.preceding_line_break = true;
        }
        let has_trailing_new_line = self
            .char_at(end)
            .is_some_and(is_line_break);
        self.leading_comments.push(CommentRange::new(
            start as u32,
            end as u32,
            true,
            has_trailing_new_line,
        ));
        self.pos = end;
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template(),
            '0'..='9' => self.scan_number(),
            '.' => {
                if next.is_some_and(|b| b.is_ascii_digit()) {
                    self.scan_number()
                } else if next == Some(b'.') && self.byte_at(self.pos + 2) == Some(b'.') {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            '?' => {
                let after = self.byte_at(self.pos + 2);
                if next == Some(b'.') && !after.is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 2;
                    SyntaxKind::QuestionDotToken
                } else {
                    self.single(SyntaxKind::QuestionToken)
                }
            }
            '=' => {
                if next == Some(b'>') {
                    self.pos += 2;
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    self.single(SyntaxKind::EqualsToken)
                }
            }
            '#' => {
                if self.char_at(self.pos + 1).is_some_and(is_identifier_start) {
                    self.pos += 1;
                    self.scan_identifier_rest();
                    self.token_value = self.text[self.token_start..self.pos].to_string();
                    SyntaxKind::PrivateIdentifier
                } else {
                    self.invalid_character(ch)
                }
            }
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            '<' => self.single(SyntaxKind::LessThanToken),
            '>' => self.single(SyntaxKind::GreaterThanToken),
            '+' => self.single(SyntaxKind::PlusToken),
            '-' => self.single(SyntaxKind::MinusToken),
            '*' => self.single(SyntaxKind::AsteriskToken),
            '/' => self.single(SyntaxKind::SlashToken),
            '%' => self.single(SyntaxKind::PercentToken),
            '&' => self.single(SyntaxKind::AmpersandToken),
            '|' => self.single(SyntaxKind::BarToken),
            '^' => self.single(SyntaxKind::CaretToken),
            '!' => self.single(SyntaxKind::ExclamationToken),
            '~' => self.single(SyntaxKind::TildeToken),
            ':' => self.single(SyntaxKind::ColonToken),
            '@' => self.single(SyntaxKind::AtToken),
            _ if is_identifier_start(ch) => {
                self.scan_identifier_rest();
                let text = &self.text[self.token_start..self.pos];
                self.token_value = text.to_string();
                text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.invalid_character(ch),
        }
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn invalid_character(&mut self, ch: char) -> SyntaxKind {
        let len = ch.len_utf8();
        self.error(
            self.pos,
            len,
            "Invalid character.",
            diagnostic_codes::INVALID_CHARACTER,
        );
        self.pos += len;
        SyntaxKind::Unknown
    }

    fn scan_identifier_rest(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                self.error(
                    start,
                    self.pos - start,
                    "Unterminated string literal.",
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.error(
                    start,
                    self.pos - start,
                    "Unterminated string literal.",
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                );
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                if let Some(escaped) = self.peek_char() {
                    self.pos += escaped.len_utf8();
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '\r' | '\n' => {}
                        other => value.push(other),
                    }
                }
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Scan a whole template literal, substitutions included, as one token.
    fn scan_template(&mut self) -> SyntaxKind {
        let start = self.pos;
        let has_substitution = self.skip_template_body();
        if has_substitution.is_none() {
            self.error(
                start,
                self.pos - start,
                "Unterminated template literal.",
                diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
            );
        }
        self.token_value = self.text[start..self.pos].to_string();
        if has_substitution == Some(true) {
            SyntaxKind::TemplateLiteral
        } else {
            SyntaxKind::NoSubstitutionTemplateLiteral
        }
    }

    /// Skip from an opening backtick past its closing backtick.
    ///
    /// Returns `Some(has_substitution)`, or `None` when unterminated.
    fn skip_template_body(&mut self) -> Option<bool> {
        self.pos += 1;
        let mut has_substitution = false;
        loop {
            let ch = self.peek_char()?;
            match ch {
                '`' => {
                    self.pos += 1;
                    return Some(has_substitution);
                }
                '\\' => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek_char() {
                        self.pos += escaped.len_utf8();
                    }
                }
                '$' if self.byte_at(self.pos + 1) == Some(b'{') => {
                    has_substitution = true;
                    self.pos += 2;
                    self.skip_template_substitution()?;
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
    }

    /// Skip a `${ ... }` body, including nested strings and templates.
    fn skip_template_substitution(&mut self) -> Option<()> {
        let mut depth = 1usize;
        loop {
            let ch = self.peek_char()?;
            match ch {
                '{' => {
                    depth += 1;
                    self.pos += 1;
                }
                '}' => {
                    self.pos += 1;
                    depth -= 1;
                    if depth == 0 {
                        return Some(());
                    }
                }
                '`' => {
                    self.skip_template_body()?;
                }
                '"' | '\'' => {
                    self.pos += 1;
                    while let Some(inner) = self.peek_char() {
                        self.pos += inner.len_utf8();
                        if inner == '\\' {
                            if let Some(escaped) = self.peek_char() {
                                self.pos += escaped.len_utf8();
                            }
                        } else if inner == ch || is_line_break(inner) {
                            break;
                        }
                    }
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        let mut pos = self.pos;
        let radix_prefix = bytes[pos] == b'0'
            && matches!(
                bytes.get(pos + 1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            );
        if radix_prefix {
            pos += 2;
            while pos < bytes.len() && (bytes[pos].is_ascii_hexdigit() || bytes[pos] == b'_') {
                pos += 1;
            }
        } else {
            while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'_') {
                pos += 1;
            }
            if bytes.get(pos) == Some(&b'.') {
                pos += 1;
                while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'_') {
                    pos += 1;
                }
            }
            if matches!(bytes.get(pos), Some(b'e' | b'E')) {
                let mut exp = pos + 1;
                if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                    exp += 1;
                }
                if bytes.get(exp).is_some_and(|b| b.is_ascii_digit()) {
                    pos = exp;
                    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
            }
        }

        let kind = if bytes.get(pos) == Some(&b'n') {
            pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.pos = pos;
        self.token_value = self.text[start..pos].to_string();
        debug_assert!(self.char_at(start).is_some_and(|c| is_digit(c) || c == '.'));
        kind
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
