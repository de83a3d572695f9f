//! Parser state - core token handling, diagnostics and skipping helpers.
//!
//! The parser is error tolerant: every parse routine consumes at least one
//! token or returns without consuming at a well-defined terminator, so a
//! malformed file yields diagnostics and a partial tree, never a hang.

use super::node::NodeArena;
use super::{NodeIndex, syntax_kind_ext};
use dtoc_common::diagnostics::{diagnostic_codes, format_message};
use dtoc_common::{CommentRange, Diagnostic};
use dtoc_scanner::{ScannerState, SyntaxKind};

/// Conditional types are not allowed directly in the `extends` position
/// of another conditional type (`A extends B ? ...`).
pub const CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES: u32 = 1 << 0;
/// Parsing inside a class body.
pub const CONTEXT_FLAG_IN_CLASS: u32 = 1 << 1;

/// Where a skipped expression stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExpressionContext {
    /// Class property initializer: `;`, `}`, or a new member on the next line
    ClassMember,
    /// Enum member initializer: `,` or `}`
    EnumMember,
    /// Call argument: `,` or `)`
    Argument,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End of the most recently consumed token
    pub(crate) prev_token_end: u32,
    pub(crate) prev_token: SyntaxKind,
    pub(crate) context_flags: u32,
    parse_diagnostics: Vec<Diagnostic>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let mut scanner = ScannerState::new(source_text);
        let current_token = scanner.scan();
        let mut state = ParserState {
            scanner,
            arena: NodeArena::new(),
            file_name,
            current_token,
            prev_token_end: 0,
            prev_token: SyntaxKind::Unknown,
            context_flags: 0,
            parse_diagnostics: Vec::new(),
        };
        state.flush_scanner_errors();
        state
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Parse and scanner diagnostics collected so far.
    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    /// Consume the parser, returning the arena and all diagnostics.
    pub fn into_parts(self) -> (NodeArena, Vec<Diagnostic>) {
        (self.arena, self.parse_diagnostics)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.current_token.is_identifier_or_keyword()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end();
        self.prev_token = self.current_token;
        self.current_token = self.scanner.scan();
        self.flush_scanner_errors();
        self.current_token
    }

    fn flush_scanner_errors(&mut self) {
        for error in self.scanner.take_errors() {
            self.parse_diagnostics.push(Diagnostic::error(
                self.file_name.clone(),
                error.pos,
                error.length,
                error.message,
                error.code,
            ));
        }
    }

    /// Run `f` speculatively and rewind afterwards, returning its result.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let prev = self.prev_token;
        let diagnostics_len = self.parse_diagnostics.len();
        let nodes_len = self.arena.nodes.len();

        let result = f(self);

        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        self.prev_token = prev;
        self.parse_diagnostics.truncate(diagnostics_len);
        debug_assert_eq!(nodes_len, self.arena.nodes.len(), "look_ahead must not allocate");
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|p| p.next_token())
    }

    /// Last JSDoc comment in the current token's leading trivia.
    pub(crate) fn current_jsdoc(&self) -> Option<CommentRange> {
        let source = self.scanner.source_text();
        self.scanner
            .leading_comments()
            .iter()
            .rev()
            .find(|c| c.is_jsdoc(source))
            .copied()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        // One error per position keeps cascades down.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics.push(Diagnostic::error(
            self.file_name.clone(),
            start,
            length,
            message,
            code,
        ));
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            return true;
        }
        let message = format_message("'{0}' expected.", &[token_to_string(kind)]);
        self.parse_error_at_current_token(&message, diagnostic_codes::EXPECTED);
        false
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Parse an identifier; contextual keywords are accepted, reserved words
    /// are not.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.current_token.is_identifier_like() {
            return self.parse_identifier_name();
        }
        self.parse_error_at_current_token("Identifier expected.", diagnostic_codes::IDENTIFIER_EXPECTED);
        let pos = self.token_pos();
        self.arena
            .add_identifier(SyntaxKind::Identifier, pos, pos, "")
    }

    /// Parse any identifier or keyword as a name.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            return self.parse_identifier();
        }
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.scanner.get_token_value_ref().to_string();
        self.next_token();
        self.arena
            .add_identifier(SyntaxKind::Identifier, pos, end, &text)
    }

    /// Parse a literal token (string, number, template) into a literal node.
    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token();
        let pos = self.token_pos();
        let end = self.token_end();
        let text = self.scanner.get_token_value_ref().to_string();
        self.next_token();
        self.arena.add_literal(kind, pos, end, &text)
    }

    /// Property name in a class body or type literal: identifier, keyword,
    /// string, number, `#private` or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                self.parse_literal()
            }
            SyntaxKind::PrivateIdentifier => {
                let pos = self.token_pos();
                let end = self.token_end();
                let text = self.scanner.get_token_value_ref().to_string();
                self.next_token();
                self.arena
                    .add_identifier(SyntaxKind::PrivateIdentifier, pos, end, &text)
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.skip_balanced();
                self.arena.add_token(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    pos,
                    self.prev_token_end,
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    /// Skip from an opening `{`, `(` or `[` past its matching closer.
    pub(crate) fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                SyntaxKind::EndOfFileToken => {
                    self.parse_error_at_current_token("'}' expected.", diagnostic_codes::EXPECTED);
                    return;
                }
                _ => {}
            }
            self.next_token();
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip from an opening `<` past its matching `>`.
    pub(crate) fn skip_angle_brackets(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::GreaterThanToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => {
                    self.skip_balanced();
                    continue;
                }
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken => {
                    self.parse_error_at_current_token("'>' expected.", diagnostic_codes::EXPECTED);
                    return;
                }
                _ => {}
            }
            self.next_token();
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip an expression, returning a node covering it.
    ///
    /// A lone literal becomes a literal node so callers can read its value;
    /// anything longer becomes a `SKIPPED_EXPRESSION` span.
    pub(crate) fn skip_expression(&mut self, context: ExpressionContext) -> NodeIndex {
        let pos = self.token_pos();
        let first = self.token();
        let first_text = self.scanner.get_token_value_ref().to_string();
        let first_end = self.token_end();
        let mut token_count = 0usize;

        loop {
            let at_terminator = match self.token() {
                SyntaxKind::EndOfFileToken => true,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => true,
                SyntaxKind::SemicolonToken => true,
                SyntaxKind::CommaToken => context != ExpressionContext::ClassMember,
                _ => {
                    context == ExpressionContext::ClassMember
                        && token_count > 0
                        && self.has_preceding_line_break()
                        && self.is_class_member_start_after_line_break()
                }
            };
            if at_terminator {
                break;
            }
            match self.token() {
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => self.skip_balanced(),
                _ => {
                    self.next_token();
                }
            }
            token_count += 1;
        }

        if token_count == 1
            && matches!(
                first,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::NoSubstitutionTemplateLiteral
            )
        {
            return self.arena.add_literal(first, pos, first_end, &first_text);
        }
        if token_count == 1
            && matches!(first, SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword)
        {
            return self.arena.add_token(first as u16, pos, first_end);
        }
        if token_count == 0 {
            self.parse_error_at_current_token("Expression expected.", diagnostic_codes::EXPECTED);
            return NodeIndex::NONE;
        }
        self.arena
            .add_token(syntax_kind_ext::SKIPPED_EXPRESSION, pos, self.prev_token_end)
    }

    /// After a line break, does the current token start a new class member
    /// (so the previous initializer ended by ASI)?
    fn is_class_member_start_after_line_break(&self) -> bool {
        if self.prev_token.is_binary_operator_like() {
            return false;
        }
        matches!(
            self.token(),
            SyntaxKind::AtToken
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
        ) || self.current_token.is_identifier_or_keyword()
    }

    /// Is the current token a plausible start of a top-level statement?
    pub(crate) fn is_statement_start_keyword(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::ImportKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::AtToken
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ModuleKeyword
                | SyntaxKind::AsyncKeyword
        )
    }

    /// Skip one statement the generator has no use for.
    pub(crate) fn skip_statement(&mut self, pos: u32) -> NodeIndex {
        let mut consumed = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    break;
                }
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    // Stray closer at statement level.
                    if consumed == 0 {
                        self.parse_error_at_current_token(
                            "Declaration or statement expected.",
                            diagnostic_codes::EXPECTED,
                        );
                    }
                    self.next_token();
                    break;
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => self.skip_balanced(),
                _ => {
                    if consumed > 0
                        && self.has_preceding_line_break()
                        && !self.prev_token.is_binary_operator_like()
                        && self.is_statement_start_keyword()
                    {
                        break;
                    }
                    self.next_token();
                }
            }
            consumed += 1;
        }
        self.arena
            .add_token(syntax_kind_ext::SKIPPED_STATEMENT, pos, self.prev_token_end)
    }
}

/// Text of a punctuation token, for "'x' expected." messages.
pub(crate) fn token_to_string(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::EqualsGreaterThanToken => "=>",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::QuestionToken => "?",
        SyntaxKind::DotToken => ".",
        SyntaxKind::FromKeyword => "from",
        SyntaxKind::StringLiteral => "string literal",
        SyntaxKind::Identifier => "identifier",
        _ => "token",
    }
}
