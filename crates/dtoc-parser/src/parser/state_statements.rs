//! Parser state - source file, statement and declaration parsing.

use super::node::*;
use super::state::{ExpressionContext, ParserState};
use super::{NodeIndex, NodeList, syntax_kind_ext};
use dtoc_common::diagnostics::diagnostic_codes;
use dtoc_scanner::SyntaxKind;
use std::sync::Arc;
use tracing::trace;

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole file. The returned node is the `SOURCE_FILE` root.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }

        let text: Arc<str> = Arc::from(self.scanner.source_text());
        let end = text.len() as u32;
        trace!(
            file = %self.file_name,
            statements = statements.len(),
            nodes = self.arena.nodes.len(),
            "parsed source file"
        );
        self.arena.add_source_file(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end,
            SourceFileData {
                file_name: self.file_name.clone(),
                text,
                statements: NodeList::new(statements),
            },
        )
    }

    fn parse_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let jsdoc = self.current_jsdoc();

        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                return NodeIndex::NONE;
            }
            SyntaxKind::ImportKeyword => {
                let next = self.peek_token();
                if matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken) {
                    return self.skip_statement(pos);
                }
                return self.parse_import_declaration(pos);
            }
            _ => {}
        }

        let mut decorators = self.parse_decorators();
        let mut flags = ModifierFlags::empty();
        loop {
            match self.token() {
                SyntaxKind::ExportKeyword => {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::OpenBraceToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::EqualsToken
                            | SyntaxKind::AsKeyword
                    ) {
                        return self.skip_statement(pos);
                    }
                    flags |= ModifierFlags::EXPORT;
                }
                SyntaxKind::DefaultKeyword if flags.contains(ModifierFlags::EXPORT) => {
                    self.next_token();
                    flags |= ModifierFlags::DEFAULT;
                    if !matches!(
                        self.token(),
                        SyntaxKind::ClassKeyword
                            | SyntaxKind::AbstractKeyword
                            | SyntaxKind::InterfaceKeyword
                            | SyntaxKind::AtToken
                    ) {
                        return self.skip_statement(pos);
                    }
                }
                SyntaxKind::DeclareKeyword | SyntaxKind::AbstractKeyword
                    if self.next_token_is_keyword_on_same_line() =>
                {
                    if let Some(flag) = ModifierFlags::from_keyword(self.token()) {
                        flags |= flag;
                    }
                    self.next_token();
                }
                SyntaxKind::ConstKeyword if self.peek_token() == SyntaxKind::EnumKeyword => {
                    flags |= ModifierFlags::CONST;
                    self.next_token();
                }
                SyntaxKind::AtToken => {
                    // `export @dec class X`
                    if let Some(more) = self.parse_decorators() {
                        let mut list = decorators.take().unwrap_or_default();
                        list.nodes.extend(more.nodes);
                        decorators = Some(list);
                    }
                }
                _ => break,
            }
        }

        // Doc comment written after the decorators: `@dec()\n/** doc */\nclass X`
        let jsdoc = jsdoc.or_else(|| self.current_jsdoc());

        let node = match self.token() {
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, decorators),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos),
            SyntaxKind::InterfaceKeyword if self.next_token_is_identifier_on_same_line() => {
                self.parse_interface_declaration(pos)
            }
            SyntaxKind::TypeKeyword if self.next_token_is_identifier_on_same_line() => {
                self.parse_type_alias_declaration(pos)
            }
            SyntaxKind::NamespaceKeyword | SyntaxKind::ModuleKeyword
                if self.next_token_is_module_name() =>
            {
                self.parse_module_declaration(pos)
            }
            _ => return self.skip_statement(pos),
        };

        self.arena.set_modifier_flags(node, flags);
        self.arena.set_jsdoc(node, jsdoc);
        node
    }

    fn next_token_is_keyword_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier_or_keyword() && !p.has_preceding_line_break()
        })
    }

    fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.token().is_identifier_like() && !p.has_preceding_line_break()
        })
    }

    fn next_token_is_module_name(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            (p.token().is_identifier_like() || p.is_token(SyntaxKind::StringLiteral))
                && !p.has_preceding_line_break()
        })
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn parse_import_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::ImportKeyword);

        let mut data = ImportDeclData {
            is_type_only: false,
            default_binding: NodeIndex::NONE,
            namespace_binding: NodeIndex::NONE,
            named_bindings: None,
            module_specifier: NodeIndex::NONE,
        };

        // import './side-effect';
        if self.is_token(SyntaxKind::StringLiteral) {
            data.module_specifier = self.parse_literal();
            self.parse_import_attributes();
            self.parse_optional(SyntaxKind::SemicolonToken);
            return self.finish_import(pos, data);
        }

        if self.is_token(SyntaxKind::TypeKeyword) && self.is_type_only_import() {
            data.is_type_only = true;
            self.next_token();
        }

        if self.token().is_identifier_like() && !self.is_from_clause_start() {
            // import x = require('...') is not an ES import
            if self.peek_token() == SyntaxKind::EqualsToken {
                return self.skip_statement(pos);
            }
            data.default_binding = self.parse_identifier();
            if !self.parse_optional(SyntaxKind::CommaToken) {
                return self.parse_import_from(pos, data);
            }
        }

        match self.token() {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                self.parse_expected(SyntaxKind::AsKeyword);
                data.namespace_binding = self.parse_identifier();
            }
            SyntaxKind::OpenBraceToken => {
                data.named_bindings = Some(self.parse_import_specifiers());
            }
            _ => {}
        }

        self.parse_import_from(pos, data)
    }

    fn parse_import_from(&mut self, pos: u32, mut data: ImportDeclData) -> NodeIndex {
        self.parse_expected(SyntaxKind::FromKeyword);
        if self.is_token(SyntaxKind::StringLiteral) {
            data.module_specifier = self.parse_literal();
        } else {
            self.parse_error_at_current_token(
                "String literal expected.",
                diagnostic_codes::EXPECTED,
            );
        }
        self.parse_import_attributes();
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_import(pos, data)
    }

    fn finish_import(&mut self, pos: u32, data: ImportDeclData) -> NodeIndex {
        let end = self.prev_token_end;
        self.arena
            .add_import_decl(syntax_kind_ext::IMPORT_DECLARATION, pos, end, data)
    }

    /// `import type X from`, `import type { .. }`, `import type * as ns`.
    /// In `import type from 'x'`, `type` is the default binding.
    fn is_type_only_import(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            match p.token() {
                SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
                SyntaxKind::FromKeyword => {
                    p.next_token();
                    !p.is_token(SyntaxKind::StringLiteral)
                }
                kind => kind.is_identifier_like(),
            }
        })
    }

    /// `from 'x'` (as opposed to a default import named `from`).
    fn is_from_clause_start(&mut self) -> bool {
        self.is_token(SyntaxKind::FromKeyword)
            && self.peek_token() == SyntaxKind::StringLiteral
    }

    /// `with { type: 'json' }` / `assert { ... }` after the specifier.
    fn parse_import_attributes(&mut self) {
        let is_attributes_keyword = self.is_token(SyntaxKind::Identifier)
            && matches!(self.scanner.get_token_value_ref(), "with" | "assert")
            && !self.has_preceding_line_break();
        if is_attributes_keyword && self.peek_token() == SyntaxKind::OpenBraceToken {
            self.next_token();
            self.skip_balanced();
        }
    }

    fn parse_import_specifiers(&mut self) -> NodeList {
        let mut specifiers = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            specifiers.push(self.parse_import_specifier());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::new(specifiers)
    }

    fn parse_import_specifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut is_type_only = false;
        if self.is_token(SyntaxKind::TypeKeyword) {
            let next = self.peek_token();
            if next != SyntaxKind::AsKeyword
                && (next.is_identifier_or_keyword() || next == SyntaxKind::StringLiteral)
            {
                is_type_only = true;
                self.next_token();
            }
        }

        let first = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal()
        } else {
            self.parse_identifier_name()
        };

        let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
            (first, self.parse_identifier_name())
        } else {
            (NodeIndex::NONE, first)
        };

        let end = self.prev_token_end;
        self.arena.add_specifier(
            syntax_kind_ext::IMPORT_SPECIFIER,
            pos,
            end,
            SpecifierData {
                is_type_only,
                property_name,
                name,
            },
        )
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_class_declaration(&mut self, pos: u32, decorators: Option<NodeList>) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);

        let name = if self.token().is_identifier_like()
            && !self.is_token(SyntaxKind::ImplementsKeyword)
        {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };

        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_class_members();

        let end = self.prev_token_end;
        self.arena.add_class(
            syntax_kind_ext::CLASS_DECLARATION,
            pos,
            end,
            ClassData {
                decorators,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn parse_interface_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_type_members();

        let end = self.prev_token_end;
        self.arena.add_interface(
            syntax_kind_ext::INTERFACE_DECLARATION,
            pos,
            end,
            InterfaceData {
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    fn parse_type_alias_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_optional(SyntaxKind::SemicolonToken);

        let end = self.prev_token_end;
        self.arena.add_type_alias(
            syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            pos,
            end,
            TypeAliasData {
                name,
                type_parameters,
                type_node,
            },
        )
    }

    fn parse_enum_declaration(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();

        let mut members = Vec::new();
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let start = self.token_pos();
                members.push(self.parse_enum_member());
                if self.parse_optional(SyntaxKind::CommaToken) {
                    continue;
                }
                if self.is_token(SyntaxKind::CloseBraceToken) {
                    break;
                }
                self.parse_error_at_current_token("',' expected.", diagnostic_codes::EXPECTED);
                if self.token_pos() == start {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        let end = self.prev_token_end;
        self.arena.add_enum(
            syntax_kind_ext::ENUM_DECLARATION,
            pos,
            end,
            EnumData {
                name,
                members: NodeList::new(members),
            },
        )
    }

    fn parse_enum_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let jsdoc = self.current_jsdoc();
        let name = self.parse_property_name();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.skip_expression(ExpressionContext::EnumMember)
        } else {
            NodeIndex::NONE
        };

        let end = self.prev_token_end;
        let node = self.arena.add_enum_member(
            syntax_kind_ext::ENUM_MEMBER,
            pos,
            end,
            EnumMemberData { name, initializer },
        );
        self.arena.set_jsdoc(node, jsdoc);
        node
    }

    /// `namespace A.B { }`, `module 'x' { }`; the body is skipped.
    fn parse_module_declaration(&mut self, pos: u32) -> NodeIndex {
        self.next_token();
        let name = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal()
        } else {
            self.parse_identifier()
        };
        while self.parse_optional(SyntaxKind::DotToken) {
            self.parse_identifier_name();
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_balanced();
        } else {
            self.parse_optional(SyntaxKind::SemicolonToken);
        }

        let end = self.prev_token_end;
        self.arena
            .add_module(syntax_kind_ext::MODULE_DECLARATION, pos, end, ModuleData { name })
    }

    // =========================================================================
    // Heritage clauses
    // =========================================================================

    pub(crate) fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ) {
            let pos = self.token_pos();
            let token = self.token();
            self.next_token();

            let mut types = Vec::new();
            loop {
                types.push(self.parse_heritage_expression());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }

            let end = self.prev_token_end;
            clauses.push(self.arena.add_heritage(
                syntax_kind_ext::HERITAGE_CLAUSE,
                pos,
                end,
                HeritageData {
                    token,
                    types: NodeList::new(types),
                },
            ));
        }
        (!clauses.is_empty()).then(|| NodeList::new(clauses))
    }

    /// One heritage element: an identifier, property access chain, call
    /// (`PartialType(Base)`) or type-argument form (`Base<T>`).
    fn parse_heritage_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.is_identifier_or_keyword() {
            self.parse_error_at_current_token(
                "Expression expected.",
                diagnostic_codes::EXPECTED,
            );
            return self.skip_heritage_expression(pos);
        }

        let mut expression = self.parse_identifier_name();
        let mut pending_type_arguments: Option<NodeList> = None;
        loop {
            match self.token() {
                SyntaxKind::DotToken if pending_type_arguments.is_none() => {
                    self.next_token();
                    let right = self.parse_identifier_name();
                    let end = self.prev_token_end;
                    expression = self.arena.add_qualified_name(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        pos,
                        end,
                        QualifiedNameData {
                            left: expression,
                            right,
                        },
                    );
                }
                SyntaxKind::LessThanToken if pending_type_arguments.is_none() => {
                    pending_type_arguments = Some(self.parse_type_arguments());
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_arguments();
                    let end = self.prev_token_end;
                    expression = self.arena.add_call_expr(
                        syntax_kind_ext::CALL_EXPRESSION,
                        pos,
                        end,
                        CallExprData {
                            expression,
                            type_arguments: pending_type_arguments.take(),
                            arguments,
                        },
                    );
                }
                _ => break,
            }
        }

        if let Some(type_arguments) = pending_type_arguments {
            let end = self.prev_token_end;
            expression = self.arena.add_expr_with_type_args(
                syntax_kind_ext::EXPRESSION_WITH_TYPE_ARGUMENTS,
                pos,
                end,
                ExprWithTypeArgsData {
                    expression,
                    type_arguments,
                },
            );
        }
        expression
    }

    fn skip_heritage_expression(&mut self, pos: u32) -> NodeIndex {
        while !matches!(
            self.token(),
            SyntaxKind::OpenBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::ImplementsKeyword
                | SyntaxKind::EndOfFileToken
        ) {
            match self.token() {
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => self.skip_balanced(),
                _ => {
                    self.next_token();
                }
            }
        }
        let end = self.prev_token_end.max(pos);
        self.arena
            .add_token(syntax_kind_ext::SKIPPED_EXPRESSION, pos, end)
    }

    /// `(a, b.c, other)`: names and dotted names are kept, anything else is
    /// skipped as an opaque expression.
    fn parse_arguments(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let argument = if self.is_simple_entity_argument() {
                self.parse_entity_expression()
            } else {
                self.skip_expression(ExpressionContext::Argument)
            };
            if argument.is_some() {
                arguments.push(argument);
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::new(arguments)
    }

    fn is_simple_entity_argument(&mut self) -> bool {
        if !self.is_identifier_or_keyword() {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            while p.is_token(SyntaxKind::DotToken) {
                p.next_token();
                if !p.is_identifier_or_keyword() {
                    return false;
                }
                p.next_token();
            }
            matches!(
                p.token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
            )
        })
    }

    /// `a` or `a.b.c` as an expression.
    fn parse_entity_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expression = self.parse_identifier_name();
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            let end = self.prev_token_end;
            expression = self.arena.add_qualified_name(
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                pos,
                end,
                QualifiedNameData {
                    left: expression,
                    right,
                },
            );
        }
        expression
    }
}
