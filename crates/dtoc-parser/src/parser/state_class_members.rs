//! Parser state - class bodies, members and decorators.

use super::node::*;
use super::state::{CONTEXT_FLAG_IN_CLASS, ExpressionContext, ParserState};
use super::{NodeIndex, NodeList, syntax_kind_ext};
use dtoc_common::diagnostics::diagnostic_codes;
use dtoc_scanner::SyntaxKind;

impl ParserState {
    /// Parse `{ members }` of a class declaration.
    pub(crate) fn parse_class_members(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return NodeList::default();
        }

        let saved_flags = self.context_flags;
        self.context_flags |= CONTEXT_FLAG_IN_CLASS;

        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == start {
                self.parse_error_at_current_token(
                    "Unexpected token. A constructor, method, accessor, or property was expected.",
                    diagnostic_codes::EXPECTED,
                );
                self.next_token();
            }
        }

        self.context_flags = saved_flags;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::new(members)
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let jsdoc = self.current_jsdoc();
        let decorators = self.parse_decorators();
        let jsdoc = jsdoc.or_else(|| self.current_jsdoc());
        let flags = self.parse_member_modifiers();

        let node = match self.token() {
            SyntaxKind::StaticKeyword if self.peek_token() == SyntaxKind::OpenBraceToken => {
                self.next_token();
                self.skip_balanced();
                self.arena.add_token(
                    syntax_kind_ext::CLASS_STATIC_BLOCK,
                    pos,
                    self.prev_token_end,
                )
            }
            SyntaxKind::ConstructorKeyword
                if matches!(
                    self.peek_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                ) =>
            {
                self.next_token();
                self.parse_method_rest();
                self.arena
                    .add_token(syntax_kind_ext::CONSTRUCTOR, pos, self.prev_token_end)
            }
            SyntaxKind::GetKeyword | SyntaxKind::SetKeyword if self.next_is_property_name() => {
                let kind = if self.is_token(SyntaxKind::GetKeyword) {
                    syntax_kind_ext::GET_ACCESSOR
                } else {
                    syntax_kind_ext::SET_ACCESSOR
                };
                self.next_token();
                self.parse_property_name();
                self.parse_method_rest();
                self.arena.add_token(kind, pos, self.prev_token_end)
            }
            SyntaxKind::OpenBracketToken if self.is_index_signature() => {
                self.parse_index_signature(pos)
            }
            SyntaxKind::AsteriskToken => {
                // generator method
                self.next_token();
                self.parse_property_name();
                self.parse_method_rest();
                self.arena
                    .add_token(syntax_kind_ext::METHOD_DECLARATION, pos, self.prev_token_end)
            }
            _ => self.parse_property_or_method(pos, decorators),
        };

        self.arena.set_modifier_flags(node, flags);
        self.arena.set_jsdoc(node, jsdoc);
        node
    }

    fn parse_property_or_method(&mut self, pos: u32, decorators: Option<NodeList>) -> NodeIndex {
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let exclamation_token = self.parse_optional(SyntaxKind::ExclamationToken);

        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            self.parse_method_rest();
            return self
                .arena
                .add_token(syntax_kind_ext::METHOD_DECLARATION, pos, self.prev_token_end);
        }

        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.skip_expression(ExpressionContext::ClassMember)
        } else {
            NodeIndex::NONE
        };
        self.parse_optional(SyntaxKind::SemicolonToken);

        let end = self.prev_token_end;
        self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_DECLARATION,
            pos,
            end,
            PropertyDeclData {
                decorators,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// Type parameters, parameters, return type and body of a method,
    /// constructor or accessor. Only the span is kept.
    pub(crate) fn parse_method_rest(&mut self) {
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_angle_brackets();
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced();
        } else {
            self.parse_expected(SyntaxKind::OpenParenToken);
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_return_type();
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_balanced();
        } else {
            self.parse_optional(SyntaxKind::SemicolonToken);
        }
    }

    /// `[key: string]: T` as opposed to a computed name `[Symbol.iterator]`.
    pub(crate) fn is_index_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::DotDotDotToken) {
                return true;
            }
            if !p.token().is_identifier_like() {
                return false;
            }
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken
            )
        })
    }

    pub(crate) fn parse_index_signature(&mut self, pos: u32) -> NodeIndex {
        self.skip_balanced();
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type();
        }
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.arena
            .add_token(syntax_kind_ext::INDEX_SIGNATURE, pos, self.prev_token_end)
    }

    /// After `get`/`set`: does a property name follow (accessor), or is the
    /// keyword itself the member name?
    pub(crate) fn next_is_property_name(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_property_name_start()
        })
    }

    fn is_property_name_start(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::PrivateIdentifier
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// Modifiers in front of a class or type member. A modifier keyword
    /// followed by anything but a member name is the member name itself
    /// (`static: boolean`, `readonly?: string`).
    pub(crate) fn parse_member_modifiers(&mut self) -> ModifierFlags {
        let mut flags = ModifierFlags::empty();
        loop {
            let Some(flag) = ModifierFlags::from_keyword(self.token()) else {
                break;
            };
            if flag.intersects(ModifierFlags::EXPORT | ModifierFlags::DEFAULT | ModifierFlags::CONST)
            {
                break;
            }
            if self.is_token(SyntaxKind::StaticKeyword)
                && self.peek_token() == SyntaxKind::OpenBraceToken
            {
                break;
            }
            let can_follow = self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_property_name_start()
                        || matches!(
                            p.token(),
                            SyntaxKind::AsteriskToken | SyntaxKind::AtToken
                        ))
            });
            if !can_follow {
                break;
            }
            flags |= flag;
            self.next_token();
        }
        flags
    }

    // =========================================================================
    // Decorators
    // =========================================================================

    /// `@Name`, `@a.b.c`, `@Name(args)`, `@Name<T>(args)`, `@(expr)`.
    pub(crate) fn parse_decorators(&mut self) -> Option<NodeList> {
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let pos = self.token_pos();
            self.next_token();

            if self.is_token(SyntaxKind::OpenParenToken) {
                self.skip_balanced();
            } else {
                if self.is_identifier_or_keyword() {
                    self.next_token();
                } else {
                    self.parse_error_at_current_token(
                        "Identifier expected.",
                        diagnostic_codes::IDENTIFIER_EXPECTED,
                    );
                }
                while self.parse_optional(SyntaxKind::DotToken) {
                    if self.is_identifier_or_keyword() {
                        self.next_token();
                    }
                }
                if self.is_token(SyntaxKind::LessThanToken) {
                    self.skip_angle_brackets();
                }
                if self.is_token(SyntaxKind::OpenParenToken) {
                    self.skip_balanced();
                }
            }

            decorators.push(
                self.arena
                    .add_token(syntax_kind_ext::DECORATOR, pos, self.prev_token_end),
            );
        }
        (!decorators.is_empty()).then(|| NodeList::new(decorators))
    }
}
