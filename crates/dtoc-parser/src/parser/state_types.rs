//! Parser state - type expressions, type members and type parameters.

use super::node::*;
use super::state::{CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, ParserState};
use super::{NodeIndex, NodeList, syntax_kind_ext};
use dtoc_common::diagnostics::diagnostic_codes;
use dtoc_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Types
    // =========================================================================

    /// Parse a type: function/constructor types, conditional types and
    /// everything below them.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if self.is_start_of_function_type() {
            return self.parse_function_type(syntax_kind_ext::FUNCTION_TYPE);
        }
        if self.is_start_of_constructor_type() {
            return self.parse_function_type(syntax_kind_ext::CONSTRUCTOR_TYPE);
        }

        let pos = self.token_pos();
        let check_type = self.parse_union_type();
        let conditional_allowed = self.context_flags & CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES == 0;
        if !conditional_allowed
            || self.has_preceding_line_break()
            || !self.is_token(SyntaxKind::ExtendsKeyword)
        {
            return check_type;
        }

        self.next_token();
        let saved_flags = self.context_flags;
        self.context_flags |= CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES;
        let extends_type = self.parse_type();
        self.context_flags = saved_flags;

        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.parse_type_allowing_conditional();
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.parse_type_allowing_conditional();

        let end = self.prev_token_end;
        self.arena.add_conditional_type(
            syntax_kind_ext::CONDITIONAL_TYPE,
            pos,
            end,
            ConditionalTypeData {
                check_type,
                extends_type,
                true_type,
                false_type,
            },
        )
    }

    /// Parse a type in a nested position where conditional types are
    /// allowed again (parentheses, type arguments, members).
    pub(crate) fn parse_type_allowing_conditional(&mut self) -> NodeIndex {
        let saved_flags = self.context_flags;
        self.context_flags &= !CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES;
        let result = self.parse_type();
        self.context_flags = saved_flags;
        result
    }

    /// Return type after `:` in a method or signature, including type
    /// predicates (`x is T`, `asserts x is T`, `asserts x`).
    pub(crate) fn parse_return_type(&mut self) -> NodeIndex {
        let is_asserts = self.is_token(SyntaxKind::Identifier)
            && self.scanner.get_token_value_ref() == "asserts"
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.token().is_identifier_like() || p.is_token(SyntaxKind::ThisKeyword))
            });
        if is_asserts {
            self.next_token();
            if self.peek_token() != SyntaxKind::IsKeyword {
                // `asserts x`
                self.next_token();
                return NodeIndex::NONE;
            }
        }

        let is_predicate = (self.token().is_identifier_like()
            || self.is_token(SyntaxKind::ThisKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::IsKeyword) && !p.has_preceding_line_break()
            });
        if is_predicate {
            self.next_token();
            self.next_token();
        }
        self.parse_type_allowing_conditional()
    }

    fn is_start_of_function_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken => true,
            SyntaxKind::OpenParenToken => self.look_ahead(|p| {
                p.skip_balanced();
                p.is_token(SyntaxKind::EqualsGreaterThanToken)
            }),
            _ => false,
        }
    }

    fn is_start_of_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => self.peek_token() == SyntaxKind::NewKeyword,
            _ => false,
        }
    }

    /// `<T>(a: T) => R`, `new (...) => R`, `abstract new () => R`.
    fn parse_function_type(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_optional(SyntaxKind::AbstractKeyword);
        self.parse_optional(SyntaxKind::NewKeyword);
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_angle_brackets();
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced();
        } else {
            self.parse_expected(SyntaxKind::OpenParenToken);
        }
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_return_type();

        let end = self.prev_token_end;
        self.arena
            .add_function_type(kind, pos, end, FunctionTypeData { return_type })
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        self.parse_composite_type(
            SyntaxKind::BarToken,
            syntax_kind_ext::UNION_TYPE,
            Self::parse_intersection_type,
        )
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        self.parse_composite_type(
            SyntaxKind::AmpersandToken,
            syntax_kind_ext::INTERSECTION_TYPE,
            Self::parse_type_operator,
        )
    }

    /// `A | B | C` / `A & B`, with an optional leading separator.
    fn parse_composite_type(
        &mut self,
        separator: SyntaxKind,
        kind: u16,
        parse_constituent: fn(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let pos = self.token_pos();
        let has_leading = self.parse_optional(separator);
        let first = parse_constituent(self);
        if !self.is_token(separator) && !has_leading {
            return first;
        }

        let mut types = vec![first];
        while self.parse_optional(separator) {
            types.push(parse_constituent(self));
        }

        let end = self.prev_token_end;
        self.arena.add_composite_type(
            kind,
            pos,
            end,
            CompositeTypeData {
                types: NodeList::new(types),
            },
        )
    }

    fn parse_type_operator(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let operator = self.token();
                self.next_token();
                let type_node = self.parse_type_operator();
                let end = self.prev_token_end;
                self.arena.add_wrapped_type(
                    syntax_kind_ext::TYPE_OPERATOR,
                    pos,
                    end,
                    WrappedTypeData {
                        operator,
                        type_node,
                    },
                )
            }
            SyntaxKind::InferKeyword => {
                self.next_token();
                let type_node = self.parse_identifier();
                let end = self.prev_token_end;
                self.arena.add_wrapped_type(
                    syntax_kind_ext::INFER_TYPE,
                    pos,
                    end,
                    WrappedTypeData {
                        operator: SyntaxKind::InferKeyword,
                        type_node,
                    },
                )
            }
            _ => self.parse_postfix_type(),
        }
    }

    /// `T[]` and `T[K]`, which bind tighter than unions.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut ty = self.parse_non_array_type();
        while !self.has_preceding_line_break() && self.is_token(SyntaxKind::OpenBracketToken) {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                let end = self.prev_token_end;
                ty = self.arena.add_array_type(
                    syntax_kind_ext::ARRAY_TYPE,
                    pos,
                    end,
                    ArrayTypeData { element_type: ty },
                );
            } else {
                let index_type = self.parse_type_allowing_conditional();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                let end = self.prev_token_end;
                ty = self.arena.add_indexed_access_type(
                    syntax_kind_ext::INDEXED_ACCESS_TYPE,
                    pos,
                    end,
                    IndexedAccessTypeData {
                        object_type: ty,
                        index_type,
                    },
                );
            }
        }
        ty
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let kind = self.token();
        match kind {
            _ if kind.is_keyword_type() && self.peek_token() != SyntaxKind::DotToken => {
                self.next_token();
                self.arena.add_token(kind as u16, pos, self.prev_token_end)
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = self.parse_literal();
                self.add_literal_type(pos, kind, literal)
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.next_token();
                let literal = self.arena.add_token(kind as u16, pos, self.prev_token_end);
                self.add_literal_type(pos, kind, literal)
            }
            SyntaxKind::MinusToken
                if matches!(
                    self.peek_token(),
                    SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral
                ) =>
            {
                self.next_token();
                let literal = self.parse_literal();
                self.add_literal_type(pos, SyntaxKind::MinusToken, literal)
            }
            SyntaxKind::TemplateLiteral => {
                self.next_token();
                self.arena.add_token(
                    syntax_kind_ext::TEMPLATE_LITERAL_TYPE,
                    pos,
                    self.prev_token_end,
                )
            }
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::ThisKeyword => {
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::THIS_TYPE, pos, self.prev_token_end)
            }
            SyntaxKind::OpenBraceToken => {
                if self.is_start_of_mapped_type() {
                    self.skip_balanced();
                    self.arena
                        .add_token(syntax_kind_ext::MAPPED_TYPE, pos, self.prev_token_end)
                } else {
                    let members = self.parse_type_members();
                    let end = self.prev_token_end;
                    self.arena.add_type_literal(
                        syntax_kind_ext::TYPE_LITERAL,
                        pos,
                        end,
                        TypeLiteralData { members },
                    )
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type_allowing_conditional();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let end = self.prev_token_end;
                self.arena.add_wrapped_type(
                    syntax_kind_ext::PARENTHESIZED_TYPE,
                    pos,
                    end,
                    WrappedTypeData {
                        operator: SyntaxKind::OpenParenToken,
                        type_node,
                    },
                )
            }
            _ if kind.is_identifier_or_keyword() => self.parse_type_reference(),
            _ => {
                self.parse_error_at_current_token("Type expected.", diagnostic_codes::TYPE_EXPECTED);
                NodeIndex::NONE
            }
        }
    }

    fn add_literal_type(&mut self, pos: u32, operator: SyntaxKind, literal: NodeIndex) -> NodeIndex {
        let end = self.prev_token_end;
        self.arena.add_wrapped_type(
            syntax_kind_ext::LITERAL_TYPE,
            pos,
            end,
            WrappedTypeData {
                operator,
                type_node: literal,
            },
        )
    }

    /// `Name`, `ns.Name`, `Name<A, B>`.
    fn parse_type_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let type_name = self.parse_entity_name();
        let type_arguments =
            if !self.has_preceding_line_break() && self.is_token(SyntaxKind::LessThanToken) {
                Some(self.parse_type_arguments())
            } else {
                None
            };

        let end = self.prev_token_end;
        self.arena.add_type_ref(
            syntax_kind_ext::TYPE_REFERENCE,
            pos,
            end,
            TypeRefData {
                type_name,
                type_arguments,
            },
        )
    }

    /// `A` or `A.B.C` in type position.
    pub(crate) fn parse_entity_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut entity = self.parse_identifier_name();
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            let end = self.prev_token_end;
            entity = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                pos,
                end,
                QualifiedNameData {
                    left: entity,
                    right,
                },
            );
        }
        entity
    }

    /// `<A, B>` after a type name or heritage expression.
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        self.parse_expected(SyntaxKind::LessThanToken);
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let argument = self.parse_type_allowing_conditional();
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
        self.parse_expected(SyntaxKind::GreaterThanToken);
        NodeList::new(arguments)
    }

    /// `typeof x.y<T>`
    fn parse_type_query(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        let type_node = if self.is_token(SyntaxKind::ImportKeyword) {
            self.parse_import_type()
        } else {
            self.parse_entity_name()
        };
        if !self.has_preceding_line_break() && self.is_token(SyntaxKind::LessThanToken) {
            self.parse_type_arguments();
        }
        let end = self.prev_token_end;
        self.arena.add_wrapped_type(
            syntax_kind_ext::TYPE_QUERY,
            pos,
            end,
            WrappedTypeData {
                operator: SyntaxKind::TypeOfKeyword,
                type_node,
            },
        )
    }

    /// `import('./mod').Name<T>`; only the span is kept.
    fn parse_import_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword);
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced();
        } else {
            self.parse_expected(SyntaxKind::OpenParenToken);
        }
        while self.parse_optional(SyntaxKind::DotToken) {
            self.parse_identifier_name();
        }
        if !self.has_preceding_line_break() && self.is_token(SyntaxKind::LessThanToken) {
            self.parse_type_arguments();
        }
        self.arena
            .add_token(syntax_kind_ext::IMPORT_TYPE, pos, self.prev_token_end)
    }

    /// `{ [K in T]: U }`, `{ readonly [K in T]: U }`, `{ -readonly [K in T]-?: U }`
    fn is_start_of_mapped_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if matches!(p.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
                p.next_token();
                if !p.is_token(SyntaxKind::ReadonlyKeyword) {
                    return false;
                }
            }
            if p.is_token(SyntaxKind::ReadonlyKeyword) {
                p.next_token();
            }
            if !p.is_token(SyntaxKind::OpenBracketToken) {
                return false;
            }
            p.next_token();
            if !p.token().is_identifier_like() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::InKeyword)
        })
    }

    /// `[A, B?, ...C[], name: D, rest?: E]`
    fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);

        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let element = self.parse_tuple_element();
            if element.is_some() {
                elements.push(element);
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);

        let end = self.prev_token_end;
        self.arena.add_composite_type(
            syntax_kind_ext::TUPLE_TYPE,
            pos,
            end,
            CompositeTypeData {
                types: NodeList::new(elements),
            },
        )
    }

    fn parse_tuple_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let is_rest = self.parse_optional(SyntaxKind::DotDotDotToken);

        // Named member: `name: T` / `name?: T`
        let is_named = self.token().is_identifier_or_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                p.parse_optional(SyntaxKind::QuestionToken);
                p.is_token(SyntaxKind::ColonToken)
            });
        let mut is_optional = false;
        if is_named {
            self.next_token();
            is_optional = self.parse_optional(SyntaxKind::QuestionToken);
            self.parse_expected(SyntaxKind::ColonToken);
        }

        let mut element = self.parse_type_allowing_conditional();
        if !is_named && self.parse_optional(SyntaxKind::QuestionToken) {
            is_optional = true;
        }

        if is_optional {
            let end = self.prev_token_end;
            element = self.arena.add_wrapped_type(
                syntax_kind_ext::OPTIONAL_TYPE,
                pos,
                end,
                WrappedTypeData {
                    operator: SyntaxKind::QuestionToken,
                    type_node: element,
                },
            );
        }
        if is_rest {
            let end = self.prev_token_end;
            element = self.arena.add_wrapped_type(
                syntax_kind_ext::REST_TYPE,
                pos,
                end,
                WrappedTypeData {
                    operator: SyntaxKind::DotDotDotToken,
                    type_node: element,
                },
            );
        }
        element
    }

    // =========================================================================
    // Type members (interfaces and type literals)
    // =========================================================================

    pub(crate) fn parse_type_members(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return NodeList::default();
        }

        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if !self.parse_optional(SyntaxKind::SemicolonToken)
                && !self.parse_optional(SyntaxKind::CommaToken)
                && !self.has_preceding_line_break()
                && !self.is_token(SyntaxKind::CloseBraceToken)
            {
                self.parse_error_at_current_token("';' expected.", diagnostic_codes::EXPECTED);
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        NodeList::new(members)
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let jsdoc = self.current_jsdoc();

        let node = match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                self.parse_signature_rest();
                self.arena
                    .add_token(syntax_kind_ext::CALL_SIGNATURE, pos, self.prev_token_end)
            }
            SyntaxKind::NewKeyword
                if matches!(
                    self.peek_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                ) =>
            {
                self.next_token();
                self.parse_signature_rest();
                self.arena.add_token(
                    syntax_kind_ext::CONSTRUCT_SIGNATURE,
                    pos,
                    self.prev_token_end,
                )
            }
            _ => {
                let flags = self.parse_member_modifiers();
                let node = if self.is_token(SyntaxKind::OpenBracketToken) && self.is_index_signature()
                {
                    self.skip_balanced();
                    if self.parse_optional(SyntaxKind::ColonToken) {
                        self.parse_type_allowing_conditional();
                    }
                    self.arena
                        .add_token(syntax_kind_ext::INDEX_SIGNATURE, pos, self.prev_token_end)
                } else if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
                    && self.next_is_property_name()
                {
                    self.next_token();
                    self.parse_property_name();
                    self.parse_signature_rest();
                    self.arena
                        .add_token(syntax_kind_ext::METHOD_SIGNATURE, pos, self.prev_token_end)
                } else {
                    self.parse_property_or_method_signature(pos)
                };
                self.arena.set_modifier_flags(node, flags);
                node
            }
        };

        self.arena.set_jsdoc(node, jsdoc);
        node
    }

    fn parse_property_or_method_signature(&mut self, pos: u32) -> NodeIndex {
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
        ) {
            self.parse_signature_rest();
            return self
                .arena
                .add_token(syntax_kind_ext::METHOD_SIGNATURE, pos, self.prev_token_end);
        }

        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_allowing_conditional()
        } else {
            NodeIndex::NONE
        };

        let end = self.prev_token_end;
        self.arena.add_property_decl(
            syntax_kind_ext::PROPERTY_SIGNATURE,
            pos,
            end,
            PropertyDeclData {
                decorators: None,
                name,
                question_token,
                exclamation_token: false,
                type_annotation,
                initializer: NodeIndex::NONE,
            },
        )
    }

    /// Type parameters, parameters and return type of a signature.
    fn parse_signature_rest(&mut self) {
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
    }

    // =========================================================================
    // Type parameters
    // =========================================================================

    /// `<T, U extends X = Y>`; `None` when no list is present.
    pub(crate) fn parse_type_parameters(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        self.next_token();

        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            parameters.push(self.parse_type_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(NodeList::new(parameters))
    }

    fn parse_type_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();

        // Variance and const modifiers: `in T`, `out T`, `const T`
        loop {
            let is_modifier = matches!(
                self.token(),
                SyntaxKind::InKeyword | SyntaxKind::ConstKeyword
            ) || (self.is_token(SyntaxKind::Identifier)
                && self.scanner.get_token_value_ref() == "out");
            if is_modifier && self.peek_token().is_identifier_like() {
                self.next_token();
            } else {
                break;
            }
        }

        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_type_allowing_conditional()
        } else {
            NodeIndex::NONE
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_type_allowing_conditional()
        } else {
            NodeIndex::NONE
        };

        let end = self.prev_token_end;
        self.arena.add_type_parameter(
            syntax_kind_ext::TYPE_PARAMETER,
            pos,
            end,
            TypeParameterData {
                name,
                constraint,
                default,
            },
        )
    }
}
