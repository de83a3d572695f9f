//! NodeArena access methods (get_* methods and text helpers).

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext;
use dtoc_scanner::SyntaxKind;

/// Generates one typed getter per pool, checking the node kind first.
macro_rules! define_pool_getters {
    ($($method:ident => $pool:ident : $data:ty [$($kind:expr),+ $(,)?]),+ $(,)?) => {
        $(
            pub fn $method(&self, node: &Node) -> Option<&$data> {
                if !node.has_data() || ![$($kind),+].contains(&node.kind) {
                    return None;
                }
                self.$pool.get(node.data_index as usize)
            }
        )+
    };
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if !node.has_data()
            || (node.kind != SyntaxKind::Identifier as u16
                && node.kind != SyntaxKind::PrivateIdentifier as u16)
        {
            return None;
        }
        self.identifiers.get(node.data_index as usize)
    }

    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        let kind = node.kind;
        let is_literal = kind == SyntaxKind::StringLiteral as u16
            || kind == SyntaxKind::NumericLiteral as u16
            || kind == SyntaxKind::BigIntLiteral as u16
            || kind == SyntaxKind::NoSubstitutionTemplateLiteral as u16
            || kind == SyntaxKind::TemplateLiteral as u16;
        if !node.has_data() || !is_literal {
            return None;
        }
        self.literals.get(node.data_index as usize)
    }

    define_pool_getters! {
        get_qualified_name => qualified_names: QualifiedNameData [
            syntax_kind_ext::QUALIFIED_NAME,
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
        ],
        get_call_expr => call_exprs: CallExprData [syntax_kind_ext::CALL_EXPRESSION],
        get_expr_with_type_args => expr_with_type_args: ExprWithTypeArgsData [
            syntax_kind_ext::EXPRESSION_WITH_TYPE_ARGUMENTS,
        ],
        get_heritage_clause => heritage_clauses: HeritageData [syntax_kind_ext::HERITAGE_CLAUSE],
        get_class => classes: ClassData [syntax_kind_ext::CLASS_DECLARATION],
        get_interface => interfaces: InterfaceData [syntax_kind_ext::INTERFACE_DECLARATION],
        get_type_alias => type_aliases: TypeAliasData [syntax_kind_ext::TYPE_ALIAS_DECLARATION],
        get_enum => enums: EnumData [syntax_kind_ext::ENUM_DECLARATION],
        get_enum_member => enum_members: EnumMemberData [syntax_kind_ext::ENUM_MEMBER],
        get_module => modules: ModuleData [syntax_kind_ext::MODULE_DECLARATION],
        get_type_parameter => type_parameters: TypeParameterData [syntax_kind_ext::TYPE_PARAMETER],
        get_property_decl => property_decls: PropertyDeclData [
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::PROPERTY_SIGNATURE,
        ],
        get_type_ref => type_refs: TypeRefData [syntax_kind_ext::TYPE_REFERENCE],
        get_composite_type => composite_types: CompositeTypeData [
            syntax_kind_ext::UNION_TYPE,
            syntax_kind_ext::INTERSECTION_TYPE,
            syntax_kind_ext::TUPLE_TYPE,
        ],
        get_array_type => array_types: ArrayTypeData [syntax_kind_ext::ARRAY_TYPE],
        get_wrapped_type => wrapped_types: WrappedTypeData [
            syntax_kind_ext::PARENTHESIZED_TYPE,
            syntax_kind_ext::TYPE_OPERATOR,
            syntax_kind_ext::TYPE_QUERY,
            syntax_kind_ext::INFER_TYPE,
            syntax_kind_ext::LITERAL_TYPE,
            syntax_kind_ext::REST_TYPE,
            syntax_kind_ext::OPTIONAL_TYPE,
        ],
        get_indexed_access_type => indexed_access_types: IndexedAccessTypeData [
            syntax_kind_ext::INDEXED_ACCESS_TYPE,
        ],
        get_conditional_type => conditional_types: ConditionalTypeData [
            syntax_kind_ext::CONDITIONAL_TYPE,
        ],
        get_type_literal => type_literals: TypeLiteralData [syntax_kind_ext::TYPE_LITERAL],
        get_function_type => function_types: FunctionTypeData [
            syntax_kind_ext::FUNCTION_TYPE,
            syntax_kind_ext::CONSTRUCTOR_TYPE,
        ],
        get_import_decl => import_decls: ImportDeclData [syntax_kind_ext::IMPORT_DECLARATION],
        get_specifier => specifiers: SpecifierData [syntax_kind_ext::IMPORT_SPECIFIER],
        get_source_file => source_files: SourceFileData [syntax_kind_ext::SOURCE_FILE],
    }

    // =========================================================================
    // Text helpers
    // =========================================================================

    /// The parsed source file's data (present once parsing finished).
    pub fn source_file(&self) -> Option<&SourceFileData> {
        self.source_files.first()
    }

    /// Full source text of the parsed file.
    pub fn source_text(&self) -> &str {
        self.source_file().map(|sf| &*sf.text).unwrap_or("")
    }

    /// Verbatim source text covered by a node.
    pub fn node_text(&self, index: NodeIndex) -> &str {
        let Some(node) = self.get(index) else {
            return "";
        };
        self.source_text()
            .get(node.pos as usize..node.end as usize)
            .unwrap_or("")
    }

    /// Text of an identifier or literal node (unquoted for strings).
    pub fn name_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if let Some(ident) = self.get_identifier(node) {
            return Some(&ident.escaped_text);
        }
        self.get_literal(node).map(|lit| lit.text.as_str())
    }

    /// Dotted text of an entity name (`A`, `A.B.C`).
    pub fn entity_name_text(&self, index: NodeIndex) -> Option<String> {
        let node = self.get(index)?;
        if let Some(ident) = self.get_identifier(node) {
            return Some(ident.escaped_text.clone());
        }
        let qualified = self.get_qualified_name(node)?;
        let left = self.entity_name_text(qualified.left)?;
        let right = self.name_text(qualified.right)?;
        Some(format!("{left}.{right}"))
    }

    /// Left-most identifier of an entity name (`A` for `A.B.C`).
    pub fn leftmost_identifier(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        if let Some(ident) = self.get_identifier(node) {
            return Some(&ident.escaped_text);
        }
        let qualified = self.get_qualified_name(node)?;
        self.leftmost_identifier(qualified.left)
    }

    /// Verbatim JSDoc comment attached to a declaration or member.
    pub fn jsdoc_text(&self, index: NodeIndex) -> Option<&str> {
        let comment = self.jsdoc.get(&index.0)?;
        let text = comment.get_text(self.source_text());
        (!text.is_empty()).then_some(text)
    }

    pub fn modifier_flags(&self, index: NodeIndex) -> ModifierFlags {
        self.get(index)
            .map(Node::modifier_flags)
            .unwrap_or_default()
    }
}
