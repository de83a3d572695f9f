//! NodeArena creation methods (add_* methods).

use super::base::NodeIndex;
use super::node::*;
use dtoc_common::CommentRange;
use dtoc_scanner::SyntaxKind;

/// Generates one `add_*` method per typed pool: push the data, then
/// allocate a header pointing at it.
macro_rules! define_pool_adders {
    ($($method:ident => $pool:ident : $data:ty),+ $(,)?) => {
        $(
            pub fn $method(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                let data_index = self.$pool.len() as u32;
                self.$pool.push(data);
                self.alloc(kind, pos, end, data_index)
            }
        )+
    };
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[inline]
    fn alloc(&mut self, kind: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::with_data(kind, pos, end, data_index));
        NodeIndex(index)
    }

    /// Add a node that carries no data beyond its span.
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.alloc(kind, pos, end, Node::NO_DATA)
    }

    pub fn add_identifier(&mut self, kind: SyntaxKind, pos: u32, end: u32, text: &str) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData {
            escaped_text: text.to_string(),
        });
        self.alloc(kind as u16, pos, end, data_index)
    }

    pub fn add_literal(&mut self, kind: SyntaxKind, pos: u32, end: u32, text: &str) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(LiteralData {
            text: text.to_string(),
        });
        self.alloc(kind as u16, pos, end, data_index)
    }

    define_pool_adders! {
        add_qualified_name => qualified_names: QualifiedNameData,
        add_call_expr => call_exprs: CallExprData,
        add_expr_with_type_args => expr_with_type_args: ExprWithTypeArgsData,
        add_heritage => heritage_clauses: HeritageData,
        add_class => classes: ClassData,
        add_interface => interfaces: InterfaceData,
        add_type_alias => type_aliases: TypeAliasData,
        add_enum => enums: EnumData,
        add_enum_member => enum_members: EnumMemberData,
        add_module => modules: ModuleData,
        add_type_parameter => type_parameters: TypeParameterData,
        add_property_decl => property_decls: PropertyDeclData,
        add_type_ref => type_refs: TypeRefData,
        add_composite_type => composite_types: CompositeTypeData,
        add_array_type => array_types: ArrayTypeData,
        add_wrapped_type => wrapped_types: WrappedTypeData,
        add_indexed_access_type => indexed_access_types: IndexedAccessTypeData,
        add_conditional_type => conditional_types: ConditionalTypeData,
        add_type_literal => type_literals: TypeLiteralData,
        add_function_type => function_types: FunctionTypeData,
        add_import_decl => import_decls: ImportDeclData,
        add_specifier => specifiers: SpecifierData,
        add_source_file => source_files: SourceFileData,
    }

    pub fn set_modifier_flags(&mut self, index: NodeIndex, flags: ModifierFlags) {
        if let Some(node) = self.get_mut(index) {
            node.flags = flags.bits();
        }
    }

    pub fn set_jsdoc(&mut self, index: NodeIndex, comment: Option<CommentRange>) {
        if let Some(comment) = comment
            && index.is_some()
        {
            self.jsdoc.insert(index.0, comment);
        }
    }
}
