//! Thin node architecture
//!
//! Each node is a small `Node` header (kind, flags, position, data index).
//! Node-specific data lives in typed pools on the `NodeArena`; `data_index`
//! points into the pool selected by `kind`. Token-like nodes (keyword types,
//! skipped statements, decorators) carry no data at all.

use super::base::{NodeIndex, NodeList};
use bitflags::bitflags;
use dtoc_common::CommentRange;
use dtoc_scanner::SyntaxKind;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// A node header.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Node {
    /// SyntaxKind value, or a `syntax_kind_ext` constant
    pub kind: u16,
    /// Packed `ModifierFlags`
    pub flags: u16,
    /// Start of the node's first token (trivia excluded)
    pub pos: u32,
    /// End of the node's last token
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn modifier_flags(&self) -> ModifierFlags {
        ModifierFlags::from_bits_truncate(self.flags)
    }

    #[inline]
    pub fn is(&self, kind: u16) -> bool {
        self.kind == kind
    }
}

bitflags! {
    /// Modifiers written on declarations and class members.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u16 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const DECLARE = 1 << 2;
        const CONST = 1 << 3;
        const ABSTRACT = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const PUBLIC = 1 << 7;
        const PRIVATE = 1 << 8;
        const PROTECTED = 1 << 9;
        const OVERRIDE = 1 << 10;
        const ACCESSOR = 1 << 11;
        const ASYNC = 1 << 12;
    }
}

impl ModifierFlags {
    /// The flag a modifier keyword sets, if it is a modifier at all.
    pub fn from_keyword(kind: SyntaxKind) -> Option<ModifierFlags> {
        let flag = match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::DeclareKeyword => ModifierFlags::DECLARE,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            _ => return None,
        };
        Some(flag)
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier nodes (Identifier, PrivateIdentifier)
#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for string/numeric literals. `text` is the unquoted value for
/// strings and the source text for numbers.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    pub text: String,
}

/// Data for `A.B` in type names and heritage expressions
#[derive(Clone, Debug, Serialize)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

/// Data for call expressions in heritage clauses (`PartialType(Base)`)
#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub arguments: NodeList,
}

/// Data for `Base<T>` in heritage clauses
#[derive(Clone, Debug, Serialize)]
pub struct ExprWithTypeArgsData {
    pub expression: NodeIndex,
    pub type_arguments: NodeList,
}

/// Data for heritage clauses (extends/implements)
#[derive(Clone, Debug, Serialize)]
pub struct HeritageData {
    pub token: SyntaxKind,
    pub types: NodeList,
}

/// Data for class declarations
#[derive(Clone, Debug, Serialize)]
pub struct ClassData {
    pub decorators: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

/// Data for interface declarations
#[derive(Clone, Debug, Serialize)]
pub struct InterfaceData {
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

/// Data for type alias declarations
#[derive(Clone, Debug, Serialize)]
pub struct TypeAliasData {
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub type_node: NodeIndex,
}

/// Data for enum declarations
#[derive(Clone, Debug, Serialize)]
pub struct EnumData {
    pub name: NodeIndex,
    pub members: NodeList,
}

/// Data for enum members
#[derive(Clone, Debug, Serialize)]
pub struct EnumMemberData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for `namespace X { }` / `module 'x' { }`; the body is skipped.
#[derive(Clone, Debug, Serialize)]
pub struct ModuleData {
    pub name: NodeIndex,
}

/// Data for type parameters
#[derive(Clone, Debug, Serialize)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

/// Data for class property declarations and property signatures
#[derive(Clone, Debug, Serialize)]
pub struct PropertyDeclData {
    pub decorators: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for type references
#[derive(Clone, Debug, Serialize)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

/// Data for union/intersection/tuple types
#[derive(Clone, Debug, Serialize)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

/// Data for `T[]`
#[derive(Clone, Debug, Serialize)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

/// Data for types that wrap a single child: parenthesized, `keyof T`,
/// `readonly T[]`, `typeof x`, `infer U`, literal, rest and optional types.
#[derive(Clone, Debug, Serialize)]
pub struct WrappedTypeData {
    pub operator: SyntaxKind,
    pub type_node: NodeIndex,
}

/// Data for `T[K]`
#[derive(Clone, Debug, Serialize)]
pub struct IndexedAccessTypeData {
    pub object_type: NodeIndex,
    pub index_type: NodeIndex,
}

/// Data for `A extends B ? C : D`
#[derive(Clone, Debug, Serialize)]
pub struct ConditionalTypeData {
    pub check_type: NodeIndex,
    pub extends_type: NodeIndex,
    pub true_type: NodeIndex,
    pub false_type: NodeIndex,
}

/// Data for `{ a: T; b?: U }`
#[derive(Clone, Debug, Serialize)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

/// Data for function and constructor types; parameters are skipped.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionTypeData {
    pub return_type: NodeIndex,
}

/// Data for import declarations
#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclData {
    pub is_type_only: bool,
    pub default_binding: NodeIndex,
    pub namespace_binding: NodeIndex,
    pub named_bindings: Option<NodeList>,
    pub module_specifier: NodeIndex,
}

/// Data for `a` / `a as b` / `type a` inside `import { ... }`
#[derive(Clone, Debug, Serialize)]
pub struct SpecifierData {
    pub is_type_only: bool,
    /// The exported name when renamed (`a` in `a as b`), otherwise NONE
    pub property_name: NodeIndex,
    /// The local binding
    pub name: NodeIndex,
}

/// Data for the source file root
#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    pub text: Arc<str>,
    pub statements: NodeList,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Arena holding all nodes of one parsed file.
#[derive(Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub qualified_names: Vec<QualifiedNameData>,
    pub call_exprs: Vec<CallExprData>,
    pub expr_with_type_args: Vec<ExprWithTypeArgsData>,
    pub heritage_clauses: Vec<HeritageData>,
    pub classes: Vec<ClassData>,
    pub interfaces: Vec<InterfaceData>,
    pub type_aliases: Vec<TypeAliasData>,
    pub enums: Vec<EnumData>,
    pub enum_members: Vec<EnumMemberData>,
    pub modules: Vec<ModuleData>,
    pub type_parameters: Vec<TypeParameterData>,
    pub property_decls: Vec<PropertyDeclData>,
    pub type_refs: Vec<TypeRefData>,
    pub composite_types: Vec<CompositeTypeData>,
    pub array_types: Vec<ArrayTypeData>,
    pub wrapped_types: Vec<WrappedTypeData>,
    pub indexed_access_types: Vec<IndexedAccessTypeData>,
    pub conditional_types: Vec<ConditionalTypeData>,
    pub type_literals: Vec<TypeLiteralData>,
    pub function_types: Vec<FunctionTypeData>,
    pub import_decls: Vec<ImportDeclData>,
    pub specifiers: Vec<SpecifierData>,
    pub source_files: Vec<SourceFileData>,
    /// JSDoc comment attached to a declaration or member, keyed by node index
    pub jsdoc: FxHashMap<u32, CommentRange>,
}
