//! Typed views over a parsed file's declarations.

use crate::program::ParsedFile;
use crate::properties::TypeReferenceKind;
use dtoc_parser::NodeIndex;
use dtoc_parser::parser::node::{ClassData, ModifierFlags, NodeArena};
use dtoc_parser::parser::syntax_kind_ext;
use dtoc_scanner::SyntaxKind;

/// A class declaration as seen by the generator.
#[derive(Clone, Debug)]
pub struct ClassDecl<'a> {
    pub node: NodeIndex,
    pub name: &'a str,
    pub jsdoc: Option<&'a str>,
    /// Verbatim type parameter list including the angle brackets.
    pub type_parameters: Option<String>,
    pub type_parameter_names: Vec<&'a str>,
    pub properties: Vec<PropertyDecl<'a>>,
    data: &'a ClassData,
}

impl<'a> ClassDecl<'a> {
    pub fn data(&self) -> &'a ClassData {
        self.data
    }

    pub fn has_type_parameter(&self, name: &str) -> bool {
        self.type_parameter_names.iter().any(|p| *p == name)
    }
}

/// An instance property that belongs in the structural type.
#[derive(Clone, Debug)]
pub struct PropertyDecl<'a> {
    pub node: NodeIndex,
    /// Name as written (`id`, `'quoted-name'`, `42`)
    pub name: &'a str,
    pub optional: bool,
    pub type_node: NodeIndex,
    /// Annotation text, or a type inferred from a literal initializer
    pub type_text: String,
    pub jsdoc: Option<&'a str>,
    /// Filled in by the property emitter
    pub reference: TypeReferenceKind,
}

/// One name bound by an `import { ... }` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedName<'a> {
    /// Binding visible in the importing file
    pub local: &'a str,
    /// Name exported by the target module
    pub exported: &'a str,
}

/// An import declaration's specifier and bindings.
#[derive(Clone, Debug)]
pub struct ImportRef<'a> {
    pub specifier: &'a str,
    pub named: Vec<ImportedName<'a>>,
    pub default_binding: Option<&'a str>,
    pub namespace_binding: Option<&'a str>,
}

impl<'a> ImportRef<'a> {
    /// The exported name behind `local`, if this import binds it by name.
    pub fn exported_name_of(&self, local: &str) -> Option<&'a str> {
        self.named
            .iter()
            .find(|n| n.local == local)
            .map(|n| n.exported)
    }

    /// Does this import bind `local` as a default or namespace import?
    pub fn binds_module_object(&self, local: &str) -> bool {
        self.default_binding == Some(local) || self.namespace_binding == Some(local)
    }
}

/// Declaration kinds the generator looks up by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Enum,
    TypeAlias,
    Class,
    Interface,
    /// `namespace N { }`; string-named ambient modules are not included.
    Namespace,
}

impl DeclarationKind {
    fn node_kind(self) -> u16 {
        match self {
            DeclarationKind::Enum => syntax_kind_ext::ENUM_DECLARATION,
            DeclarationKind::TypeAlias => syntax_kind_ext::TYPE_ALIAS_DECLARATION,
            DeclarationKind::Class => syntax_kind_ext::CLASS_DECLARATION,
            DeclarationKind::Interface => syntax_kind_ext::INTERFACE_DECLARATION,
            DeclarationKind::Namespace => syntax_kind_ext::MODULE_DECLARATION,
        }
    }
}

impl ParsedFile {
    /// Named class declarations in source order.
    pub fn classes(&self) -> Vec<ClassDecl<'_>> {
        let arena = &self.arena;
        self.statements()
            .iter()
            .filter_map(|&index| {
                let node = arena.get(index)?;
                let data = arena.get_class(node)?;
                let name = arena.name_text(data.name)?;
                Some(class_decl(arena, index, name, data))
            })
            .collect()
    }

    pub fn imports(&self) -> Vec<ImportRef<'_>> {
        let arena = &self.arena;
        self.statements()
            .iter()
            .filter_map(|&index| {
                let import = arena.get_import_decl(arena.get(index)?)?;
                let specifier = arena.name_text(import.module_specifier)?;
                let named = import
                    .named_bindings
                    .iter()
                    .flat_map(|list| list.iter())
                    .filter_map(|spec_index| {
                        let spec = arena.get_specifier(arena.get(spec_index)?)?;
                        let local = arena.name_text(spec.name)?;
                        let exported = if spec.property_name.is_some() {
                            arena.name_text(spec.property_name)?
                        } else {
                            local
                        };
                        Some(ImportedName { local, exported })
                    })
                    .collect();
                Some(ImportRef {
                    specifier,
                    named,
                    default_binding: arena.name_text(import.default_binding),
                    namespace_binding: arena.name_text(import.namespace_binding),
                })
            })
            .collect()
    }

    /// First top-level declaration of `kind` named `name`.
    pub fn find_declaration(&self, kind: DeclarationKind, name: &str) -> Option<NodeIndex> {
        let arena = &self.arena;
        let wanted = kind.node_kind();
        self.statements().iter().copied().find(|&index| {
            arena
                .get(index)
                .filter(|node| node.kind == wanted)
                .and_then(|_| declaration_name(arena, index))
                == Some(name)
        })
    }

    /// A class, interface or namespace named `name` is declared here. Such
    /// names never need a declaration in the output.
    pub fn declares_local_scope_name(&self, name: &str) -> bool {
        [
            DeclarationKind::Class,
            DeclarationKind::Interface,
            DeclarationKind::Namespace,
        ]
        .into_iter()
        .any(|kind| self.find_declaration(kind, name).is_some())
    }

    /// Declaration text with an `export` keyword in front when the source
    /// did not export it.
    pub fn exported_declaration_text(&self, index: NodeIndex) -> String {
        let text = self.arena.node_text(index);
        if self.arena.modifier_flags(index).contains(ModifierFlags::EXPORT) {
            text.to_string()
        } else {
            format!("export {text}")
        }
    }
}

fn declaration_name(arena: &NodeArena, index: NodeIndex) -> Option<&str> {
    let node = arena.get(index)?;
    let name = match node.kind {
        k if k == syntax_kind_ext::ENUM_DECLARATION => arena.get_enum(node)?.name,
        k if k == syntax_kind_ext::TYPE_ALIAS_DECLARATION => arena.get_type_alias(node)?.name,
        k if k == syntax_kind_ext::CLASS_DECLARATION => arena.get_class(node)?.name,
        k if k == syntax_kind_ext::INTERFACE_DECLARATION => arena.get_interface(node)?.name,
        k if k == syntax_kind_ext::MODULE_DECLARATION => {
            let name = arena.get_module(node)?.name;
            if arena.get(name)?.kind != SyntaxKind::Identifier as u16 {
                return None;
            }
            name
        }
        _ => return None,
    };
    arena.name_text(name)
}

fn class_decl<'a>(
    arena: &'a NodeArena,
    index: NodeIndex,
    name: &'a str,
    data: &'a ClassData,
) -> ClassDecl<'a> {
    let type_parameter_nodes: Vec<NodeIndex> = data
        .type_parameters
        .iter()
        .flat_map(|list| list.iter())
        .collect();
    let type_parameter_names = type_parameter_nodes
        .iter()
        .filter_map(|&p| {
            let param = arena.get_type_parameter(arena.get(p)?)?;
            arena.name_text(param.name)
        })
        .collect();
    let type_parameters = match (type_parameter_nodes.first(), type_parameter_nodes.last()) {
        (Some(&first), Some(&last)) => {
            let start = arena.get(first).map_or(0, |n| n.pos) as usize;
            let end = arena.get(last).map_or(0, |n| n.end) as usize;
            arena
                .source_text()
                .get(start..end)
                .map(|params| format!("<{params}>"))
        }
        _ => None,
    };

    let properties = data
        .members
        .iter()
        .filter_map(|member| property_decl(arena, member))
        .collect();

    ClassDecl {
        node: index,
        name,
        jsdoc: arena.jsdoc_text(index),
        type_parameters,
        type_parameter_names,
        properties,
        data,
    }
}

/// Instance properties only: static members and `#private` fields are not
/// part of the structural shape.
fn property_decl(arena: &NodeArena, member: NodeIndex) -> Option<PropertyDecl<'_>> {
    let node = arena.get(member)?;
    if node.kind != syntax_kind_ext::PROPERTY_DECLARATION
        || node.modifier_flags().contains(ModifierFlags::STATIC)
    {
        return None;
    }
    let data = arena.get_property_decl(node)?;
    let name_node = arena.get(data.name)?;
    if name_node.kind == SyntaxKind::PrivateIdentifier as u16 {
        return None;
    }
    let name = arena.node_text(data.name);
    if name.is_empty() {
        return None;
    }

    let type_text = if data.type_annotation.is_some() {
        arena.node_text(data.type_annotation).to_string()
    } else {
        infer_type_from_initializer(arena, data.initializer).to_string()
    };

    Some(PropertyDecl {
        node: member,
        name,
        optional: data.question_token,
        type_node: data.type_annotation,
        type_text,
        jsdoc: arena.jsdoc_text(member),
        reference: TypeReferenceKind::None,
    })
}

/// Widened type of a literal initializer; `unknown` for anything else.
fn infer_type_from_initializer(arena: &NodeArena, initializer: NodeIndex) -> &'static str {
    let Some(node) = arena.get(initializer) else {
        return "unknown";
    };
    match node.kind {
        k if k == SyntaxKind::StringLiteral as u16
            || k == SyntaxKind::NoSubstitutionTemplateLiteral as u16 =>
        {
            "string"
        }
        k if k == SyntaxKind::NumericLiteral as u16 => "number",
        k if k == SyntaxKind::BigIntLiteral as u16 => "bigint",
        k if k == SyntaxKind::TrueKeyword as u16 || k == SyntaxKind::FalseKeyword as u16 => {
            "boolean"
        }
        k if k == syntax_kind_ext::SKIPPED_EXPRESSION => {
            let text = arena.node_text(initializer);
            let is_negative_number = text
                .strip_prefix('-')
                .map(str::trim_start)
                .is_some_and(|rest| !rest.is_empty() && rest.parse::<f64>().is_ok());
            if is_negative_number { "number" } else { "unknown" }
        }
        _ => "unknown",
    }
}

#[cfg(test)]
#[path = "tests/declarations_tests.rs"]
mod declarations_tests;
