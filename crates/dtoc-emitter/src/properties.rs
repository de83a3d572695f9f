//! Property Emitter.
//!
//! Produces one field line per instance property, in declaration order, and
//! asks the symbol locator for every enum or type alias a property type
//! refers to so the declaration ends up in the global block.
//!
//! A reference at the top of a property type is resolved strictly: when it
//! is neither declared locally nor imported, generation fails. References
//! nested inside arrays, unions, type arguments and so on are resolved only
//! when the locator can find them.

use crate::accumulator::GlobalAccumulator;
use crate::declarations::{ClassDecl, PropertyDecl};
use crate::error::GenerateError;
use crate::program::FileId;
use crate::symbol_locator::{SymbolKind, SymbolLocator, SymbolOrigin};
use dtoc_common::comments::format_multi_line_comment;
use dtoc_parser::NodeIndex;
use dtoc_parser::parser::node::NodeArena;
use dtoc_parser::parser::syntax_kind_ext;
use tracing::{debug, trace};

/// Type names provided by the standard library; references to them never
/// need a declaration in the output. Sorted for binary search.
const GLOBAL_TYPE_NAMES: &[&str] = &[
    "AbortController",
    "AbortSignal",
    "Array",
    "ArrayBuffer",
    "ArrayBufferLike",
    "ArrayBufferView",
    "ArrayLike",
    "AsyncGenerator",
    "AsyncIterable",
    "AsyncIterableIterator",
    "AsyncIterator",
    "Awaited",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Blob",
    "Boolean",
    "Buffer",
    "Capitalize",
    "ConstructorParameters",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "Exclude",
    "Extract",
    "File",
    "Float32Array",
    "Float64Array",
    "FormData",
    "Function",
    "Generator",
    "Headers",
    "InstanceType",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "Iterable",
    "IterableIterator",
    "Iterator",
    "JSON",
    "Lowercase",
    "Map",
    "Math",
    "NoInfer",
    "NonNullable",
    "Number",
    "Object",
    "Omit",
    "OmitThisParameter",
    "Parameters",
    "Partial",
    "Pick",
    "Promise",
    "PromiseLike",
    "PropertyDescriptor",
    "PropertyKey",
    "RangeError",
    "ReadableStream",
    "Readonly",
    "ReadonlyArray",
    "ReadonlyMap",
    "ReadonlySet",
    "Record",
    "ReferenceError",
    "RegExp",
    "Request",
    "Required",
    "Response",
    "ReturnType",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TemplateStringsArray",
    "TextDecoder",
    "TextEncoder",
    "ThisParameterType",
    "ThisType",
    "TypeError",
    "URIError",
    "URL",
    "URLSearchParams",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "Uncapitalize",
    "Uppercase",
    "WeakMap",
    "WeakRef",
    "WeakSet",
];

pub fn is_global_type_name(name: &str) -> bool {
    GLOBAL_TYPE_NAMES.binary_search(&name).is_ok()
}

/// How a property's top-level type reference is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeReferenceKind {
    Enum,
    TypeAlias,
    None,
}

impl From<SymbolKind> for TypeReferenceKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Enum => TypeReferenceKind::Enum,
            SymbolKind::TypeAlias => TypeReferenceKind::TypeAlias,
        }
    }
}

impl TypeReferenceKind {
    fn symbol_kind(self) -> Option<SymbolKind> {
        match self {
            TypeReferenceKind::Enum => Some(SymbolKind::Enum),
            TypeReferenceKind::TypeAlias => Some(SymbolKind::TypeAlias),
            TypeReferenceKind::None => None,
        }
    }
}

/// One `name?: type;` line of an emitted type literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLine {
    pub jsdoc: Option<String>,
    pub name: String,
    pub optional: bool,
    pub type_text: String,
}

impl FieldLine {
    fn from_property(property: &PropertyDecl<'_>) -> FieldLine {
        FieldLine {
            jsdoc: property.jsdoc.map(str::to_string),
            name: property.name.to_string(),
            optional: property.optional,
            type_text: property.type_text.clone(),
        }
    }

    /// The line (with its JSDoc above it) indented by `indent`.
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        if let Some(jsdoc) = &self.jsdoc {
            out.push_str(indent);
            out.push_str(&format_multi_line_comment(jsdoc, indent));
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str(&self.name);
        if self.optional {
            out.push('?');
        }
        out.push_str(": ");
        out.push_str(&self.type_text);
        out.push(';');
        out
    }
}

/// What property emission needs from the run: where to look symbols up,
/// where to put what it finds, and which file is being processed.
pub struct EmitContext<'p, 'a> {
    pub locator: SymbolLocator<'p>,
    pub accumulator: &'a mut GlobalAccumulator,
    pub file: FileId,
}

impl EmitContext<'_, '_> {
    fn arena(&self) -> &NodeArena {
        &self.locator.program().file(self.file).arena
    }

    /// Locate `symbol` and append it to the accumulator.
    fn request(&mut self, symbol: &str, kind: SymbolKind) -> Result<(), GenerateError> {
        if let Some(located) = self.locator.locate(self.file, symbol, kind)? {
            self.accumulator.append(located);
        }
        Ok(())
    }
}

/// Field lines for `class`, in declaration order. Each property's
/// `reference` is filled in along the way.
pub fn emit_properties(
    ctx: &mut EmitContext<'_, '_>,
    class: &mut ClassDecl<'_>,
) -> Result<Vec<FieldLine>, GenerateError> {
    let type_parameters = class.type_parameter_names.clone();
    let mut lines = Vec::with_capacity(class.properties.len());

    for property in &mut class.properties {
        if let Some((name, kind)) = classify(ctx, &type_parameters, property.type_node) {
            property.reference = kind;
            if let Some(symbol_kind) = kind.symbol_kind() {
                debug!(
                    class = class.name,
                    property = property.name,
                    symbol = %name,
                    ?kind,
                    "property references declaration"
                );
                ctx.request(&name, symbol_kind)?;
            }
        }
        resolve_nested(ctx, &type_parameters, property.type_node)?;
        lines.push(FieldLine::from_property(property));
    }
    Ok(lines)
}

/// Classify a property type whose top node is a type reference. Returns the
/// referenced name (the left-most identifier of a dotted name) and its kind.
fn classify(
    ctx: &EmitContext<'_, '_>,
    type_parameters: &[&str],
    type_node: NodeIndex,
) -> Option<(String, TypeReferenceKind)> {
    let arena = ctx.arena();
    let node = arena.get(type_node)?;
    let type_ref = arena.get_type_ref(node)?;
    let name = arena.leftmost_identifier(type_ref.type_name)?.to_string();

    if type_parameters.contains(&name.as_str()) {
        return Some((name, TypeReferenceKind::None));
    }
    if let Some(kind) = ctx.locator.resolve_kind(ctx.file, &name) {
        return Some((name, kind.into()));
    }

    let file = ctx.locator.program().file(ctx.file);
    let needs_no_declaration = file.declares_local_scope_name(&name)
        || match ctx.locator.origin_of(ctx.file, &name) {
            SymbolOrigin::ModuleObject => true,
            SymbolOrigin::Imported { .. } => ctx.locator.is_package_import(ctx.file, &name),
            SymbolOrigin::Local => false,
            SymbolOrigin::Unbound => is_global_type_name(&name),
        };
    let kind = if needs_no_declaration {
        TypeReferenceKind::None
    } else {
        TypeReferenceKind::TypeAlias
    };
    Some((name, kind))
}

/// Resolve references below the top node of a property type, skipping any
/// the locator cannot find.
fn resolve_nested(
    ctx: &mut EmitContext<'_, '_>,
    type_parameters: &[&str],
    type_node: NodeIndex,
) -> Result<(), GenerateError> {
    let mut names = Vec::new();
    collect_nested_references(ctx.arena(), type_node, true, &mut names);
    for name in names {
        if type_parameters.contains(&name.as_str()) {
            continue;
        }
        match ctx.locator.resolve_kind(ctx.file, &name) {
            Some(kind) => {
                trace!(symbol = %name, ?kind, "nested reference");
                ctx.request(&name, kind)?;
            }
            None => trace!(symbol = %name, "nested reference left as is"),
        }
    }
    Ok(())
}

/// Left-most names of every type reference inside `index`, in source order.
/// The reference at `index` itself is skipped when `is_top` is set; its type
/// arguments are still visited.
fn collect_nested_references(
    arena: &NodeArena,
    index: NodeIndex,
    is_top: bool,
    names: &mut Vec<String>,
) {
    let Some(node) = arena.get(index) else {
        return;
    };

    if let Some(type_ref) = arena.get_type_ref(node) {
        if !is_top && let Some(name) = arena.leftmost_identifier(type_ref.type_name) {
            names.push(name.to_string());
        }
        for argument in type_ref.type_arguments.iter().flat_map(|list| list.iter()) {
            collect_nested_references(arena, argument, false, names);
        }
    } else if let Some(array) = arena.get_array_type(node) {
        collect_nested_references(arena, array.element_type, false, names);
    } else if let Some(composite) = arena.get_composite_type(node) {
        for member in composite.types.iter() {
            collect_nested_references(arena, member, false, names);
        }
    } else if let Some(wrapped) = arena.get_wrapped_type(node) {
        // `typeof x` names a value, not a type.
        if node.kind != syntax_kind_ext::TYPE_QUERY {
            collect_nested_references(arena, wrapped.type_node, false, names);
        }
    } else if let Some(indexed) = arena.get_indexed_access_type(node) {
        collect_nested_references(arena, indexed.object_type, false, names);
        collect_nested_references(arena, indexed.index_type, false, names);
    } else if let Some(conditional) = arena.get_conditional_type(node) {
        for branch in [
            conditional.check_type,
            conditional.extends_type,
            conditional.true_type,
            conditional.false_type,
        ] {
            collect_nested_references(arena, branch, false, names);
        }
    } else if let Some(literal) = arena.get_type_literal(node) {
        for member in literal.members.iter() {
            if let Some(signature) = arena.get(member).and_then(|m| arena.get_property_decl(m)) {
                collect_nested_references(arena, signature.type_annotation, false, names);
            }
        }
    } else if let Some(function) = arena.get_function_type(node) {
        collect_nested_references(arena, function.return_type, false, names);
    }
}

#[cfg(test)]
#[path = "tests/properties_tests.rs"]
mod properties_tests;
