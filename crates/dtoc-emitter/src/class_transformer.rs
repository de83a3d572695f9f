//! Class Transformer: one class declaration in, one `export type` out.

use crate::declarations::ClassDecl;
use crate::error::GenerateError;
use crate::heritage::{ExtendTerm, resolve_extends};
use crate::properties::{EmitContext, FieldLine, emit_properties};
use dtoc_common::comments::format_multi_line_comment;
use tracing::debug;

/// Body used for a class with no properties and nothing to extend.
pub const PERMISSIVE_RECORD: &str = "Record<string, any>";

/// Indentation of field lines inside the emitted type literal.
const FIELD_INDENT: &str = "  ";

/// Transform `class` into its structural type declaration.
///
/// Referenced enums and type aliases are appended to the context's
/// accumulator as a side effect; a resolution failure aborts the class.
pub fn transform(
    ctx: &mut EmitContext<'_, '_>,
    class: &mut ClassDecl<'_>,
) -> Result<String, GenerateError> {
    let arena = &ctx.locator.program().file(ctx.file).arena;
    let terms = resolve_extends(arena, class.data());
    let fields = emit_properties(ctx, class)?;
    debug!(
        class = class.name,
        terms = terms.len(),
        fields = fields.len(),
        "transformed class"
    );
    Ok(render_declaration(
        class.name,
        class.type_parameters.as_deref(),
        class.jsdoc,
        &terms,
        &fields,
    ))
}

/// Text of `export type Name<T> = ...;`, with the class JSDoc above it.
///
/// Recognized extends terms are joined with ` & `; own fields follow as one
/// more `& { ... }` term. With neither, the body is the permissive record.
pub fn render_declaration(
    name: &str,
    type_parameters: Option<&str>,
    jsdoc: Option<&str>,
    terms: &[ExtendTerm],
    fields: &[FieldLine],
) -> String {
    let mut out = String::new();
    if let Some(jsdoc) = jsdoc {
        out.push_str(&format_multi_line_comment(jsdoc, ""));
        out.push('\n');
    }
    out.push_str("export type ");
    out.push_str(name);
    out.push_str(type_parameters.unwrap_or_default());
    out.push_str(" = ");

    let mut parts: Vec<String> = terms.iter().filter_map(ExtendTerm::to_type_term).collect();
    if !fields.is_empty() {
        let mut body = String::from("{\n");
        for field in fields {
            body.push_str(&field.render(FIELD_INDENT));
            body.push('\n');
        }
        body.push('}');
        parts.push(body);
    }

    if parts.is_empty() {
        out.push_str(PERMISSIVE_RECORD);
    } else {
        out.push_str(&parts.join(" & "));
    }
    out.push_str(";\n");
    out
}

#[cfg(test)]
#[path = "tests/class_transformer_tests.rs"]
mod class_transformer_tests;
