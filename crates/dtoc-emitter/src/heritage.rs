//! Extends-Clause Resolver.
//!
//! Turns the expressions of a class's `extends` clause into an ordered list
//! of type terms. Plain names are used as-is; `PartialType(X)` calls become
//! `Partial<X>`. Anything else is kept as `Unrecognized` so callers can log
//! it, and contributes nothing to the emitted type.

use dtoc_parser::NodeIndex;
use dtoc_parser::parser::node::{ClassData, NodeArena};
use dtoc_parser::parser::syntax_kind_ext;
use dtoc_scanner::SyntaxKind;
use smallvec::SmallVec;
use tracing::debug;

/// Callee name (compared case-insensitively) whose arguments become
/// `Partial<...>` terms.
const PARTIAL_TYPE_CALLEE: &str = "PartialType";

/// One term of an `extends` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtendTerm {
    /// `extends Base`
    Plain(String),
    /// `extends PartialType(Base)`
    PartialWrapped(String),
    /// Any other expression, kept verbatim and dropped at assembly.
    Unrecognized(String),
}

impl ExtendTerm {
    /// The `&`-joinable type text, or `None` for unrecognized terms.
    pub fn to_type_term(&self) -> Option<String> {
        match self {
            ExtendTerm::Plain(name) => Some(name.clone()),
            ExtendTerm::PartialWrapped(name) => Some(format!("Partial<{name}>")),
            ExtendTerm::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ExtendTerm::Unrecognized(_))
    }
}

pub type ExtendTerms = SmallVec<[ExtendTerm; 2]>;

/// Terms of the class's `extends` clause in source order. `implements`
/// clauses are ignored.
pub fn resolve_extends(arena: &NodeArena, class: &ClassData) -> ExtendTerms {
    let mut terms = ExtendTerms::new();
    let clauses = class.heritage_clauses.iter().flat_map(|list| list.iter());
    for clause_index in clauses {
        let Some(clause) = arena
            .get(clause_index)
            .and_then(|node| arena.get_heritage_clause(node))
        else {
            continue;
        };
        if clause.token != SyntaxKind::ExtendsKeyword {
            continue;
        }
        for expression in clause.types.iter() {
            push_terms(arena, expression, &mut terms);
        }
    }
    terms
}

fn push_terms(arena: &NodeArena, expression: NodeIndex, terms: &mut ExtendTerms) {
    let Some(node) = arena.get(expression) else {
        return;
    };

    if node.kind == SyntaxKind::Identifier as u16 {
        if let Some(name) = arena.name_text(expression) {
            terms.push(ExtendTerm::Plain(name.to_string()));
        }
        return;
    }

    if let Some(call) = arena.get_call_expr(node) {
        let callee = arena.get(call.expression);
        let is_partial_type = callee.is_some_and(|c| c.kind == SyntaxKind::Identifier as u16)
            && arena
                .name_text(call.expression)
                .is_some_and(|name| name.eq_ignore_ascii_case(PARTIAL_TYPE_CALLEE));
        if is_partial_type {
            for argument in call.arguments.iter() {
                terms.push(match argument_name(arena, argument) {
                    Some(name) => ExtendTerm::PartialWrapped(name),
                    None => unrecognized(arena, argument),
                });
            }
            return;
        }
    }

    terms.push(unrecognized(arena, expression));
}

/// `Base` or `models.Base`.
fn argument_name(arena: &NodeArena, argument: NodeIndex) -> Option<String> {
    let node = arena.get(argument)?;
    if node.kind == SyntaxKind::Identifier as u16
        || node.kind == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
    {
        arena.entity_name_text(argument)
    } else {
        None
    }
}

fn unrecognized(arena: &NodeArena, index: NodeIndex) -> ExtendTerm {
    let text = arena.node_text(index).trim().to_string();
    debug!(%text, "unrecognized extends expression");
    ExtendTerm::Unrecognized(text)
}

#[cfg(test)]
#[path = "tests/heritage_tests.rs"]
mod heritage_tests;
