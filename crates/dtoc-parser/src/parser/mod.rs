//! Parser module: arena-backed AST and recursive-descent parser state.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::{ModifierFlags, Node, NodeArena};

mod node_access;
mod node_arena;

pub mod syntax_kind_ext;

pub mod state;
pub use state::ParserState;

mod state_class_members;
mod state_statements;
mod state_types;
