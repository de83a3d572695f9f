//! Declaration-level TypeScript parser for the dtoc generator.
//!
//! The parser understands the parts of a module that matter for turning
//! classes into structural types: imports, classes (heritage clauses,
//! decorators, members), enums, type aliases, interfaces and type
//! expressions. Every other statement is skipped as a balanced token run.

pub mod parser;
pub use parser::{NodeIndex, NodeList, ParserState};
