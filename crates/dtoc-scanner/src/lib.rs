//! TypeScript scanner/tokenizer for the dtoc generator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Character classification utilities

pub mod char_codes;

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod scanner;
pub use scanner::{ScannerSnapshot, ScannerState};
