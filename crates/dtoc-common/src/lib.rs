//! Common types and utilities for the dtoc generator.
//!
//! This crate provides foundational types used across all dtoc crates:
//! - Diagnostics reported by the parser (`Diagnostic`, `DiagnosticCategory`)
//! - Comment ranges and JSDoc helpers
//! - Line/column mapping for byte offsets

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Comment ranges collected as scanner trivia
pub mod comments;
pub use comments::CommentRange;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};
