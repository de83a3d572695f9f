//! Class-to-structural-type generation for dtoc.
//!
//! Pipeline per source file, in declaration order:
//! - `class_transformer` turns each class into an `export type` declaration,
//!   using `heritage` for the `extends` clause and `properties` for fields.
//! - `properties` asks the `symbol_locator` for enum and type alias
//!   declarations referenced by property types; the results are collected in
//!   the run's `GlobalAccumulator`.
//! - `assembler` wraps the accumulated declarations and every per-file
//!   fragment in one namespace block; `printer` formats the result.
//!
//! `Generator` drives the pipeline over a loaded `Program`.

pub mod error;
pub use error::GenerateError;

pub mod program;
pub use program::{FileId, ParsedFile, Program};

pub mod declarations;
pub use declarations::{ClassDecl, ImportRef, PropertyDecl};

pub mod symbol_locator;
pub use symbol_locator::{LocatedSymbol, SymbolKind, SymbolLocator};

pub mod heritage;
pub use heritage::{ExtendTerm, ExtendTerms};

pub mod properties;
pub use properties::{FieldLine, TypeReferenceKind};

pub mod class_transformer;

pub mod accumulator;
pub use accumulator::GlobalAccumulator;

pub mod assembler;

pub mod printer;
pub use printer::{PrintOptions, format_output};

pub mod generator;
pub use generator::Generator;
