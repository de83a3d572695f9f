//! Errors raised while generating structural types.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal resolution failure. Generation stops at the first one.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The symbol is neither declared in the file nor named by any import.
    #[error("cannot resolve '{symbol}' in {}: it is not declared in this file and no import names it", .file.display())]
    MissingImport { symbol: String, file: PathBuf },

    /// The import naming the symbol points at a file that was not loaded.
    #[error(
        "cannot resolve '{symbol}' in {}: import '{specifier}' refers to {}, which is not part of the input",
        .file.display(),
        .target.display()
    )]
    MissingFile {
        symbol: String,
        specifier: String,
        file: PathBuf,
        target: PathBuf,
    },
}

impl GenerateError {
    /// The symbol that could not be resolved.
    pub fn symbol(&self) -> &str {
        match self {
            GenerateError::MissingImport { symbol, .. } | GenerateError::MissingFile { symbol, .. } => {
                symbol
            }
        }
    }
}
