//! Symbol Locator: find the declaration text of an enum or type alias,
//! in the current file or one import hop away.
//!
//! The locator is a pure lookup over the `Program`. Appending the text it
//! returns to the accumulator is the caller's job.

use crate::declarations::DeclarationKind;
use crate::error::GenerateError;
use crate::program::{FileId, Program, is_path_specifier};
use tracing::{debug, trace};

/// What kind of declaration is being looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Enum,
    TypeAlias,
}

impl SymbolKind {
    fn declaration_kind(self) -> DeclarationKind {
        match self {
            SymbolKind::Enum => DeclarationKind::Enum,
            SymbolKind::TypeAlias => DeclarationKind::TypeAlias,
        }
    }
}

/// A declaration found by the locator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedSymbol {
    pub kind: SymbolKind,
    /// Name of the declaration in its own file
    pub name: String,
    /// File that declares it
    pub origin: FileId,
    /// Text to emit: `export`-prefixed declaration, preceded by a
    /// `// from <file>` line when found through an import
    pub text: String,
}

/// Where a name used in a file comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolOrigin {
    /// Declared in the file itself
    Local,
    /// Bound by a named import
    Imported { specifier: String, exported: String },
    /// Bound by a default or namespace import
    ModuleObject,
    /// Not declared and not imported
    Unbound,
}

pub struct SymbolLocator<'p> {
    program: &'p Program,
}

impl<'p> SymbolLocator<'p> {
    pub fn new(program: &'p Program) -> Self {
        SymbolLocator { program }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Find the declaration of `kind` named `symbol` as seen from `file`.
    ///
    /// - Declared locally: its text.
    /// - Not imported by name: `MissingImport`.
    /// - Imported from a file that is not loaded: `MissingFile`.
    /// - Imported, but the target declares no such `kind`: `Ok(None)`.
    pub fn locate(
        &self,
        file: FileId,
        symbol: &str,
        kind: SymbolKind,
    ) -> Result<Option<LocatedSymbol>, GenerateError> {
        let current = self.program.file(file);
        if let Some(index) = current.find_declaration(kind.declaration_kind(), symbol) {
            trace!(symbol, ?kind, "found locally");
            return Ok(Some(LocatedSymbol {
                kind,
                name: symbol.to_string(),
                origin: file,
                text: current.exported_declaration_text(index),
            }));
        }

        let imports = current.imports();
        let Some((specifier, exported)) = imports.iter().find_map(|import| {
            import
                .exported_name_of(symbol)
                .map(|exported| (import.specifier, exported))
        }) else {
            return Err(GenerateError::MissingImport {
                symbol: symbol.to_string(),
                file: current.path.clone(),
            });
        };

        let target_path = self.program.resolve_specifier(file, specifier);
        let Some(target_id) = self.program.lookup(&target_path) else {
            return Err(GenerateError::MissingFile {
                symbol: symbol.to_string(),
                specifier: specifier.to_string(),
                file: current.path.clone(),
                target: target_path,
            });
        };

        let target = self.program.file(target_id);
        let Some(index) = target.find_declaration(kind.declaration_kind(), exported) else {
            debug!(
                symbol,
                ?kind,
                target = %target.path.display(),
                "imported file has no such declaration, nothing to emit"
            );
            return Ok(None);
        };

        debug!(symbol, ?kind, from = %target.base_name(), "resolved through import");
        Ok(Some(LocatedSymbol {
            kind,
            name: exported.to_string(),
            origin: target_id,
            text: format!(
                "// from {}\n{}",
                target.base_name(),
                target.exported_declaration_text(index)
            ),
        }))
    }

    /// Kind of the enum or type alias `symbol` refers to in `file`, if it
    /// can be found locally or through one named import of a loaded file.
    pub fn resolve_kind(&self, file: FileId, symbol: &str) -> Option<SymbolKind> {
        let current = self.program.file(file);
        if let Some(kind) = declared_kind(self.program, file, symbol) {
            return Some(kind);
        }
        let imports = current.imports();
        let (specifier, exported) = imports.iter().find_map(|import| {
            import
                .exported_name_of(symbol)
                .map(|exported| (import.specifier, exported))
        })?;
        let target = self
            .program
            .lookup(&self.program.resolve_specifier(file, specifier))?;
        declared_kind(self.program, target, exported)
    }

    /// How `symbol` is bound in `file`.
    pub fn origin_of(&self, file: FileId, symbol: &str) -> SymbolOrigin {
        let current = self.program.file(file);
        let declared_locally = [
            DeclarationKind::Enum,
            DeclarationKind::TypeAlias,
            DeclarationKind::Class,
            DeclarationKind::Interface,
            DeclarationKind::Namespace,
        ]
        .into_iter()
        .any(|kind| current.find_declaration(kind, symbol).is_some());
        if declared_locally {
            return SymbolOrigin::Local;
        }

        for import in current.imports() {
            if let Some(exported) = import.exported_name_of(symbol) {
                return SymbolOrigin::Imported {
                    specifier: import.specifier.to_string(),
                    exported: exported.to_string(),
                };
            }
            if import.binds_module_object(symbol) {
                return SymbolOrigin::ModuleObject;
            }
        }
        SymbolOrigin::Unbound
    }

    /// Is `symbol` imported from a package rather than a relative path?
    pub fn is_package_import(&self, file: FileId, symbol: &str) -> bool {
        matches!(
            self.origin_of(file, symbol),
            SymbolOrigin::Imported { specifier, .. } if !is_path_specifier(&specifier)
        )
    }
}

fn declared_kind(program: &Program, file: FileId, symbol: &str) -> Option<SymbolKind> {
    let parsed = program.file(file);
    if parsed
        .find_declaration(DeclarationKind::Enum, symbol)
        .is_some()
    {
        Some(SymbolKind::Enum)
    } else if parsed
        .find_declaration(DeclarationKind::TypeAlias, symbol)
        .is_some()
    {
        Some(SymbolKind::TypeAlias)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/symbol_locator_tests.rs"]
mod symbol_locator_tests;
