//! Global Accumulator: enum and type alias declarations placed at the front
//! of the namespace, ahead of every generated type.

use crate::program::FileId;
use crate::symbol_locator::{LocatedSymbol, SymbolKind};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Append-only, ordered buffer of declaration texts. A declaration is kept
/// once per `(kind, name, originating file)`.
#[derive(Debug, Default)]
pub struct GlobalAccumulator {
    text: String,
    seen: FxHashSet<(SymbolKind, String, FileId)>,
}

impl GlobalAccumulator {
    pub fn new() -> GlobalAccumulator {
        GlobalAccumulator::default()
    }

    /// Append `symbol`'s text unless the same declaration is already present.
    /// Returns whether anything was appended.
    pub fn append(&mut self, symbol: LocatedSymbol) -> bool {
        let LocatedSymbol {
            kind,
            name,
            origin,
            text,
        } = symbol;
        if self.contains(kind, &name, origin) {
            trace!(symbol = %name, ?kind, "already accumulated");
            return false;
        }
        trace!(symbol = %name, ?kind, bytes = text.len(), "accumulate");
        self.text.push_str(&text);
        self.text.push('\n');
        self.seen.insert((kind, name, origin));
        true
    }

    pub fn contains(&self, kind: SymbolKind, name: &str, origin: FileId) -> bool {
        self.seen.contains(&(kind, name.to_string(), origin))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of declarations accumulated.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/accumulator_tests.rs"]
mod accumulator_tests;
