//! Drives the per-file pipeline over a loaded `Program`.

use crate::accumulator::GlobalAccumulator;
use crate::assembler;
use crate::class_transformer::transform;
use crate::error::GenerateError;
use crate::program::{FileId, Program};
use crate::properties::EmitContext;
use crate::symbol_locator::SymbolLocator;
use indexmap::IndexMap;
use tracing::{debug, info, info_span, warn};

/// State of one generation run. Files are processed one at a time; after
/// each one `assemble` yields the cumulative output so far.
pub struct Generator<'p> {
    program: &'p Program,
    namespace: String,
    accumulator: GlobalAccumulator,
    /// Generated declaration per class name, in processing order.
    class_map: IndexMap<String, String>,
    /// Generated declarations of each processed file.
    fragments: Vec<String>,
}

impl<'p> Generator<'p> {
    pub fn new(program: &'p Program, namespace: impl Into<String>) -> Self {
        Generator {
            program,
            namespace: namespace.into(),
            accumulator: GlobalAccumulator::new(),
            class_map: IndexMap::new(),
            fragments: Vec::new(),
        }
    }

    /// Transform every class of `file`, in declaration order, and record the
    /// file's fragment. Stops at the first resolution error, in which case no
    /// fragment is recorded for the file.
    pub fn process_file(&mut self, file: FileId) -> Result<(), GenerateError> {
        let parsed = self.program.file(file);
        let _span = info_span!("process_file", path = %parsed.path.display()).entered();

        let mut classes = parsed.classes();
        info!(classes = classes.len(), "processing file");

        let mut ctx = EmitContext {
            locator: SymbolLocator::new(self.program),
            accumulator: &mut self.accumulator,
            file,
        };
        let mut fragment = String::new();
        for class in &mut classes {
            let declaration = transform(&mut ctx, class)?;
            if !fragment.is_empty() {
                fragment.push('\n');
            }
            fragment.push_str(&declaration);
            if self
                .class_map
                .insert(class.name.to_string(), declaration)
                .is_some()
            {
                warn!(class = class.name, "class name already generated, later declaration wins");
            }
        }

        debug!(bytes = fragment.len(), "file fragment");
        if !fragment.is_empty() {
            fragment.push('\n');
        }
        self.fragments.push(fragment);
        Ok(())
    }

    /// Process every file of the program in order.
    pub fn run(&mut self) -> Result<(), GenerateError> {
        let program = self.program;
        for file in program.files() {
            self.process_file(file.id)?;
        }
        Ok(())
    }

    /// The namespace-wrapped output of everything processed so far.
    pub fn assemble(&self) -> String {
        assembler::assemble(&self.namespace, self.accumulator.as_str(), &self.fragments)
    }

    /// The raw artifact: global block and fragments, without the namespace.
    pub fn raw_text(&self) -> String {
        assembler::raw_text(self.accumulator.as_str(), &self.fragments)
    }

    pub fn class_declarations(&self) -> &IndexMap<String, String> {
        &self.class_map
    }

    pub fn accumulator(&self) -> &GlobalAccumulator {
        &self.accumulator
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}
