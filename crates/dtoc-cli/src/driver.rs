use anyhow::{Context, Result};
use dtoc_emitter::{Generator, Program, format_output};
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};

use crate::config::ResolvedOptions;
use crate::fs::discover_sources;
use crate::reporter::Reporter;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: Vec<PathBuf>,
    pub classes: usize,
    pub output: PathBuf,
    pub raw_output: Option<PathBuf>,
}

/// Source files selected by the options, in processing order.
pub fn source_files(options: &ResolvedOptions) -> Result<Vec<PathBuf>> {
    discover_sources(&options.root, &options.patterns)
}

/// Generate the output for every selected source file.
///
/// Files are processed in sorted path order. The output files are rewritten
/// after each one, so a failure leaves the output of the files before it.
pub fn run(options: &ResolvedOptions) -> Result<RunSummary> {
    let _span = info_span!("run", namespace = %options.namespace).entered();

    let files = source_files(options)?;
    if files.is_empty() {
        warn!(patterns = ?options.patterns, "no source files matched");
    }
    let program = load_program(&files)?;

    std::fs::create_dir_all(&options.out_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.out_dir.display()
        )
    })?;

    let mut generator = Generator::new(&program, options.namespace.clone());
    write_outputs(&generator, options)?;
    for file in program.files() {
        info!(path = %file.path.display(), "generating");
        generator
            .process_file(file.id)
            .with_context(|| format!("failed to generate types for {}", file.path.display()))?;
        write_outputs(&generator, options)?;
    }

    Ok(RunSummary {
        files,
        classes: generator.class_declarations().len(),
        output: options.output_path(),
        raw_output: options.emit_raw.then(|| options.raw_output_path()),
    })
}

/// Read and parse `files`. Parse diagnostics are logged, not fatal.
pub fn load_program(files: &[PathBuf]) -> Result<Program> {
    let reporter = Reporter::new(false);
    let mut program = Program::new();
    for path in files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let id = program.add_file(path, source);
        let parsed = program.file(id);
        for diagnostic in &parsed.diagnostics {
            warn!(
                "{}",
                reporter.format_diagnostic(diagnostic, parsed.source_text())
            );
        }
    }
    Ok(program)
}

fn write_outputs(generator: &Generator<'_>, options: &ResolvedOptions) -> Result<()> {
    let formatted = format_output(&generator.assemble(), &options.format);
    write_file(&options.output_path(), &formatted)?;
    if options.emit_raw {
        write_file(&options.raw_output_path(), &generator.raw_text())?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
