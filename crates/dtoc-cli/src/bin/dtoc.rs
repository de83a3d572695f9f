#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use tracing::info;

use dtoc_cli::args::CliArgs;
use dtoc_cli::config::{self, ResolvedOptions};
use dtoc_cli::driver;
use dtoc_cli::reporter::Reporter;

fn main() {
    // No-op unless DTOC_LOG or RUST_LOG is set.
    dtoc_cli::tracing_config::init_tracing();

    let args = CliArgs::parse_from(std::env::args_os());
    if let Err(err) = run(&args) {
        let color = !args.no_color && std::io::stderr().is_terminal();
        eprintln!("{}", Reporter::new(color).format_error(&err));
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let options = resolve(args, &cwd)?;

    if args.print_files {
        for file in driver::source_files(&options)? {
            println!("{}", file.display());
        }
        return Ok(());
    }

    let summary = driver::run(&options)?;
    info!(
        files = summary.files.len(),
        classes = summary.classes,
        output = %summary.output.display(),
        "done"
    );
    Ok(())
}

fn resolve(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let config_path = config::find_config(args, cwd);
    let loaded = match &config_path {
        Some(path) => Some(config::load_config(path)?),
        None => None,
    };
    let config_dir = config_path.as_deref().and_then(Path::parent);
    Ok(config::resolve_options(
        args,
        loaded.as_ref(),
        config_dir,
        cwd,
    )?)
}
