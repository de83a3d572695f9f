use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the dtoc binary.
#[derive(Parser, Debug)]
#[command(
    name = "dtoc",
    version,
    about = "Turn TypeScript DTO classes into plain structural type declarations"
)]
pub struct CliArgs {
    /// Glob patterns selecting the source files (e.g. 'src/**/*.dto.ts').
    pub patterns: Vec<String>,

    /// Directory the generated files are written to.
    #[arg(short = 'o', long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Name of the generated file inside the output directory.
    #[arg(short = 'f', long = "outFile", alias = "out-file")]
    pub out_file: Option<String>,

    /// Namespace wrapping every generated declaration.
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Path to a dtoc.json config file.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Do not write the unformatted `<name>.raw.ts` artifact.
    #[arg(long = "noRaw", alias = "no-raw")]
    pub no_raw: bool,

    /// Print the matched source files and then stop.
    #[arg(long = "printFiles", alias = "print-files")]
    pub print_files: bool,

    /// Disable colored error output.
    #[arg(long = "noColor", alias = "no-color")]
    pub no_color: bool,
}
