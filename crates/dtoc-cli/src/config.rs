use dtoc_emitter::PrintOptions;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::args::CliArgs;

/// Config file looked up in the working directory when `--project` is not
/// given.
pub const CONFIG_FILE_NAME: &str = "dtoc.json";

/// Suffix of the unformatted artifact written next to the output file.
pub const RAW_SUFFIX: &str = "raw.ts";

/// Accepts `true` as well as `"true"` for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// Contents of `dtoc.json`. Every field is optional; command-line values
/// take precedence.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DtocConfig {
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub out_file: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub emit_raw: Option<bool>,
    #[serde(default)]
    pub format: Option<PrintOptions>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required option '{0}'")]
    Missing(&'static str),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Options of one run after merging the command line over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    /// Directory the include patterns are relative to.
    pub root: PathBuf,
    pub patterns: Vec<String>,
    pub out_dir: PathBuf,
    pub out_file: String,
    pub namespace: String,
    pub emit_raw: bool,
    pub format: PrintOptions,
}

impl ResolvedOptions {
    /// `<out_dir>/<out_file>`: the formatted, namespace-wrapped output.
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(&self.out_file)
    }

    /// `<out_dir>/<stem>.raw.ts`: the unformatted artifact.
    pub fn raw_output_path(&self) -> PathBuf {
        let stem = Path::new(&self.out_file)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.out_file.clone());
        self.out_dir.join(format!("{stem}.{RAW_SUFFIX}"))
    }
}

/// Parse config text. Comments and trailing commas are accepted.
pub fn parse_config(source: &str) -> Result<DtocConfig, serde_json::Error> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    serde_json::from_str(&normalized)
}

pub fn load_config(path: &Path) -> Result<DtocConfig, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The config file to use: `--project` (a file, or a directory holding
/// `dtoc.json`), else `dtoc.json` in `cwd` when present.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    match &args.project {
        Some(project) => {
            let project = cwd.join(project);
            if project.is_dir() {
                Some(project.join(CONFIG_FILE_NAME))
            } else {
                Some(project)
            }
        }
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Merge `args` over `config` and check that every required option is set.
///
/// Relative paths from the command line are resolved against `cwd`; those
/// from the config file against `config_dir`.
pub fn resolve_options(
    args: &CliArgs,
    config: Option<&DtocConfig>,
    config_dir: Option<&Path>,
    cwd: &Path,
) -> Result<ResolvedOptions, ConfigError> {
    let default_config = DtocConfig::default();
    let config = config.unwrap_or(&default_config);
    let config_dir = config_dir.unwrap_or(cwd);

    let (root, patterns) = if !args.patterns.is_empty() {
        (cwd.to_path_buf(), args.patterns.clone())
    } else {
        match &config.include {
            Some(include) if !include.is_empty() => (config_dir.to_path_buf(), include.clone()),
            _ => return Err(ConfigError::Missing("include")),
        }
    };

    let out_dir = match (&args.out_dir, &config.out_dir) {
        (Some(dir), _) => cwd.join(dir),
        (None, Some(dir)) => config_dir.join(dir),
        (None, None) => return Err(ConfigError::Missing("outDir")),
    };

    let out_file = args
        .out_file
        .clone()
        .or_else(|| config.out_file.clone())
        .filter(|name| !name.trim().is_empty())
        .ok_or(ConfigError::Missing("outFile"))?;
    if Path::new(&out_file).file_name().is_none() || out_file.ends_with(['/', '\\']) {
        return Err(ConfigError::Invalid {
            field: "outFile",
            reason: format!("'{out_file}' is not a file name"),
        });
    }

    let namespace = args
        .namespace
        .clone()
        .or_else(|| config.namespace.clone())
        .filter(|name| !name.trim().is_empty())
        .ok_or(ConfigError::Missing("namespace"))?;
    if !is_identifier(&namespace) {
        return Err(ConfigError::Invalid {
            field: "namespace",
            reason: format!("'{namespace}' is not a valid identifier"),
        });
    }

    let emit_raw = !args.no_raw && config.emit_raw.unwrap_or(true);
    let format = config.format.clone().unwrap_or_default();
    if format.tab_width == 0 {
        return Err(ConfigError::Invalid {
            field: "format.tabWidth",
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(ResolvedOptions {
        root,
        patterns,
        out_dir,
        out_file,
        namespace,
        emit_raw,
        format,
    })
}

/// Dotted names are allowed (`Api.Dto`), each part being an identifier.
fn is_identifier(name: &str) -> bool {
    name.split('.').all(|part| {
        let mut chars = part.chars();
        chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    })
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        let next = chars.peek().copied();
        match (ch, next) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars.clone().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(ch);
    }

    out
}
