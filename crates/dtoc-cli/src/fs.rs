//! Source file discovery from glob patterns.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories never searched for sources.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Files under `root` matching any of `patterns`, sorted and without
/// duplicates. Patterns are relative to `root` unless absolute; `*` does not
/// cross directory separators, `**` does.
pub fn discover_sources(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let patterns: Vec<String> = patterns.iter().map(|p| normalize_pattern(p)).collect();
    let matcher = build_matcher(&patterns)?;

    let mut bases: BTreeSet<PathBuf> = BTreeSet::new();
    for pattern in &patterns {
        bases.insert(root.join(literal_base(pattern)));
    }

    let mut found = BTreeSet::new();
    for base in &bases {
        if !base.exists() {
            debug!(base = %base.display(), "pattern base does not exist");
            continue;
        }
        for entry in WalkDir::new(base)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if matcher.is_match(relative) || matcher.is_match(path) {
                found.insert(path.to_path_buf());
            }
        }
    }

    debug!(count = found.len(), "discovered sources");
    Ok(found.into_iter().collect())
}

fn build_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build glob set")
}

/// Forward slashes, no leading `./`.
fn normalize_pattern(pattern: &str) -> String {
    let pattern = pattern.trim().replace('\\', "/");
    let mut rest = pattern.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_string()
}

/// Leading path components of `pattern` that contain no glob syntax.
fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    let components: Vec<&str> = pattern.split('/').collect();
    for (index, component) in components.iter().enumerate() {
        let is_last = index + 1 == components.len();
        if component.contains(['*', '?', '[', '{']) {
            break;
        }
        if is_last {
            // A literal file name: walk its directory.
            break;
        }
        if component.is_empty() && index == 0 {
            base.push("/");
        } else {
            base.push(component);
        }
    }
    base
}

fn is_skipped_dir(path: &Path) -> bool {
    matches!(
        path.components().next_back(),
        Some(Component::Normal(name)) if SKIPPED_DIRECTORIES.iter().any(|s| name == *s)
    ) && path.is_dir()
}
