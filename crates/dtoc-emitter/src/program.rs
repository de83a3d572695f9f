//! The set of parsed input files.
//!
//! Files are parsed once when added and looked up by their lexically
//! normalized path, which is how import specifiers are resolved.

use dtoc_common::Diagnostic;
use dtoc_parser::parser::node::NodeArena;
use dtoc_parser::{NodeIndex, ParserState};
use rustc_hash::FxHashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Extension appended to relative import specifiers.
pub const SOURCE_EXTENSION: &str = "ts";

/// Index of a file in its `Program`, in the order files were added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// One parsed source file.
pub struct ParsedFile {
    pub id: FileId,
    pub path: PathBuf,
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedFile {
    pub fn parse(id: FileId, path: PathBuf, source_text: String) -> ParsedFile {
        let file_name = path.display().to_string();
        let mut parser = ParserState::new(file_name, source_text);
        let root = parser.parse_source_file();
        let (arena, diagnostics) = parser.into_parts();
        ParsedFile {
            id,
            path,
            arena,
            root,
            diagnostics,
        }
    }

    /// Top-level statements in source order.
    pub fn statements(&self) -> &[NodeIndex] {
        self.arena
            .get(self.root)
            .and_then(|node| self.arena.get_source_file(node))
            .map(|sf| sf.statements.nodes.as_slice())
            .unwrap_or_default()
    }

    pub fn source_text(&self) -> &str {
        self.arena.source_text()
    }

    /// Directory containing the file, used to resolve relative imports.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// File name without directories, as shown in `// from` annotations.
    pub fn base_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// All input files of a run.
#[derive(Default)]
pub struct Program {
    files: Vec<ParsedFile>,
    by_path: FxHashMap<PathBuf, FileId>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Parse `source_text` and add it under `path`. Adding the same path
    /// twice replaces the earlier contents.
    pub fn add_file(&mut self, path: impl AsRef<Path>, source_text: String) -> FileId {
        let path = normalize_path(path.as_ref());
        if let Some(&existing) = self.by_path.get(&path) {
            warn!(path = %path.display(), "file added twice, replacing");
            self.files[existing.0 as usize] = ParsedFile::parse(existing, path, source_text);
            return existing;
        }

        let id = FileId(self.files.len() as u32);
        let file = ParsedFile::parse(id, path.clone(), source_text);
        if !file.diagnostics.is_empty() {
            debug!(
                path = %path.display(),
                count = file.diagnostics.len(),
                "parse diagnostics"
            );
        }
        self.files.push(file);
        self.by_path.insert(path, id);
        id
    }

    pub fn file(&self, id: FileId) -> &ParsedFile {
        &self.files[id.0 as usize]
    }

    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn lookup(&self, path: &Path) -> Option<FileId> {
        self.by_path.get(&normalize_path(path)).copied()
    }

    /// Path a relative import specifier refers to: the specifier joined to
    /// the importing file's directory, with `.ts` appended.
    pub fn resolve_specifier(&self, from: FileId, specifier: &str) -> PathBuf {
        let directory = self.file(from).directory();
        let mut target = directory.join(specifier).into_os_string();
        target.push(".");
        target.push(SOURCE_EXTENSION);
        normalize_path(Path::new(&target))
    }
}

/// Is this a relative (`./x`, `../x`) or absolute specifier, as opposed to
/// a package import?
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
        || specifier.starts_with('/')
}

/// Remove `.` components and fold `..` into the preceding component without
/// touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "tests/program_tests.rs"]
mod program_tests;
