use super::fs::discover_sources;
use std::path::{Path, PathBuf};

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

fn relative(root: &Path, found: Vec<PathBuf>) -> Vec<String> {
    found
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn discovers_matching_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(root, "src/users/user.dto.ts", "");
    write_file(root, "src/orders/order.dto.ts", "");
    write_file(root, "src/orders/order.service.ts", "");
    write_file(root, "src/a.dto.ts", "");

    let found = discover_sources(root, &["src/**/*.dto.ts".to_string()]).unwrap();
    assert_eq!(
        relative(root, found),
        ["src/a.dto.ts", "src/orders/order.dto.ts", "src/users/user.dto.ts"]
    );
}

#[test]
fn single_star_does_not_cross_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(root, "src/a.ts", "");
    write_file(root, "src/nested/b.ts", "");

    let found = discover_sources(root, &["src/*.ts".to_string()]).unwrap();
    assert_eq!(relative(root, found), ["src/a.ts"]);
}

#[test]
fn overlapping_patterns_are_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(root, "dto/a.ts", "");
    write_file(root, "dto/b.ts", "");

    let patterns = [
        "dto/*.ts".to_string(),
        "./dto/a.ts".to_string(),
        "**/b.ts".to_string(),
    ];
    let found = discover_sources(root, &patterns).unwrap();
    assert_eq!(relative(root, found), ["dto/a.ts", "dto/b.ts"]);
}

#[test]
fn node_modules_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(root, "node_modules/pkg/index.ts", "");
    write_file(root, "src/a.ts", "");

    let found = discover_sources(root, &["**/*.ts".to_string()]).unwrap();
    assert_eq!(relative(root, found), ["src/a.ts"]);
}

#[test]
fn missing_base_directory_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let found = discover_sources(dir.path(), &["nope/**/*.ts".to_string()]).unwrap();
    assert!(found.is_empty());
}

#[test]
fn invalid_pattern_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = discover_sources(dir.path(), &["src/[".to_string()]).unwrap_err();
    assert!(error.to_string().contains("invalid glob pattern"), "{error}");
}
