use super::*;

#[test]
fn test_normalize_path_folds_dot_segments() {
    assert_eq!(
        normalize_path(Path::new("src/dto/./../models/meta.ts")),
        PathBuf::from("src/models/meta.ts")
    );
    assert_eq!(normalize_path(Path::new("./a.ts")), PathBuf::from("a.ts"));
    assert_eq!(normalize_path(Path::new("../a.ts")), PathBuf::from("../a.ts"));
    assert_eq!(normalize_path(Path::new("/x/../a.ts")), PathBuf::from("/a.ts"));
}

#[test]
fn test_resolve_specifier_relative_to_importing_file() {
    let mut program = Program::new();
    let id = program.add_file("src/dto/user.dto.ts", String::new());
    assert_eq!(
        program.resolve_specifier(id, "./meta"),
        PathBuf::from("src/dto/meta.ts")
    );
    assert_eq!(
        program.resolve_specifier(id, "../enums/status"),
        PathBuf::from("src/enums/status.ts")
    );
}

#[test]
fn test_lookup_uses_normalized_paths() {
    let mut program = Program::new();
    let id = program.add_file("./src/a.ts", "export class A {}".to_string());
    assert_eq!(program.lookup(Path::new("src/a.ts")), Some(id));
    assert_eq!(program.lookup(Path::new("src/x/../a.ts")), Some(id));
    assert_eq!(program.lookup(Path::new("src/b.ts")), None);
}

#[test]
fn test_add_same_path_replaces_contents() {
    let mut program = Program::new();
    let first = program.add_file("a.ts", "class A {}".to_string());
    let second = program.add_file("./a.ts", "class B {}".to_string());
    assert_eq!(first, second);
    assert_eq!(program.len(), 1);
    assert_eq!(program.file(first).source_text(), "class B {}");
}

#[test]
fn test_parsed_file_helpers() {
    let mut program = Program::new();
    let id = program.add_file("src/models/meta.ts", "type Meta = {};\nenum E { A }".to_string());
    let file = program.file(id);
    assert_eq!(file.statements().len(), 2);
    assert_eq!(file.base_name(), "meta.ts");
    assert_eq!(file.directory(), Path::new("src/models"));
    assert!(file.diagnostics.is_empty());
}

#[test]
fn test_is_path_specifier() {
    assert!(is_path_specifier("./meta"));
    assert!(is_path_specifier("../meta"));
    assert!(!is_path_specifier("@nestjs/swagger"));
    assert!(!is_path_specifier("dayjs"));
}
