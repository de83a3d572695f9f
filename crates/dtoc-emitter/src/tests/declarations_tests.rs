use super::*;
use crate::program::Program;

fn program_with(source: &str) -> Program {
    let mut program = Program::new();
    program.add_file("src/test.ts", source.to_string());
    program
}

#[test]
fn test_class_views_skip_static_and_private_members() {
    let program = program_with(
        r#"
/** Page of results. */
export class Page<T, K extends keyof T = keyof T> {
  static readonly PAGE_SIZE = 20;
  #cursor = 0;
  items: T[];
  /** Total count. */
  total?: number;
  constructor() {}
  next(): void {}
}
"#,
    );
    let file = program.file(crate::FileId(0));
    let classes = file.classes();
    assert_eq!(classes.len(), 1);
    let page = &classes[0];

    assert_eq!(page.name, "Page");
    assert_eq!(page.jsdoc, Some("/** Page of results. */"));
    assert_eq!(page.type_parameters.as_deref(), Some("<T, K extends keyof T = keyof T>"));
    assert!(page.has_type_parameter("K"));
    assert!(!page.has_type_parameter("Page"));

    let names: Vec<&str> = page.properties.iter().map(|p| p.name).collect();
    assert_eq!(names, ["items", "total"]);
    assert_eq!(page.properties[0].type_text, "T[]");
    assert!(page.properties[1].optional);
    assert_eq!(page.properties[1].jsdoc, Some("/** Total count. */"));
}

#[test]
fn test_type_inferred_from_initializer() {
    let program = program_with(
        "class Defaults {\n  a = 'x';\n  b = 1;\n  c = true;\n  d = -5;\n  e = [];\n  f;\n}",
    );
    let file = program.file(crate::FileId(0));
    let classes = file.classes();
    let types: Vec<&str> = classes[0]
        .properties
        .iter()
        .map(|p| p.type_text.as_str())
        .collect();
    assert_eq!(types, ["string", "number", "boolean", "number", "unknown", "unknown"]);
}

#[test]
fn test_imports_view_honours_aliases() {
    let program = program_with(
        "import { Meta, Status as State } from './meta';\nimport * as models from './models';\nimport Def from './def';",
    );
    let file = program.file(crate::FileId(0));
    let imports = file.imports();
    assert_eq!(imports.len(), 3);
    assert_eq!(imports[0].specifier, "./meta");
    assert_eq!(imports[0].exported_name_of("Meta"), Some("Meta"));
    assert_eq!(imports[0].exported_name_of("State"), Some("Status"));
    assert_eq!(imports[0].exported_name_of("Status"), None);
    assert!(imports[1].binds_module_object("models"));
    assert!(imports[2].binds_module_object("Def"));
}

#[test]
fn test_find_declaration_and_export_prefix() {
    let program = program_with(
        "enum Status { A = 'a' }\nexport type Meta = { key: string };\ninterface Shape {}\nclass Box {}",
    );
    let file = program.file(crate::FileId(0));

    let status = file
        .find_declaration(DeclarationKind::Enum, "Status")
        .expect("enum Status");
    assert_eq!(
        file.exported_declaration_text(status),
        "export enum Status { A = 'a' }"
    );

    let meta = file
        .find_declaration(DeclarationKind::TypeAlias, "Meta")
        .expect("alias Meta");
    assert_eq!(
        file.exported_declaration_text(meta),
        "export type Meta = { key: string };"
    );

    assert!(file.find_declaration(DeclarationKind::Enum, "Meta").is_none());
    assert!(file.declares_local_scope_name("Shape"));
    assert!(file.declares_local_scope_name("Box"));
    assert!(!file.declares_local_scope_name("Status"));
}

#[test]
fn test_namespace_names_are_local_scopes() {
    let program = program_with(
        "export namespace Shapes { export type Circle = { r: number }; }\ndeclare module 'legacy' {}",
    );
    let file = program.file(crate::FileId(0));
    assert!(file.find_declaration(DeclarationKind::Namespace, "Shapes").is_some());
    assert!(file.declares_local_scope_name("Shapes"));
    assert!(!file.declares_local_scope_name("legacy"));
}
