use super::*;
use crate::program::Program;

struct Emitted {
    result: Result<Vec<FieldLine>, GenerateError>,
    references: Vec<TypeReferenceKind>,
    global: String,
}

/// Emit the first class of the first file.
fn emit(files: &[(&str, &str)]) -> Emitted {
    let mut program = Program::new();
    for (path, source) in files {
        program.add_file(path, source.to_string());
    }
    let file = program.file(FileId(0));
    let mut classes = file.classes();
    let class = classes.first_mut().expect("a class");
    let mut accumulator = GlobalAccumulator::new();
    let mut ctx = EmitContext {
        locator: SymbolLocator::new(&program),
        accumulator: &mut accumulator,
        file: FileId(0),
    };
    let result = emit_properties(&mut ctx, class);
    let references = class.properties.iter().map(|p| p.reference).collect();
    Emitted {
        result,
        references,
        global: accumulator.as_str().to_string(),
    }
}

#[test]
fn test_field_lines_in_declaration_order() {
    let emitted = emit(&[(
        "a.ts",
        "class A {\n  /** Identifier. */\n  id: string;\n  name?: string;\n  tags: string[];\n}",
    )]);
    let lines = emitted.result.unwrap();
    let rendered: Vec<String> = lines.iter().map(|l| l.render("  ")).collect();
    assert_eq!(
        rendered,
        [
            "  /** Identifier. */\n  id: string;",
            "  name?: string;",
            "  tags: string[];",
        ]
    );
    assert!(emitted.global.is_empty());
}

#[test]
fn test_multi_line_jsdoc_is_reindented() {
    let line = FieldLine {
        jsdoc: Some("/**\n     * Total.\n     */".to_string()),
        name: "total".to_string(),
        optional: false,
        type_text: "number".to_string(),
    };
    assert_eq!(line.render("  "), "  /**\n   * Total.\n   */\n  total: number;");
}

#[test]
fn test_same_file_enum_is_accumulated() {
    let emitted = emit(&[(
        "a.ts",
        "class Foo { status: Status; other?: Status }\nenum Status { On = 'on', Off = 'off' }",
    )]);
    assert!(emitted.result.is_ok());
    assert_eq!(
        emitted.references,
        [TypeReferenceKind::Enum, TypeReferenceKind::Enum]
    );
    assert_eq!(
        emitted.global,
        "export enum Status { On = 'on', Off = 'off' }\n"
    );
}

#[test]
fn test_imported_alias_is_accumulated_with_origin() {
    let emitted = emit(&[
        ("dto/bar.ts", "import { Meta } from './meta';\nclass Bar { meta: Meta }"),
        ("dto/meta.ts", "export type Meta = { key: string };"),
    ]);
    assert!(emitted.result.is_ok());
    assert_eq!(emitted.references, [TypeReferenceKind::TypeAlias]);
    assert_eq!(
        emitted.global,
        "// from meta.ts\nexport type Meta = { key: string };\n"
    );
}

#[test]
fn test_unknown_reference_is_missing_import() {
    let emitted = emit(&[("bar.ts", "class Bar { meta: Meta }")]);
    match emitted.result {
        Err(GenerateError::MissingImport { symbol, .. }) => assert_eq!(symbol, "Meta"),
        other => panic!("expected MissingImport, got {other:?}"),
    }
}

#[test]
fn test_references_that_need_no_declaration() {
    let emitted = emit(&[(
        "a.ts",
        "import { Type } from '@nestjs/common';\nimport * as models from './models';\n\
         class Page<T> { item: T; created: Date; map: Record<string, T>; other: Other; t: Type; m: models.User }\n\
         class Other {}",
    )]);
    assert!(emitted.result.is_ok(), "{:?}", emitted.result);
    assert!(
        emitted
            .references
            .iter()
            .all(|r| *r == TypeReferenceKind::None),
        "{:?}",
        emitted.references
    );
    assert!(emitted.global.is_empty());
}

#[test]
fn test_nested_references_are_resolved_leniently() {
    let emitted = emit(&[(
        "a.ts",
        "class A { list: Status[]; maybe: Kind | null; map: Record<string, Status>; unknown: Foo[] }\n\
         enum Status { A }\ntype Kind = 'x' | 'y';",
    )]);
    assert!(emitted.result.is_ok(), "{:?}", emitted.result);
    assert_eq!(
        emitted.global,
        "export enum Status { A }\nexport type Kind = 'x' | 'y';\n"
    );
    assert_eq!(emitted.references[2], TypeReferenceKind::None);
}

#[test]
fn test_dotted_enum_member_reference() {
    let emitted = emit(&[(
        "a.ts",
        "class A { on: Status.On }\nexport enum Status { On = 'on' }",
    )]);
    assert!(emitted.result.is_ok());
    assert_eq!(emitted.references, [TypeReferenceKind::Enum]);
    assert_eq!(emitted.global, "export enum Status { On = 'on' }\n");
}

#[test]
fn test_inferred_types_pass_through() {
    let emitted = emit(&[("a.ts", "class A { count = 0; label = 'x' }")]);
    let lines = emitted.result.unwrap();
    assert_eq!(lines[0].type_text, "number");
    assert_eq!(lines[1].type_text, "string");
}

#[test]
fn test_standard_library_types_need_no_declaration() {
    let emitted = emit(&[(
        "a.ts",
        "class Links {\n  home: URL;\n  pixels: Uint8ClampedArray;\n  big: BigInt64Array;\n  key: PropertyKey;\n  \
         cursor: Iterator<string>;\n  stream: AsyncIterable<number>;\n  gen: Generator<number>;\n}",
    )]);
    assert!(emitted.result.is_ok(), "{:?}", emitted.result);
    assert!(
        emitted
            .references
            .iter()
            .all(|r| *r == TypeReferenceKind::None),
        "{:?}",
        emitted.references
    );
    assert!(emitted.global.is_empty());
}

#[test]
fn test_global_type_names_are_sorted() {
    assert!(GLOBAL_TYPE_NAMES.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(is_global_type_name("URL"));
    assert!(!is_global_type_name("Meta"));
}

#[test]
fn test_same_file_namespace_qualifier_needs_no_declaration() {
    let emitted = emit(&[(
        "a.ts",
        "class A { shape: Shapes.Circle }\nnamespace Shapes { export type Circle = { r: number }; }",
    )]);
    assert!(emitted.result.is_ok(), "{:?}", emitted.result);
    assert_eq!(emitted.references, [TypeReferenceKind::None]);
    assert!(emitted.global.is_empty());
}
