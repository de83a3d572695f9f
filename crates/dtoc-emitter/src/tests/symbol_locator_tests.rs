use super::*;
use std::path::PathBuf;

fn program(files: &[(&str, &str)]) -> Program {
    let mut program = Program::new();
    for (path, source) in files {
        program.add_file(path, source.to_string());
    }
    program
}

#[test]
fn test_locate_local_enum_adds_export() {
    let program = program(&[("src/a.ts", "enum Status { On = 'on' }\nclass A { s: Status }")]);
    let locator = SymbolLocator::new(&program);
    let located = locator
        .locate(FileId(0), "Status", SymbolKind::Enum)
        .expect("no error")
        .expect("found");
    assert_eq!(located.text, "export enum Status { On = 'on' }");
    assert_eq!(located.origin, FileId(0));
}

#[test]
fn test_locate_through_import_adds_origin_comment() {
    let program = program(&[
        ("src/dto/bar.ts", "import { Meta } from './meta';\nclass Bar { m: Meta }"),
        ("src/dto/meta.ts", "export type Meta = Record<string, string>;"),
    ]);
    let locator = SymbolLocator::new(&program);
    let located = locator
        .locate(FileId(0), "Meta", SymbolKind::TypeAlias)
        .unwrap()
        .unwrap();
    assert_eq!(
        located.text,
        "// from meta.ts\nexport type Meta = Record<string, string>;"
    );
    assert_eq!(located.origin, FileId(1));
}

#[test]
fn test_locate_through_renamed_import() {
    let program = program(&[
        ("a.ts", "import { Status as State } from './enums';"),
        ("enums.ts", "export enum Status { A }"),
    ]);
    let locator = SymbolLocator::new(&program);
    let located = locator
        .locate(FileId(0), "State", SymbolKind::Enum)
        .unwrap()
        .unwrap();
    assert_eq!(located.name, "Status");
    assert!(located.text.ends_with("export enum Status { A }"));
}

#[test]
fn test_missing_import_names_symbol() {
    let program = program(&[("src/bar.ts", "class Bar { m: Meta }")]);
    let locator = SymbolLocator::new(&program);
    let error = locator
        .locate(FileId(0), "Meta", SymbolKind::TypeAlias)
        .unwrap_err();
    assert!(matches!(error, GenerateError::MissingImport { ref symbol, .. } if symbol == "Meta"));
    assert!(error.to_string().contains("'Meta'"), "{error}");
}

#[test]
fn test_missing_file_reports_target_path() {
    let program = program(&[("src/bar.ts", "import { Meta } from '../shared/meta';")]);
    let locator = SymbolLocator::new(&program);
    let error = locator
        .locate(FileId(0), "Meta", SymbolKind::TypeAlias)
        .unwrap_err();
    match error {
        GenerateError::MissingFile { target, specifier, .. } => {
            assert_eq!(target, PathBuf::from("shared/meta.ts"));
            assert_eq!(specifier, "../shared/meta");
        }
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_import_target_without_declaration_is_not_an_error() {
    let program = program(&[
        ("a.ts", "import { Other } from './b';"),
        ("b.ts", "export class Other {}"),
    ]);
    let locator = SymbolLocator::new(&program);
    let located = locator.locate(FileId(0), "Other", SymbolKind::TypeAlias);
    assert!(matches!(located, Ok(None)));
}

#[test]
fn test_resolve_kind_and_origin() {
    let program = program(&[
        (
            "a.ts",
            "import { Status } from './enums';\nimport { Injectable } from '@nestjs/common';\nimport * as ns from './ns';\ntype Local = string;",
        ),
        ("enums.ts", "export enum Status { A }"),
    ]);
    let locator = SymbolLocator::new(&program);
    assert_eq!(locator.resolve_kind(FileId(0), "Status"), Some(SymbolKind::Enum));
    assert_eq!(locator.resolve_kind(FileId(0), "Local"), Some(SymbolKind::TypeAlias));
    assert_eq!(locator.resolve_kind(FileId(0), "Injectable"), None);
    assert!(locator.is_package_import(FileId(0), "Injectable"));
    assert!(!locator.is_package_import(FileId(0), "Status"));
    assert_eq!(locator.origin_of(FileId(0), "ns"), SymbolOrigin::ModuleObject);
    assert_eq!(locator.origin_of(FileId(0), "Nope"), SymbolOrigin::Unbound);
    assert_eq!(locator.origin_of(FileId(0), "Local"), SymbolOrigin::Local);
}
