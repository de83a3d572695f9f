//! End-to-end runs of the driver against temporary project directories.

use clap::Parser;
use dtoc_cli::args::CliArgs;
use dtoc_cli::config::{self, ResolvedOptions};
use dtoc_cli::driver;
use std::path::Path;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn options(root: &Path, argv: &[&str]) -> ResolvedOptions {
    let args = CliArgs::parse_from(std::iter::once("dtoc").chain(argv.iter().copied()));
    config::resolve_options(&args, None, None, root).unwrap()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn writes_formatted_output_and_raw_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/user.dto.ts", "export class User {\n  name: string;\n}\n");
    write(root, "src/user.service.ts", "export class UserService {}\n");

    let options = options(
        root,
        &["src/**/*.dto.ts", "-o", "generated", "-f", "types.ts", "-n", "Dto"],
    );
    let summary = driver::run(&options).unwrap();

    assert_eq!(summary.files, vec![root.join("src/user.dto.ts")]);
    assert_eq!(summary.classes, 1);
    assert_eq!(summary.output, root.join("generated/types.ts"));
    assert_eq!(
        read(&summary.output),
        "export namespace Dto {\n  export type User = {\n    name: string;\n  };\n}\n"
    );

    let raw_path = summary.raw_output.expect("raw artifact enabled");
    assert_eq!(raw_path, root.join("generated/types.raw.ts"));
    assert_eq!(read(&raw_path), "export type User = {\n  name: string;\n};\n\n");
}

#[test]
fn no_raw_skips_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "dto/a.ts", "export class A {}\n");

    let options = options(
        root,
        &["dto/*.ts", "-o", "out", "-f", "api.ts", "-n", "Api", "--noRaw"],
    );
    let summary = driver::run(&options).unwrap();

    assert!(summary.raw_output.is_none());
    assert!(root.join("out/api.ts").is_file());
    assert!(!root.join("out/api.raw.ts").exists());
}

#[test]
fn imported_enum_is_emitted_once_before_classes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "src/enums.ts",
        "export enum Role {\n  Admin = 'admin',\n  User = 'user',\n}\n",
    );
    write(
        root,
        "src/a.dto.ts",
        "import { Role } from './enums';\n\nexport class A {\n  role: Role;\n}\n",
    );
    write(
        root,
        "src/b.dto.ts",
        "import { Role } from './enums';\n\nexport class B {\n  roles: Role[];\n}\n",
    );

    let options = options(
        root,
        &["src/*.dto.ts", "src/enums.ts", "-o", "out", "-f", "types.ts", "-n", "Dto"],
    );
    driver::run(&options).unwrap();

    let raw = read(&options.raw_output_path());
    assert_eq!(raw.matches("export enum Role").count(), 1, "{raw}");
    assert!(raw.starts_with("// from enums.ts\nexport enum Role {"), "{raw}");
    let a = raw.find("export type A").unwrap();
    let b = raw.find("export type B").unwrap();
    assert!(a < b, "{raw}");

    let output = read(&options.output_path());
    assert!(output.starts_with("export namespace Dto {\n"), "{output}");
    assert!(output.contains("  export enum Role {\n    Admin = 'admin',\n"), "{output}");
}

#[test]
fn resolution_error_names_file_and_keeps_earlier_output() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/a.dto.ts", "export class Good {\n  id: number;\n}\n");
    write(root, "src/b.dto.ts", "export class Bad {\n  meta: Meta;\n}\n");
    write(root, "src/meta.ts", "export type Meta = Record<string, string>;\n");

    let options = options(
        root,
        &["src/**/*.ts", "-o", "out", "-f", "types.ts", "-n", "Dto"],
    );
    let err = driver::run(&options).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("b.dto.ts"), "{message}");
    assert!(message.contains("Meta"), "{message}");

    let output = read(&options.output_path());
    assert!(output.contains("export type Good"), "{output}");
    assert!(!output.contains("export type Bad"), "{output}");
}

#[test]
fn rerun_produces_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "dto/meta.ts", "export type Meta = Record<string, string>;\n");
    write(
        root,
        "dto/user.dto.ts",
        "import { Meta } from './meta';\nexport class User {\n  meta?: Meta;\n}\n",
    );

    let options = options(
        root,
        &["dto/*.dto.ts", "-o", "out", "-f", "types.ts", "-n", "Dto"],
    );
    driver::run(&options).unwrap();
    let first = (read(&options.output_path()), read(&options.raw_output_path()));
    driver::run(&options).unwrap();
    let second = (read(&options.output_path()), read(&options.raw_output_path()));
    assert_eq!(first, second);
}

#[test]
fn empty_match_still_writes_an_empty_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let options = options(
        root,
        &["nothing/**/*.ts", "-o", "out", "-f", "types.ts", "-n", "Dto"],
    );
    let summary = driver::run(&options).unwrap();

    assert!(summary.files.is_empty());
    assert_eq!(read(&options.output_path()), "export namespace Dto {\n}\n");
    assert_eq!(read(&options.raw_output_path()), "");
}

#[test]
fn config_file_paths_are_relative_to_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "project/src/item.dto.ts", "export class Item {\n  sku: string;\n}\n");
    write(
        root,
        "project/dtoc.json",
        r#"{
  // generated client types
  "include": ["src/**/*.dto.ts"],
  "outDir": "generated",
  "outFile": "client.ts",
  "namespace": "Client",
  "emitRaw": "false",
  "format": { "tabWidth": 4 },
}"#,
    );

    let args = CliArgs::parse_from(["dtoc", "-p", "project"]);
    let config_path = config::find_config(&args, root).unwrap();
    let loaded = config::load_config(&config_path).unwrap();
    let options =
        config::resolve_options(&args, Some(&loaded), config_path.parent(), root).unwrap();
    let summary = driver::run(&options).unwrap();

    assert_eq!(summary.output, root.join("project/generated/client.ts"));
    assert!(summary.raw_output.is_none());
    assert_eq!(
        read(&summary.output),
        "export namespace Client {\n    export type Item = {\n        sku: string;\n    };\n}\n"
    );
}

#[test]
fn source_files_lists_matches_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/b.dto.ts", "");
    write(root, "src/a.dto.ts", "");
    write(root, "node_modules/pkg/x.dto.ts", "");

    let options = options(root, &["**/*.dto.ts", "-o", "out", "-f", "t.ts", "-n", "Dto"]);
    let files = driver::source_files(&options).unwrap();

    assert_eq!(files, vec![root.join("src/a.dto.ts"), root.join("src/b.dto.ts")]);
    assert!(!root.join("out").exists());
}
