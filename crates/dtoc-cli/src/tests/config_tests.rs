use super::args::CliArgs;
use super::config::*;
use clap::Parser;
use std::path::{Path, PathBuf};

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("dtoc").chain(argv.iter().copied()))
}

fn full_config() -> DtocConfig {
    DtocConfig {
        include: Some(vec!["src/**/*.dto.ts".to_string()]),
        out_dir: Some(PathBuf::from("generated")),
        out_file: Some("types.ts".to_string()),
        namespace: Some("Dto".to_string()),
        emit_raw: None,
        format: None,
    }
}

#[test]
fn parse_config_accepts_comments_and_trailing_commas() {
    let source = r#"{
        // sources
        "include": ["src/**/*.dto.ts",],
        /* output */
        "outDir": "generated",
        "outFile": "types.ts",
        "namespace": "Dto",
    }"#;
    let config = parse_config(source).unwrap();
    assert_eq!(config, full_config());
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let config = parse_config(r#"{ "include": ["src//*.ts", "a/*/b.ts"] }"#).unwrap();
    assert_eq!(
        config.include,
        Some(vec!["src//*.ts".to_string(), "a/*/b.ts".to_string()])
    );
}

#[test]
fn emit_raw_accepts_bool_or_string() {
    assert_eq!(
        parse_config(r#"{ "emitRaw": false }"#).unwrap().emit_raw,
        Some(false)
    );
    assert_eq!(
        parse_config(r#"{ "emitRaw": "true" }"#).unwrap().emit_raw,
        Some(true)
    );
    assert!(parse_config(r#"{ "emitRaw": "maybe" }"#).is_err());
}

#[test]
fn format_options_are_read() {
    let config = parse_config(r#"{ "format": { "tabWidth": 4, "singleQuote": false } }"#).unwrap();
    let format = config.format.unwrap();
    assert_eq!(format.tab_width, 4);
    assert!(!format.single_quote);
    assert!(format.semi);
    assert!(format.bracket_spacing);
}

#[test]
fn config_supplies_every_option() {
    let cwd = Path::new("/work");
    let config_dir = Path::new("/work/project");
    let options = resolve_options(&args(&[]), Some(&full_config()), Some(config_dir), cwd).unwrap();
    assert_eq!(options.root, PathBuf::from("/work/project"));
    assert_eq!(options.patterns, vec!["src/**/*.dto.ts".to_string()]);
    assert_eq!(options.out_dir, PathBuf::from("/work/project/generated"));
    assert_eq!(options.out_file, "types.ts");
    assert_eq!(options.namespace, "Dto");
    assert!(options.emit_raw);
    assert_eq!(options.format.tab_width, 2);
    assert_eq!(
        options.output_path(),
        PathBuf::from("/work/project/generated/types.ts")
    );
    assert_eq!(
        options.raw_output_path(),
        PathBuf::from("/work/project/generated/types.raw.ts")
    );
}

#[test]
fn command_line_overrides_config() {
    let cwd = Path::new("/work");
    let options = resolve_options(
        &args(&["lib/*.ts", "-o", "out", "-f", "api.ts", "-n", "Api", "--noRaw"]),
        Some(&full_config()),
        Some(Path::new("/work/project")),
        cwd,
    )
    .unwrap();
    assert_eq!(options.root, PathBuf::from("/work"));
    assert_eq!(options.patterns, vec!["lib/*.ts".to_string()]);
    assert_eq!(options.out_dir, PathBuf::from("/work/out"));
    assert_eq!(options.out_file, "api.ts");
    assert_eq!(options.namespace, "Api");
    assert!(!options.emit_raw);
    assert_eq!(options.raw_output_path(), PathBuf::from("/work/out/api.raw.ts"));
}

#[test]
fn missing_options_are_named() {
    let cwd = Path::new("/work");
    let cases: [(&[&str], &str); 4] = [
        (&["-o", "out", "-f", "a.ts", "-n", "A"], "include"),
        (&["x.ts", "-f", "a.ts", "-n", "A"], "outDir"),
        (&["x.ts", "-o", "out", "-n", "A"], "outFile"),
        (&["x.ts", "-o", "out", "-f", "a.ts"], "namespace"),
    ];
    for (argv, field) in cases {
        match resolve_options(&args(argv), None, None, cwd) {
            Err(ConfigError::Missing(name)) => assert_eq!(name, field),
            other => panic!("expected missing {field}, got {other:?}"),
        }
    }
}

#[test]
fn empty_include_counts_as_missing() {
    let config = DtocConfig {
        include: Some(Vec::new()),
        ..full_config()
    };
    let err = resolve_options(&args(&[]), Some(&config), None, Path::new("/work")).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("include")));
    assert_eq!(err.to_string(), "missing required option 'include'");
}

#[test]
fn invalid_namespace_is_rejected() {
    let cwd = Path::new("/work");
    for namespace in ["1Dto", "my-types", "Api..Dto"] {
        let err = resolve_options(
            &args(&["x.ts", "-o", "out", "-f", "a.ts", "-n", namespace]),
            None,
            None,
            cwd,
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { field: "namespace", .. }),
            "{namespace}: {err}"
        );
    }

    let options = resolve_options(
        &args(&["x.ts", "-o", "out", "-f", "a.ts", "-n", "Api.Dto"]),
        None,
        None,
        cwd,
    )
    .unwrap();
    assert_eq!(options.namespace, "Api.Dto");
}

#[test]
fn out_file_must_be_a_file_name() {
    let err = resolve_options(
        &args(&["x.ts", "-o", "out", "-f", "types/", "-n", "Dto"]),
        None,
        None,
        Path::new("/work"),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "outFile", .. }));
}

#[test]
fn zero_tab_width_is_rejected() {
    let mut config = full_config();
    config.format = Some(parse_config(r#"{ "format": { "tabWidth": 0 } }"#).unwrap().format.unwrap());
    let err = resolve_options(&args(&[]), Some(&config), None, Path::new("/work")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "format.tabWidth",
            ..
        }
    ));
}

#[test]
fn config_emit_raw_false_disables_raw_output() {
    let config = DtocConfig {
        emit_raw: Some(false),
        ..full_config()
    };
    let options = resolve_options(&args(&[]), Some(&config), None, Path::new("/work")).unwrap();
    assert!(!options.emit_raw);
}

#[test]
fn load_config_reports_read_and_parse_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        load_config(&missing),
        Err(ConfigError::Read { .. })
    ));

    let broken = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&broken, "{ \"include\": [ }").unwrap();
    let err = load_config(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("dtoc.json"));
}

#[test]
fn find_config_prefers_project_then_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path();
    assert_eq!(find_config(&args(&[]), cwd), None);

    std::fs::write(cwd.join(CONFIG_FILE_NAME), "{}").unwrap();
    assert_eq!(
        find_config(&args(&[]), cwd),
        Some(cwd.join(CONFIG_FILE_NAME))
    );

    std::fs::create_dir(cwd.join("nested")).unwrap();
    assert_eq!(
        find_config(&args(&["-p", "nested"]), cwd),
        Some(cwd.join("nested").join(CONFIG_FILE_NAME))
    );
    assert_eq!(
        find_config(&args(&["-p", "custom.json"]), cwd),
        Some(cwd.join("custom.json"))
    );
}
