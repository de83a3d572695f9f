use super::reporter::Reporter;
use anyhow::Context;
use dtoc_common::{Diagnostic, DiagnosticCategory};

#[test]
fn formats_location_code_and_snippet() {
    let source = "class A {\n  x: = 1;\n}\n";
    let diagnostic = Diagnostic::error("src/a.ts", 15, 1, "Type expected.", 1110);
    let output = Reporter::new(false).format_diagnostic(&diagnostic, source);
    assert_eq!(
        output,
        "src/a.ts:2:6 - error TS1110: Type expected.\n    2     x: = 1;\n             ~"
    );
}

#[test]
fn warnings_are_labelled() {
    let diagnostic = Diagnostic {
        category: DiagnosticCategory::Warning,
        code: 0,
        file: "b.ts".to_string(),
        start: 0,
        length: 5,
        message_text: "Skipped.".to_string(),
    };
    let output = Reporter::new(false).format_diagnostic(&diagnostic, "class");
    assert!(output.starts_with("b.ts:1:1 - warning: Skipped."), "{output}");
    assert!(output.ends_with("~~~~~"), "{output}");
}

#[test]
fn error_chain_is_listed() {
    let error = Err::<(), _>(std::io::Error::other("disk full"))
        .context("failed to write out/types.ts")
        .unwrap_err();
    let output = Reporter::new(false).format_error(&error);
    assert_eq!(
        output,
        "error: failed to write out/types.ts\n  caused by: disk full"
    );
}

#[test]
fn color_adds_escape_codes() {
    colored::control::set_override(true);
    let error = anyhow::anyhow!("boom");
    let output = Reporter::new(true).format_error(&error);
    colored::control::unset_override();
    assert!(output.contains("\u{1b}["), "{output:?}");
    assert!(output.contains("boom"));
}
