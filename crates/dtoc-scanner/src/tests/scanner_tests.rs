use super::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source.to_string());
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn scans_class_property_tokens() {
    let kinds = scan_all("export class A { name?: string; }");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ExportKeyword,
            SyntaxKind::ClassKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::ColonToken,
            SyntaxKind::StringKeyword,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CloseBraceToken,
        ]
    );
}

#[test]
fn comments_become_leading_trivia_of_next_token() {
    let source = "/** The id. */\nid: number;";
    let mut scanner = ScannerState::new(source.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    let comments = scanner.leading_comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].get_text(source), "/** The id. */");
    assert!(comments[0].is_jsdoc(source));

    assert_eq!(scanner.scan(), SyntaxKind::ColonToken);
    assert!(scanner.leading_comments().is_empty());
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn string_value_is_unquoted() {
    let mut scanner = ScannerState::new("'./meta' \"a\\\"b\"".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value_ref(), "./meta");
    assert_eq!(scanner.get_token_text(), "'./meta'");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value_ref(), "a\"b");
}

#[test]
fn template_with_nested_substitution_is_one_token() {
    let kinds = scan_all("`a${ {x: `b${1}`}.x }c` ;");
    assert_eq!(
        kinds,
        vec![SyntaxKind::TemplateLiteral, SyntaxKind::SemicolonToken]
    );
    let kinds = scan_all("`plain`");
    assert_eq!(kinds, vec![SyntaxKind::NoSubstitutionTemplateLiteral]);
}

#[test]
fn numbers_arrows_and_spread() {
    let kinds = scan_all("0x1F 1_000.5e3 10n => ... a?.b x?.5:1");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::BigIntLiteral,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn unterminated_constructs_are_reported_without_panicking() {
    let mut scanner = ScannerState::new("'open\n/* never".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    let errors = scanner.take_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].code, 1002);
    assert_eq!(errors[1].code, 1010);
}

#[test]
fn snapshot_restores_position_and_errors() {
    let mut scanner = ScannerState::new("a b @".to_string());
    scanner.scan();
    let snapshot = scanner.save_state();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value_ref(), "b");
    scanner.restore_state(snapshot);
    assert_eq!(scanner.get_token_value_ref(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value_ref(), "b");
    assert_eq!(scanner.scan(), SyntaxKind::AtToken);
}

#[test]
fn keywords_are_classified() {
    assert!(SyntaxKind::ClassKeyword.is_reserved_word());
    assert!(!SyntaxKind::TypeKeyword.is_reserved_word());
    assert!(SyntaxKind::TypeKeyword.is_identifier_like());
    assert!(SyntaxKind::StringKeyword.is_keyword_type());
    assert!(!SyntaxKind::Identifier.is_keyword());
}
