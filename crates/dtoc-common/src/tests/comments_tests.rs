use super::*;

#[test]
fn jsdoc_detection_ignores_banners_and_line_comments() {
    let source = "/** doc */ /*** banner */ // line\n/**/";
    let doc = CommentRange::new(0, 10, true, false);
    let banner = CommentRange::new(11, 25, true, false);
    let line = CommentRange::new(26, 33, false, true);
    let empty = CommentRange::new(34, 38, true, false);

    assert!(doc.is_jsdoc(source));
    assert!(!banner.is_jsdoc(source));
    assert!(!line.is_jsdoc(source));
    assert!(!empty.is_jsdoc(source));
}

#[test]
fn comment_end_search_handles_unterminated_comments() {
    let bytes = b"/* open */ x";
    assert_eq!(find_multi_line_comment_end(bytes, 2), Some(10));
    assert_eq!(find_multi_line_comment_end(b"/* never", 2), None);
    assert_eq!(find_single_line_comment_end(b"// a\nb", 0), 4);
    assert_eq!(find_single_line_comment_end(b"// a", 0), 4);
}

#[test]
fn multi_line_comment_is_reindented() {
    let text = "/**\n       * The name.\n       */";
    let formatted = format_multi_line_comment(text, "  ");
    assert_eq!(formatted, "/**\n   * The name.\n   */");
}

#[test]
fn comment_without_gutter_keeps_nested_indentation() {
    let text = "/**\n      Usage:\n        build({ id: 1 });\n      */";
    let formatted = format_multi_line_comment(text, "  ");
    assert_eq!(formatted, "/**\n  Usage:\n    build({ id: 1 });\n   */");
}
