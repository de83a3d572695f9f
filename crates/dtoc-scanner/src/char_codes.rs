//! Character classification used by the scanner.

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' | '\u{3000}'
    ) || ('\u{2000}'..='\u{200B}').contains(&ch)
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '$'
        || ch == '_'
        || ch.is_ascii_alphanumeric()
        || (!ch.is_ascii() && (ch.is_alphanumeric() || ch == '\u{200C}' || ch == '\u{200D}'))
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
