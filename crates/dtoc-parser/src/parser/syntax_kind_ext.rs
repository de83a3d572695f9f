//! Node kinds that have no token counterpart.
//!
//! Token nodes (identifiers, literals, keyword types) reuse their
//! `SyntaxKind` value; everything else is numbered above the last token.

use dtoc_scanner::SyntaxKind;

const BASE: u16 = SyntaxKind::LAST_TOKEN + 1;

// Names
pub const QUALIFIED_NAME: u16 = BASE;
pub const COMPUTED_PROPERTY_NAME: u16 = BASE + 1;

// Declarations and statements
pub const SOURCE_FILE: u16 = BASE + 10;
pub const IMPORT_DECLARATION: u16 = BASE + 11;
pub const IMPORT_SPECIFIER: u16 = BASE + 12;
pub const CLASS_DECLARATION: u16 = BASE + 13;
pub const INTERFACE_DECLARATION: u16 = BASE + 14;
pub const TYPE_ALIAS_DECLARATION: u16 = BASE + 15;
pub const ENUM_DECLARATION: u16 = BASE + 16;
pub const ENUM_MEMBER: u16 = BASE + 17;
pub const MODULE_DECLARATION: u16 = BASE + 18;
pub const SKIPPED_STATEMENT: u16 = BASE + 19;
pub const TYPE_PARAMETER: u16 = BASE + 20;
pub const HERITAGE_CLAUSE: u16 = BASE + 21;
pub const DECORATOR: u16 = BASE + 22;

// Class and type members
pub const PROPERTY_DECLARATION: u16 = BASE + 30;
pub const METHOD_DECLARATION: u16 = BASE + 31;
pub const CONSTRUCTOR: u16 = BASE + 32;
pub const GET_ACCESSOR: u16 = BASE + 33;
pub const SET_ACCESSOR: u16 = BASE + 34;
pub const INDEX_SIGNATURE: u16 = BASE + 35;
pub const CLASS_STATIC_BLOCK: u16 = BASE + 36;
pub const PROPERTY_SIGNATURE: u16 = BASE + 37;
pub const METHOD_SIGNATURE: u16 = BASE + 38;
pub const CALL_SIGNATURE: u16 = BASE + 39;
pub const CONSTRUCT_SIGNATURE: u16 = BASE + 40;

// Expressions
pub const CALL_EXPRESSION: u16 = BASE + 50;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = BASE + 51;
pub const EXPRESSION_WITH_TYPE_ARGUMENTS: u16 = BASE + 52;
/// Any expression the parser skipped over; only its span is kept.
pub const SKIPPED_EXPRESSION: u16 = BASE + 53;

// Types
pub const TYPE_REFERENCE: u16 = BASE + 70;
pub const ARRAY_TYPE: u16 = BASE + 71;
pub const TUPLE_TYPE: u16 = BASE + 72;
pub const UNION_TYPE: u16 = BASE + 73;
pub const INTERSECTION_TYPE: u16 = BASE + 74;
pub const PARENTHESIZED_TYPE: u16 = BASE + 75;
pub const TYPE_OPERATOR: u16 = BASE + 76;
pub const INDEXED_ACCESS_TYPE: u16 = BASE + 77;
pub const TYPE_LITERAL: u16 = BASE + 78;
pub const MAPPED_TYPE: u16 = BASE + 79;
pub const FUNCTION_TYPE: u16 = BASE + 80;
pub const CONSTRUCTOR_TYPE: u16 = BASE + 81;
pub const CONDITIONAL_TYPE: u16 = BASE + 82;
pub const INFER_TYPE: u16 = BASE + 83;
pub const TYPE_QUERY: u16 = BASE + 84;
pub const LITERAL_TYPE: u16 = BASE + 85;
pub const IMPORT_TYPE: u16 = BASE + 86;
pub const REST_TYPE: u16 = BASE + 87;
pub const OPTIONAL_TYPE: u16 = BASE + 88;
pub const TEMPLATE_LITERAL_TYPE: u16 = BASE + 90;
pub const THIS_TYPE: u16 = BASE + 91;

pub fn is_type_node(kind: u16) -> bool {
    (TYPE_REFERENCE..=THIS_TYPE).contains(&kind)
        || (kind <= SyntaxKind::LAST_TOKEN && keyword_type_kind(kind))
}

fn keyword_type_kind(kind: u16) -> bool {
    [
        SyntaxKind::AnyKeyword,
        SyntaxKind::BigIntKeyword,
        SyntaxKind::BooleanKeyword,
        SyntaxKind::NeverKeyword,
        SyntaxKind::NullKeyword,
        SyntaxKind::NumberKeyword,
        SyntaxKind::ObjectKeyword,
        SyntaxKind::StringKeyword,
        SyntaxKind::SymbolKeyword,
        SyntaxKind::UndefinedKeyword,
        SyntaxKind::UnknownKeyword,
        SyntaxKind::VoidKeyword,
    ]
    .iter()
    .any(|k| *k as u16 == kind)
}
