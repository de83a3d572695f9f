use serde::Serialize;

/// Token kinds produced by the scanner.
///
/// Node kinds that have no token counterpart live in the parser's
/// `syntax_kind_ext` module and start above `SyntaxKind::LAST_TOKEN`.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    QuestionToken,
    ColonToken,
    AtToken,

    // Names
    Identifier,
    PrivateIdentifier,

    // Reserved words
    ClassKeyword,
    ConstKeyword,
    DefaultKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FunctionKeyword,
    ImportKeyword,
    InKeyword,
    NewKeyword,
    NullKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AnyKeyword,
    AsKeyword,
    AsyncKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    FromKeyword,
    GetKeyword,
    ImplementsKeyword,
    InferKeyword,
    InterfaceKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    OverrideKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    SetKeyword,
    StaticKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
}

impl SyntaxKind {
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::ClassKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::VoidKeyword;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::ClassKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::UnknownKeyword;
    pub const LAST_TOKEN: u16 = SyntaxKind::UnknownKeyword as u16;

    #[inline]
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::FIRST_KEYWORD as u16) && (self as u16) <= (Self::LAST_KEYWORD as u16)
    }

    #[inline]
    pub fn is_reserved_word(self) -> bool {
        (self as u16) >= (Self::FIRST_RESERVED_WORD as u16)
            && (self as u16) <= (Self::LAST_RESERVED_WORD as u16)
    }

    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    /// Contextual keywords can appear wherever an identifier can.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || (self.is_keyword() && !self.is_reserved_word())
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateLiteral
        )
    }

    /// Keywords that denote a primitive type in type position.
    pub fn is_keyword_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// Tokens after which an expression continues on the next line.
    pub fn is_binary_operator_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::DotToken
                | SyntaxKind::QuestionDotToken
                | SyntaxKind::CommaToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::EqualsGreaterThanToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::SlashToken
                | SyntaxKind::PercentToken
                | SyntaxKind::AmpersandToken
                | SyntaxKind::BarToken
                | SyntaxKind::CaretToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::ColonToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::AsKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
        )
    }
}

/// Map identifier text to its keyword kind, if any.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "abstract" => SyntaxKind::AbstractKeyword,
        "accessor" => SyntaxKind::AccessorKeyword,
        "any" => SyntaxKind::AnyKeyword,
        "as" => SyntaxKind::AsKeyword,
        "async" => SyntaxKind::AsyncKeyword,
        "bigint" => SyntaxKind::BigIntKeyword,
        "boolean" => SyntaxKind::BooleanKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "constructor" => SyntaxKind::ConstructorKeyword,
        "declare" => SyntaxKind::DeclareKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "export" => SyntaxKind::ExportKeyword,
        "extends" => SyntaxKind::ExtendsKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "from" => SyntaxKind::FromKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "get" => SyntaxKind::GetKeyword,
        "implements" => SyntaxKind::ImplementsKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "in" => SyntaxKind::InKeyword,
        "infer" => SyntaxKind::InferKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "is" => SyntaxKind::IsKeyword,
        "keyof" => SyntaxKind::KeyOfKeyword,
        "let" => SyntaxKind::LetKeyword,
        "module" => SyntaxKind::ModuleKeyword,
        "namespace" => SyntaxKind::NamespaceKeyword,
        "never" => SyntaxKind::NeverKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "number" => SyntaxKind::NumberKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "override" => SyntaxKind::OverrideKeyword,
        "private" => SyntaxKind::PrivateKeyword,
        "protected" => SyntaxKind::ProtectedKeyword,
        "public" => SyntaxKind::PublicKeyword,
        "readonly" => SyntaxKind::ReadonlyKeyword,
        "set" => SyntaxKind::SetKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "string" => SyntaxKind::StringKeyword,
        "symbol" => SyntaxKind::SymbolKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "undefined" => SyntaxKind::UndefinedKeyword,
        "unique" => SyntaxKind::UniqueKeyword,
        "unknown" => SyntaxKind::UnknownKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        _ => return None,
    };
    Some(kind)
}
