//! SyntaxKind enum - all token and node kinds of the binding expression tree.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    EndOfFileToken = 0,
    WhitespaceTrivia = 1,

    // Literals and names
    Identifier = 2,
    NumericLiteral = 3,
    StringLiteral = 4,

    // Punctuation
    DotToken = 5,
    CommaToken = 6,
    OpenParenToken = 7,
    CloseParenToken = 8,
    OpenBracketToken = 9,
    CloseBracketToken = 10,
    ColonToken = 11,
    QuestionToken = 12,

    // Operators
    QuestionQuestionToken = 13,
    PlusToken = 14,
    MinusToken = 15,
    AsteriskToken = 16,
    SlashToken = 17,
    PercentToken = 18,
    ExclamationToken = 19,
    EqualsEqualsToken = 20,
    ExclamationEqualsToken = 21,
    LessThanToken = 22,
    LessThanEqualsToken = 23,
    GreaterThanToken = 24,
    GreaterThanEqualsToken = 25,
    AmpersandToken = 26,
    AmpersandAmpersandToken = 27,
    BarToken = 28,
    BarBarToken = 29,
    EqualsToken = 30,

    /// Any operator-like character sequence outside the supported grammar
    /// (`+=`, `++`, `^`, `~`, `<<`, `=>`, ...) and any character that starts
    /// no other token.
    UnsupportedOperatorToken = 31,

    // ========================================================================
    // Nodes
    // ========================================================================
    LiteralExpression = 64,
    SimpleName = 65,
    GenericName = 66,
    MemberAccessExpression = 67,
    ArrayAccessExpression = 68,
    FunctionCallExpression = 69,
    UnaryExpression = 70,
    BinaryExpression = 71,
    ConditionalExpression = 72,
    ParenthesizedExpression = 73,
    AssemblyQualifiedName = 74,
    MultiExpression = 75,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::DotToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::UnsupportedOperatorToken;
    pub const FIRST_BINARY_OPERATOR: SyntaxKind = SyntaxKind::QuestionQuestionToken;
    pub const LAST_BINARY_OPERATOR: SyntaxKind = SyntaxKind::UnsupportedOperatorToken;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::LiteralExpression;
}

impl SyntaxKind {
    /// Whether this kind is a token kind (as opposed to a node kind).
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < SyntaxKind::FIRST_NODE as u16
    }

    /// Whether this kind represents a punctuation or operator token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_PUNCTUATION as u16 && v <= Self::LAST_PUNCTUATION as u16
    }

    /// Whether this kind represents trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self == SyntaxKind::WhitespaceTrivia
    }

    /// Whether this kind can be the operator of a binary expression.
    #[inline]
    pub fn is_binary_operator(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_BINARY_OPERATOR as u16
            && v <= Self::LAST_BINARY_OPERATOR as u16
            && self != SyntaxKind::ExclamationToken
    }

    /// Whether this kind can be the operator of a unary expression.
    #[inline]
    pub fn is_unary_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::ExclamationToken
                | SyntaxKind::MinusToken
                | SyntaxKind::UnsupportedOperatorToken
        )
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::QuestionToken => Some("?"),
            SyntaxKind::QuestionQuestionToken => Some("??"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::PercentToken => Some("%"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::EqualsToken => Some("="),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
