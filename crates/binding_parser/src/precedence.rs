//! Operator precedence for the left-associative binary operators.

use binding_ast::syntax_kind::SyntaxKind;

/// Binary operator precedence levels, lowest binding first.
///
/// Assignment, the conditional operator and unsupported operators are
/// right-associative and handled by dedicated levels above these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    NullCoalescing = 1,
    OrElse = 2,
    AndAlso = 3,
    Or = 4,
    And = 5,
    Equality = 6,
    Relational = 7,
    Additive = 8,
    Multiplicative = 9,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::OrElse,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::AndAlso,
        SyntaxKind::BarToken => OperatorPrecedence::Or,
        SyntaxKind::AmpersandToken => OperatorPrecedence::And,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
            OperatorPrecedence::Equality
        }
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken => OperatorPrecedence::Relational,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        _ => OperatorPrecedence::Invalid,
    }
}
