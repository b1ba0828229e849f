//! Syntax node definitions for binding expressions.
//!
//! Every node owns its children, the exact run of tokens it consumed and the
//! errors recorded while it was built. Trees are plain values: there is no
//! sharing and there are no parent links.

use crate::syntax_kind::SyntaxKind;
use crate::token::Token;
use binding_core::text::TextSpan;
use binding_diagnostics::NodeError;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all syntax nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    /// Source span. The length is the sum of the consumed token lengths.
    pub span: TextSpan,
    /// The tokens this node consumed, in source order, including whitespace.
    pub tokens: Vec<Token>,
    /// Errors local to this node. Errors of children live on the children.
    pub errors: Vec<NodeError>,
}

impl NodeData {
    pub fn new(span: TextSpan, tokens: Vec<Token>) -> Self {
        Self {
            span,
            tokens,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: NodeError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Reconstruct the source text covered by this node.
    pub fn display_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

// ============================================================================
// Literals
// ============================================================================

/// The value of a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    String(String),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    /// A decimal (`m` suffix) literal, kept as its validated digits.
    Decimal(String),
}

impl LiteralValue {
    /// A short name of the value type, used by the tree printer.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::Null => "null",
            LiteralValue::Boolean(_) => "bool",
            LiteralValue::String(_) => "string",
            LiteralValue::Int32(_) => "int",
            LiteralValue::UInt32(_) => "uint",
            LiteralValue::Int64(_) => "long",
            LiteralValue::UInt64(_) => "ulong",
            LiteralValue::Single(_) => "float",
            LiteralValue::Double(_) => "double",
            LiteralValue::Decimal(_) => "decimal",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, LiteralValue::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpression {
    pub data: NodeData,
    pub value: LiteralValue,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleName {
    pub data: NodeData,
    /// `None` for a name synthesized where an identifier was missing.
    pub identifier: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericName {
    pub data: NodeData,
    pub identifier: Token,
    pub type_arguments: Vec<Expression>,
}

/// A name that may appear after a `.` in a member access.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierName {
    Simple(SimpleName),
    Generic(GenericName),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyQualifiedName {
    pub data: NodeData,
    pub type_name: Box<Expression>,
    pub assembly_name: Box<Expression>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralExpression),
    SimpleName(SimpleName),
    GenericName(GenericName),
    MemberAccess(MemberAccessExpression),
    ArrayAccess(ArrayAccessExpression),
    FunctionCall(FunctionCallExpression),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Conditional(ConditionalExpression),
    Parenthesized(ParenthesizedExpression),
    AssemblyQualifiedName(AssemblyQualifiedName),
    Multi(MultiExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccessExpression {
    pub data: NodeData,
    pub target: Box<Expression>,
    pub member_name: IdentifierName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccessExpression {
    pub data: NodeData,
    pub target: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpression {
    pub data: NodeData,
    pub target: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub data: NodeData,
    /// `ExclamationToken`, `MinusToken` or `UnsupportedOperatorToken`.
    pub operator: SyntaxKind,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub data: NodeData,
    /// The operator token kind. `UnsupportedOperatorToken` for operators
    /// outside the grammar; the node then carries an error naming it.
    pub operator: SyntaxKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub data: NodeData,
    pub condition: Box<Expression>,
    pub when_true: Box<Expression>,
    pub when_false: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression {
    pub data: NodeData,
    pub expression: Box<Expression>,
}

/// Several expressions that follow each other without a joining operator.
/// Every expression after the first carries an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiExpression {
    pub data: NodeData,
    pub expressions: Vec<Expression>,
}
