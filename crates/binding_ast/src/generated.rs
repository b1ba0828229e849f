//! Helpers shared by every node type: data access, kinds and display text.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::token::Token;
use binding_core::text::TextSpan;
use binding_diagnostics::NodeError;

/// Helper to get the NodeData from any expression.
impl Expression {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Literal(n) => &n.data,
            Expression::SimpleName(n) => &n.data,
            Expression::GenericName(n) => &n.data,
            Expression::MemberAccess(n) => &n.data,
            Expression::ArrayAccess(n) => &n.data,
            Expression::FunctionCall(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::AssemblyQualifiedName(n) => &n.data,
            Expression::Multi(n) => &n.data,
        }
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Expression::Literal(n) => &mut n.data,
            Expression::SimpleName(n) => &mut n.data,
            Expression::GenericName(n) => &mut n.data,
            Expression::MemberAccess(n) => &mut n.data,
            Expression::ArrayAccess(n) => &mut n.data,
            Expression::FunctionCall(n) => &mut n.data,
            Expression::Unary(n) => &mut n.data,
            Expression::Binary(n) => &mut n.data,
            Expression::Conditional(n) => &mut n.data,
            Expression::Parenthesized(n) => &mut n.data,
            Expression::AssemblyQualifiedName(n) => &mut n.data,
            Expression::Multi(n) => &mut n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            Expression::Literal(_) => SyntaxKind::LiteralExpression,
            Expression::SimpleName(_) => SyntaxKind::SimpleName,
            Expression::GenericName(_) => SyntaxKind::GenericName,
            Expression::MemberAccess(_) => SyntaxKind::MemberAccessExpression,
            Expression::ArrayAccess(_) => SyntaxKind::ArrayAccessExpression,
            Expression::FunctionCall(_) => SyntaxKind::FunctionCallExpression,
            Expression::Unary(_) => SyntaxKind::UnaryExpression,
            Expression::Binary(_) => SyntaxKind::BinaryExpression,
            Expression::Conditional(_) => SyntaxKind::ConditionalExpression,
            Expression::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
            Expression::AssemblyQualifiedName(_) => SyntaxKind::AssemblyQualifiedName,
            Expression::Multi(_) => SyntaxKind::MultiExpression,
        }
    }

    pub fn span(&self) -> TextSpan {
        self.data().span
    }

    pub fn start_position(&self) -> u32 {
        self.data().span.start
    }

    pub fn length(&self) -> u32 {
        self.data().span.length
    }

    pub fn tokens(&self) -> &[Token] {
        &self.data().tokens
    }

    /// Errors recorded on this node only.
    pub fn errors(&self) -> &[NodeError] {
        &self.data().errors
    }

    pub fn has_node_errors(&self) -> bool {
        self.data().has_errors()
    }

    pub fn add_error(&mut self, error: NodeError) {
        self.data_mut().add_error(error);
    }

    /// The source text of the node, reconstructed from its tokens.
    pub fn to_display_string(&self) -> String {
        self.data().display_text()
    }

    /// The identifier text for simple and generic names.
    pub fn name(&self) -> Option<&str> {
        match self {
            Expression::SimpleName(n) => n.name(),
            Expression::GenericName(n) => Some(n.name()),
            _ => None,
        }
    }

    /// Unwrap a multi-expression that holds exactly one expression.
    pub fn into_single(self) -> Expression {
        match self {
            Expression::Multi(mut multi) if multi.expressions.len() == 1 => {
                multi.expressions.remove(0)
            }
            other => other,
        }
    }
}

impl IdentifierName {
    pub fn data(&self) -> &NodeData {
        match self {
            IdentifierName::Simple(n) => &n.data,
            IdentifierName::Generic(n) => &n.data,
        }
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            IdentifierName::Simple(n) => &mut n.data,
            IdentifierName::Generic(n) => &mut n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            IdentifierName::Simple(_) => SyntaxKind::SimpleName,
            IdentifierName::Generic(_) => SyntaxKind::GenericName,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            IdentifierName::Simple(n) => n.name(),
            IdentifierName::Generic(n) => Some(n.name()),
        }
    }

    pub fn to_display_string(&self) -> String {
        self.data().display_text()
    }
}

impl From<IdentifierName> for Expression {
    fn from(name: IdentifierName) -> Self {
        match name {
            IdentifierName::Simple(n) => Expression::SimpleName(n),
            IdentifierName::Generic(n) => Expression::GenericName(n),
        }
    }
}

impl SimpleName {
    pub fn name(&self) -> Option<&str> {
        self.identifier.as_ref().map(|t| t.text.as_str())
    }
}

impl GenericName {
    pub fn name(&self) -> &str {
        &self.identifier.text
    }
}

impl MultiExpression {
    pub fn span(&self) -> TextSpan {
        self.data.span
    }

    pub fn tokens(&self) -> &[Token] {
        &self.data.tokens
    }

    pub fn to_display_string(&self) -> String {
        self.data.display_text()
    }
}

impl From<MultiExpression> for Expression {
    fn from(multi: MultiExpression) -> Self {
        Expression::Multi(multi)
    }
}
