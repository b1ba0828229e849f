//! binding_parser: Error-tolerant recursive descent parser for binding
//! expressions.
//!
//! Parses the token stream produced by `binding_scanner` into a
//! `binding_ast` tree. The general entry points never fail; defects are
//! recorded on the nodes. Only the directive helpers return an error value.

mod literal;
mod parser;
mod precedence;
mod restore_point;

pub use binding_options::{DEFAULT_MAX_RECURSION_DEPTH, MAX_RECURSION_DEPTH_LIMIT};
pub use parser::Parser;
pub use restore_point::RestorePoint;

use binding_ast::node::{Expression, MultiExpression};
use binding_ast::visitor::{collect_diagnostics, subtree_has_errors};
use binding_diagnostics::DiagnosticCollection;
use binding_options::{ParseMode, ParserOptions};

/// Errors returned by the directive helpers when the input does not form a
/// valid directive.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    #[error("invalid type name `{text}` ({} error(s))", .diagnostics.error_count())]
    InvalidTypeName {
        text: String,
        diagnostics: DiagnosticCollection,
    },
    #[error("invalid directive value `{text}` ({} error(s))", .diagnostics.error_count())]
    InvalidDirectiveValue {
        text: String,
        diagnostics: DiagnosticCollection,
    },
}

impl DirectiveError {
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        match self {
            DirectiveError::InvalidTypeName { diagnostics, .. }
            | DirectiveError::InvalidDirectiveValue { diagnostics, .. } => diagnostics,
        }
    }
}

/// Parse exactly one expression starting at the first non-whitespace token.
/// Trailing tokens are not reported.
pub fn parse_expression(source: &str) -> Expression {
    Parser::new(source).read_expression()
}

/// Parse the whole input. Every token of `source` is covered by the result.
pub fn parse_multi_expression(source: &str) -> MultiExpression {
    Parser::new(source).read_multi_expression()
}

/// Parse `Namespace.Type` or `Namespace.Type, Assembly`.
pub fn parse_directive_type_name(source: &str) -> Result<Expression, DirectiveError> {
    let expr = Parser::new(source).read_directive_type_name();
    if subtree_has_errors(&expr) {
        return Err(DirectiveError::InvalidTypeName {
            text: source.to_string(),
            diagnostics: collect_diagnostics(&expr),
        });
    }
    Ok(expr)
}

/// Parse `Alias = Namespace.Type` or a plain type name.
pub fn parse_directive_value(source: &str) -> Result<Expression, DirectiveError> {
    let expr = Parser::new(source).read_directive_value();
    if subtree_has_errors(&expr) {
        return Err(DirectiveError::InvalidDirectiveValue {
            text: source.to_string(),
            diagnostics: collect_diagnostics(&expr),
        });
    }
    Ok(expr)
}

/// Parse with the entry point and limits selected by `options`. Directive
/// modes return the annotated tree rather than an error.
pub fn parse_with_options(source: &str, options: &ParserOptions) -> Expression {
    let mut parser = Parser::with_options(source, options);
    match options.mode {
        ParseMode::Expression => parser.read_expression(),
        ParseMode::MultiExpression => parser.read_multi_expression().into(),
        ParseMode::DirectiveTypeName => parser.read_directive_type_name(),
        ParseMode::DirectiveValue => parser.read_directive_value(),
    }
}
