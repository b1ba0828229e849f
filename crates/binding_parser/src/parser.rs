//! The binding expression parser.
//!
//! A recursive descent parser over a fully materialized token list. It
//! never fails: every defect is recorded as an error on the node being built
//! and parsing continues, so every input produces a tree.

use binding_ast::node::*;
use binding_ast::syntax_kind::SyntaxKind;
use binding_ast::token::Token;
use binding_ast::visitor::AstVisitor;
use binding_core::text::TextSpan;
use binding_diagnostics::{messages, NodeError};
use binding_options::{ParserOptions, DEFAULT_MAX_RECURSION_DEPTH, MAX_RECURSION_DEPTH_LIMIT};
use binding_scanner::tokenize;

use crate::literal::{parse_number_literal, parse_string_literal};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::restore_point::RestorePoint;

/// Parses binding expressions from a token list.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    max_recursion_depth: u32,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::from_tokens(tokenize(source))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            recursion_depth: 0,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }

    /// Depth limits above `MAX_RECURSION_DEPTH_LIMIT` are clamped to it.
    pub fn with_options(source: &str, options: &ParserOptions) -> Self {
        let mut parser = Self::new(source);
        parser.max_recursion_depth = options.max_recursion_depth.min(MAX_RECURSION_DEPTH_LIMIT);
        parser
    }

    /// The full token list of the input.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the next token to be read.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Whether every token has been consumed.
    pub fn on_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    #[inline]
    fn peek_kind(&self) -> Option<SyntaxKind> {
        self.peek().map(|t| t.kind)
    }

    fn read(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn read_if(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) {
            self.read()
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_kind() == Some(SyntaxKind::WhitespaceTrivia) {
            self.index += 1;
        }
    }

    fn is_current_token_incorrect(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() != Some(kind)
    }

    /// Read the closing token `kind` if it is present. Returns the error to
    /// record when it is missing; nothing is consumed in that case.
    fn expect_closing(&mut self, kind: SyntaxKind) -> Option<NodeError> {
        match self.read_if(kind) {
            Some(_) => None,
            None => {
                let text = kind.punctuation_text().unwrap_or("token");
                Some(NodeError::new(&messages::_0_WAS_EXPECTED, &[text]))
            }
        }
    }

    /// Node data covering every token consumed since `start`.
    fn node_data(&self, start: usize) -> NodeData {
        let tokens = self
            .tokens
            .get(start..self.index)
            .map(<[Token]>::to_vec)
            .unwrap_or_default();
        let pos = match self.tokens.get(start) {
            Some(token) => token.pos,
            None if start == self.tokens.len() => self.tokens.last().map_or(0, Token::end),
            None => 0,
        };
        let length = tokens.iter().map(Token::len).sum();
        NodeData::new(TextSpan::new(pos, length), tokens)
    }

    /// Widen `expr` to cover every token consumed since `start`, keeping its
    /// errors.
    fn rewrap(&self, mut expr: Expression, start: usize) -> Expression {
        let NodeData { span, tokens, .. } = self.node_data(start);
        let data = expr.data_mut();
        data.span = span;
        data.tokens = tokens;
        expr
    }

    // ========================================================================
    // Restore points
    // ========================================================================

    pub fn set_restore_point(&self) -> RestorePoint {
        RestorePoint::new(self.index)
    }

    /// Rewind the cursor to the checkpoint. Nodes built since are dropped by
    /// the caller.
    pub fn restore(&mut self, point: RestorePoint) {
        self.index = point.index;
    }

    pub fn commit(&mut self, point: RestorePoint) {
        debug_assert!(point.index <= self.index);
    }

    // ========================================================================
    // Recursion guard
    // ========================================================================

    fn guarded(&mut self, read: impl FnOnce(&mut Self) -> Expression) -> Expression {
        if self.recursion_depth >= self.max_recursion_depth {
            tracing::debug!(
                depth = self.recursion_depth,
                index = self.index,
                "expression nesting limit reached"
            );
            let mut data = self.node_data(self.index);
            data.add_error(NodeError::new(&messages::EXPRESSION_IS_TOO_DEEPLY_NESTED, &[]));
            return Expression::SimpleName(SimpleName {
                data,
                identifier: None,
            });
        }
        self.recursion_depth += 1;
        let expr = read(self);
        self.recursion_depth -= 1;
        expr
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Read expressions until the input is exhausted. Tokens that cannot
    /// start an expression are consumed one at a time as error literals.
    pub fn read_multi_expression(&mut self) -> MultiExpression {
        let start = self.index;
        let mut expressions = vec![self.read_expression()];
        let mut last_index = None;

        while !self.on_end() {
            if last_index == Some(self.index) {
                let token_start = self.index;
                if let Some(token) = self.read() {
                    tracing::trace!(index = token_start, text = %token.text, "forcing unexpected token");
                    let mut data = self.node_data(token_start);
                    data.add_error(NodeError::new(&messages::UNEXPECTED_TOKEN, &[]));
                    expressions.push(Expression::Literal(LiteralExpression {
                        data,
                        value: LiteralValue::String(token.text),
                    }));
                }
            }

            let expr_start = self.index;
            last_index = Some(expr_start);
            let mut extra = self.read_expression();
            tracing::trace!(index = expr_start, "extra expression without operator");
            extra.add_error(NodeError::new(
                &messages::OPERATOR_EXPECTED_BEFORE_THIS_EXPRESSION,
                &[],
            ));
            expressions.push(extra);
        }

        MultiExpression {
            data: self.node_data(start),
            expressions,
        }
    }

    /// Read a single expression starting at the first non-whitespace token.
    /// Tokens after the expression are left unread.
    pub fn read_expression(&mut self) -> Expression {
        self.guarded(|p| {
            let start = p.index;
            p.skip_whitespace();
            let expr = p.read_unsupported_operator_expression();
            p.rewrap(expr, start)
        })
    }

    // ========================================================================
    // Right-associative levels
    // ========================================================================

    fn read_unsupported_operator_expression(&mut self) -> Expression {
        let start = self.index;
        let first = self.read_assignment_expression();
        if self.peek_kind() != Some(SyntaxKind::UnsupportedOperatorToken) {
            return first;
        }
        let operator_text = self.read().map(|t| t.text).unwrap_or_default();
        let second = self.guarded(Self::read_unsupported_operator_expression);
        let mut data = self.node_data(start);
        data.add_error(NodeError::new(&messages::UNSUPPORTED_OPERATOR_0, &[&operator_text]));
        Expression::Binary(BinaryExpression {
            data,
            operator: SyntaxKind::UnsupportedOperatorToken,
            left: Box::new(first),
            right: Box::new(second),
        })
    }

    fn read_assignment_expression(&mut self) -> Expression {
        let start = self.index;
        let first = self.read_conditional_expression();
        if self.peek_kind() != Some(SyntaxKind::EqualsToken) {
            return first;
        }
        self.read();
        let second = self.guarded(Self::read_assignment_expression);
        Expression::Binary(BinaryExpression {
            data: self.node_data(start),
            operator: SyntaxKind::EqualsToken,
            left: Box::new(first),
            right: Box::new(second),
        })
    }

    fn read_conditional_expression(&mut self) -> Expression {
        let start = self.index;
        let condition = self.read_binary_expression(OperatorPrecedence::Lowest);
        if self.peek_kind() != Some(SyntaxKind::QuestionToken) {
            return condition;
        }
        self.read();
        let when_true = self.guarded(Self::read_conditional_expression);
        let error = self.expect_closing(SyntaxKind::ColonToken);
        let when_false = self.guarded(Self::read_conditional_expression);

        let mut data = self.node_data(start);
        data.errors.extend(error);
        Expression::Conditional(ConditionalExpression {
            data,
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        })
    }

    // ========================================================================
    // Binary operators
    // ========================================================================

    /// Precedence climbing over the left-associative operators.
    fn read_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression {
        let start = self.index;
        let mut left = self.read_unary_expression();

        loop {
            let Some(operator) = self.peek_kind() else {
                break;
            };
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }
            self.read();
            let right = self.read_binary_expression(precedence);
            left = Expression::Binary(BinaryExpression {
                data: self.node_data(start),
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        left
    }

    fn read_unary_expression(&mut self) -> Expression {
        let start = self.index;
        self.skip_whitespace();

        if let Some(operator) = self.peek_kind().filter(|k| k.is_unary_operator()) {
            let operator_text = self.read().map(|t| t.text).unwrap_or_default();
            let operand = self.guarded(Self::read_unary_expression);
            let mut data = self.node_data(start);
            if operator == SyntaxKind::UnsupportedOperatorToken {
                data.add_error(NodeError::new(
                    &messages::UNSUPPORTED_UNARY_OPERATOR_0,
                    &[&operator_text],
                ));
            }
            return Expression::Unary(UnaryExpression {
                data,
                operator,
                operand: Box::new(operand),
            });
        }

        let expr = self.read_identifier_expression(false);
        self.rewrap(expr, start)
    }

    // ========================================================================
    // Postfix chain
    // ========================================================================

    /// A primary expression followed by any run of `.member`, `(args)` and
    /// `[index]`. With `only_type_name`, only names and member access are
    /// accepted.
    fn read_identifier_expression(&mut self, only_type_name: bool) -> Expression {
        let start = self.index;
        let mut expression = if only_type_name {
            self.read_identifier_name().into()
        } else {
            self.read_atomic_expression()
        };

        let mut previous_index = None;
        while let Some(next) = self.peek_kind() {
            if previous_index == Some(self.index) {
                break;
            }
            previous_index = Some(self.index);
            expression = match next {
                SyntaxKind::DotToken => {
                    self.read();
                    let member_name = self.read_identifier_name();
                    Expression::MemberAccess(MemberAccessExpression {
                        data: self.node_data(start),
                        target: Box::new(expression),
                        member_name,
                    })
                }
                SyntaxKind::OpenParenToken if !only_type_name => {
                    self.read_function_call(start, expression)
                }
                SyntaxKind::OpenBracketToken if !only_type_name => {
                    self.read_array_access(start, expression)
                }
                _ => break,
            };
        }
        expression
    }

    fn read_array_access(&mut self, start: usize, target: Expression) -> Expression {
        self.read();
        let index = self.read_expression();
        let error = self.expect_closing(SyntaxKind::CloseBracketToken);
        self.skip_whitespace();

        let mut data = self.node_data(start);
        data.errors.extend(error);
        Expression::ArrayAccess(ArrayAccessExpression {
            data,
            target: Box::new(target),
            index: Box::new(index),
        })
    }

    fn read_function_call(&mut self, start: usize, target: Expression) -> Expression {
        self.read();
        self.skip_whitespace();

        let mut arguments: Vec<Expression> = Vec::new();
        let mut previous_index = None;
        while let Some(next) = self.peek_kind() {
            if next == SyntaxKind::CloseParenToken || previous_index == Some(self.index) {
                break;
            }
            previous_index = Some(self.index);
            if !arguments.is_empty() {
                self.skip_whitespace();
                if self.is_current_token_incorrect(SyntaxKind::CommaToken) {
                    let mut data = self.node_data(self.index);
                    data.add_error(NodeError::new(&messages::_0_WAS_EXPECTED, &[","]));
                    arguments.push(Expression::Literal(LiteralExpression {
                        data,
                        value: LiteralValue::Null,
                    }));
                } else {
                    self.read();
                }
            }
            arguments.push(self.read_expression());
        }

        let error = self.expect_closing(SyntaxKind::CloseParenToken);
        self.skip_whitespace();

        let mut data = self.node_data(start);
        data.errors.extend(error);
        Expression::FunctionCall(FunctionCallExpression {
            data,
            target: Box::new(target),
            arguments,
        })
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn read_atomic_expression(&mut self) -> Expression {
        let start = self.index;
        self.skip_whitespace();

        match self.peek_kind() {
            Some(SyntaxKind::OpenParenToken) => {
                self.read();
                let expression = self.read_expression();
                let error = self.expect_closing(SyntaxKind::CloseParenToken);
                self.skip_whitespace();

                let mut data = self.node_data(start);
                data.errors.extend(error);
                Expression::Parenthesized(ParenthesizedExpression {
                    data,
                    expression: Box::new(expression),
                })
            }
            Some(SyntaxKind::StringLiteral) => {
                let (value, errors) = self.peek().map(parse_string_literal).unwrap_or_default();
                self.read();
                self.skip_whitespace();

                let mut data = self.node_data(start);
                data.errors.extend(errors);
                Expression::Literal(LiteralExpression {
                    data,
                    value: LiteralValue::String(value),
                })
            }
            _ => {
                let expr = self.read_constant_expression();
                self.rewrap(expr, start)
            }
        }
    }

    /// `true`, `false`, `null`, a number, or a name.
    fn read_constant_expression(&mut self) -> Expression {
        let start = self.index;
        self.skip_whitespace();

        let literal = match self.peek() {
            Some(token) if token.kind == SyntaxKind::Identifier => match token.text.as_str() {
                "true" => Some((LiteralValue::Boolean(true), None)),
                "false" => Some((LiteralValue::Boolean(false), None)),
                "null" => Some((LiteralValue::Null, None)),
                _ => None,
            },
            Some(token) if token.kind == SyntaxKind::NumericLiteral => {
                Some(parse_number_literal(token))
            }
            _ => None,
        };
        let Some((value, errors)) = literal else {
            let name = self.read_identifier_name();
            return self.rewrap(name.into(), start);
        };

        self.read();
        self.skip_whitespace();
        let mut data = self.node_data(start);
        data.errors.extend(errors);
        Expression::Literal(LiteralExpression { data, value })
    }

    /// An identifier, possibly with generic arguments. A missing identifier
    /// yields an empty name carrying an error; nothing is consumed then
    /// except whitespace.
    fn read_identifier_name(&mut self) -> IdentifierName {
        let start = self.index;
        self.skip_whitespace();

        if let Some(identifier) = self.read_if(SyntaxKind::Identifier) {
            self.skip_whitespace();
            if self.peek_kind() == Some(SyntaxKind::LessThanToken) {
                return self.read_generic_arguments(start, identifier);
            }
            return IdentifierName::Simple(SimpleName {
                data: self.node_data(start),
                identifier: Some(identifier),
            });
        }

        let mut data = self.node_data(start);
        data.add_error(NodeError::new(&messages::IDENTIFIER_NAME_WAS_EXPECTED, &[]));
        IdentifierName::Simple(SimpleName {
            data,
            identifier: None,
        })
    }

    /// Try to read `<T1, T2, ...>` after `identifier`. When the bracket
    /// content is not a list of type names closed by `>`, the cursor is
    /// rewound to the `<` and a plain name is returned so that `<` is parsed
    /// as a comparison.
    fn read_generic_arguments(&mut self, start: usize, identifier: Token) -> IdentifierName {
        let point = self.set_restore_point();
        tracing::trace!(index = self.index, name = %identifier.text, "attempting generic arguments");
        self.read();

        let mut failure = false;
        let mut previous_index = None;
        let mut type_arguments = Vec::new();
        loop {
            if previous_index == Some(self.index) || self.on_end() {
                failure = true;
                break;
            }
            previous_index = Some(self.index);

            self.skip_whitespace();
            type_arguments.push(self.guarded(|p| p.read_identifier_expression(true)));
            self.skip_whitespace();

            if self.peek_kind() != Some(SyntaxKind::CommaToken) {
                break;
            }
            self.read();
        }
        failure |= self.peek_kind() != Some(SyntaxKind::GreaterThanToken);

        if failure {
            tracing::trace!(index = point.index(), name = %identifier.text, "generic arguments rolled back");
            self.restore(point);
            return IdentifierName::Simple(SimpleName {
                data: self.node_data(start),
                identifier: Some(identifier),
            });
        }

        self.read();
        self.commit(point);
        self.skip_whitespace();
        tracing::trace!(name = %identifier.text, count = type_arguments.len(), "generic arguments committed");
        IdentifierName::Generic(GenericName {
            data: self.node_data(start),
            identifier,
            type_arguments,
        })
    }

    // ========================================================================
    // Directives
    // ========================================================================

    /// A dotted type name, possibly generic. Calls, indexers and operators
    /// are not part of it.
    pub fn read_namespace_or_type_name(&mut self) -> Expression {
        self.read_identifier_expression(true)
    }

    /// `Alias = Namespace.Type` or a plain type name.
    pub fn read_directive_value(&mut self) -> Expression {
        let start = self.index;
        let mut first = self.read_namespace_or_type_name();

        let Some(token) = self.peek() else {
            return first;
        };
        if token.kind != SyntaxKind::EqualsToken {
            let text = token.text.clone();
            first.add_error(NodeError::new(
                &messages::UNEXPECTED_OPERATOR_0_EXPECTING_ASSIGNMENT,
                &[&text],
            ));
            return first;
        }

        self.read();
        let second = self.read_namespace_or_type_name();
        if !matches!(first, Expression::SimpleName(_)) {
            first.add_error(NodeError::new(&messages::ONLY_SIMPLE_NAME_IS_ALLOWED_AS_ALIAS, &[]));
        }
        Expression::Binary(BinaryExpression {
            data: self.node_data(start),
            operator: SyntaxKind::EqualsToken,
            left: Box::new(first),
            right: Box::new(second),
        })
    }

    /// `Namespace.Type` or `Namespace.Type, Assembly.Name`.
    pub fn read_directive_type_name(&mut self) -> Expression {
        let start = self.index;
        let mut type_name = self.read_namespace_or_type_name();

        let Some(token) = self.peek() else {
            return type_name;
        };
        if token.kind != SyntaxKind::CommaToken {
            let text = token.text.clone();
            type_name.add_error(NodeError::new(
                &messages::UNEXPECTED_OPERATOR_0_EXPECTING_COMMA_OR_END,
                &[&text],
            ));
            return type_name;
        }

        self.read();
        let assembly_name = self.read_namespace_or_type_name();
        if contains_generic_name(&assembly_name) {
            type_name.add_error(NodeError::new(
                &messages::GENERIC_NAME_IS_NOT_ALLOWED_IN_ASSEMBLY_NAME,
                &[],
            ));
        }
        Expression::AssemblyQualifiedName(AssemblyQualifiedName {
            data: self.node_data(start),
            type_name: Box::new(type_name),
            assembly_name: Box::new(assembly_name),
        })
    }
}

struct GenericNameFinder {
    found: bool,
}

impl AstVisitor for GenericNameFinder {
    fn visit_generic_name(&mut self, _node: &GenericName) {
        self.found = true;
    }
}

fn contains_generic_name(expr: &Expression) -> bool {
    let mut finder = GenericNameFinder { found: false };
    finder.visit_expression(expr);
    finder.found
}
