//! AST visitor trait for traversing binding expression trees.
//!
//! Provides the `AstVisitor` trait for customizable traversal, the `walk_*`
//! functions that implement the default descent, and the error-collection
//! helpers built on top of them.

use crate::node::*;
use binding_diagnostics::{Diagnostic, DiagnosticCollection};

/// A visitor that traverses the tree. Implement this trait to perform
/// operations on each node kind. Default implementations walk into children
/// in source order.
pub trait AstVisitor {
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_identifier_name(&mut self, name: &IdentifierName) {
        walk_identifier_name(self, name);
    }

    fn visit_literal(&mut self, _node: &LiteralExpression) {}

    fn visit_simple_name(&mut self, _node: &SimpleName) {}

    fn visit_generic_name(&mut self, node: &GenericName) {
        for arg in &node.type_arguments {
            self.visit_expression(arg);
        }
    }

    fn visit_member_access(&mut self, node: &MemberAccessExpression) {
        self.visit_expression(&node.target);
        self.visit_identifier_name(&node.member_name);
    }

    fn visit_array_access(&mut self, node: &ArrayAccessExpression) {
        self.visit_expression(&node.target);
        self.visit_expression(&node.index);
    }

    fn visit_function_call(&mut self, node: &FunctionCallExpression) {
        self.visit_expression(&node.target);
        for arg in &node.arguments {
            self.visit_expression(arg);
        }
    }

    fn visit_unary(&mut self, node: &UnaryExpression) {
        self.visit_expression(&node.operand);
    }

    fn visit_binary(&mut self, node: &BinaryExpression) {
        self.visit_expression(&node.left);
        self.visit_expression(&node.right);
    }

    fn visit_conditional(&mut self, node: &ConditionalExpression) {
        self.visit_expression(&node.condition);
        self.visit_expression(&node.when_true);
        self.visit_expression(&node.when_false);
    }

    fn visit_parenthesized(&mut self, node: &ParenthesizedExpression) {
        self.visit_expression(&node.expression);
    }

    fn visit_assembly_qualified_name(&mut self, node: &AssemblyQualifiedName) {
        self.visit_expression(&node.type_name);
        self.visit_expression(&node.assembly_name);
    }

    fn visit_multi_expression(&mut self, node: &MultiExpression) {
        for expr in &node.expressions {
            self.visit_expression(expr);
        }
    }
}

/// Dispatch `expr` to the matching `visit_*` method of `visitor`.
pub fn walk_expression<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Literal(n) => visitor.visit_literal(n),
        Expression::SimpleName(n) => visitor.visit_simple_name(n),
        Expression::GenericName(n) => visitor.visit_generic_name(n),
        Expression::MemberAccess(n) => visitor.visit_member_access(n),
        Expression::ArrayAccess(n) => visitor.visit_array_access(n),
        Expression::FunctionCall(n) => visitor.visit_function_call(n),
        Expression::Unary(n) => visitor.visit_unary(n),
        Expression::Binary(n) => visitor.visit_binary(n),
        Expression::Conditional(n) => visitor.visit_conditional(n),
        Expression::Parenthesized(n) => visitor.visit_parenthesized(n),
        Expression::AssemblyQualifiedName(n) => visitor.visit_assembly_qualified_name(n),
        Expression::Multi(n) => visitor.visit_multi_expression(n),
    }
}

pub fn walk_identifier_name<V: AstVisitor + ?Sized>(visitor: &mut V, name: &IdentifierName) {
    match name {
        IdentifierName::Simple(n) => visitor.visit_simple_name(n),
        IdentifierName::Generic(n) => visitor.visit_generic_name(n),
    }
}

// ============================================================================
// Error collection
// ============================================================================

/// Gathers node errors in pre-order: a node's own errors come before the
/// errors of its children, children in source order.
struct DiagnosticCollector {
    diagnostics: DiagnosticCollection,
}

impl DiagnosticCollector {
    fn record(&mut self, data: &NodeData) {
        for error in &data.errors {
            self.diagnostics
                .add(Diagnostic::from_node_error(error, data.span));
        }
    }
}

impl AstVisitor for DiagnosticCollector {
    fn visit_expression(&mut self, expr: &Expression) {
        self.record(expr.data());
        walk_expression(self, expr);
    }

    fn visit_identifier_name(&mut self, name: &IdentifierName) {
        self.record(name.data());
        walk_identifier_name(self, name);
    }
}

/// Flatten the errors of every node in the tree, each with the span of the
/// node that owns it.
pub fn collect_diagnostics(root: &Expression) -> DiagnosticCollection {
    let mut collector = DiagnosticCollector {
        diagnostics: DiagnosticCollection::new(),
    };
    collector.visit_expression(root);
    collector.diagnostics
}

struct ErrorFinder {
    found: bool,
}

impl AstVisitor for ErrorFinder {
    fn visit_expression(&mut self, expr: &Expression) {
        if self.found {
            return;
        }
        self.found = expr.has_node_errors();
        walk_expression(self, expr);
    }

    fn visit_identifier_name(&mut self, name: &IdentifierName) {
        if self.found {
            return;
        }
        self.found = name.data().has_errors();
        walk_identifier_name(self, name);
    }
}

/// Whether any node in the tree carries an error.
pub fn subtree_has_errors(root: &Expression) -> bool {
    let mut finder = ErrorFinder { found: false };
    finder.visit_expression(root);
    finder.found
}
