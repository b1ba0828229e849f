//! Plain-text dump of a syntax tree.
//!
//! Each node prints on its own line as `Kind detail start..end "source"`,
//! followed by its own errors, followed by its children one level deeper.

use crate::node::*;
use crate::visitor::{walk_expression, walk_identifier_name, AstVisitor};

/// Options for the tree printer.
pub struct PrinterOptions {
    /// Indentation string for one nesting level.
    pub indent_str: String,
    /// Whether to print the reconstructed source of each node.
    pub show_source: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            show_source: true,
        }
    }
}

pub struct TreePrinter {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(256),
            indent_level: 0,
            options,
        }
    }

    /// Print a tree to a string.
    pub fn print(mut self, root: &Expression) -> String {
        self.visit_expression(root);
        self.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn write_node(&mut self, kind: &str, detail: Option<String>, data: &NodeData) {
        self.write_indent();
        self.output.push_str(kind);
        if let Some(detail) = detail {
            self.output.push(' ');
            self.output.push_str(&detail);
        }
        self.output.push_str(&format!(" {:?}", data.span));
        if self.options.show_source {
            self.output
                .push_str(&format!(" {:?}", data.display_text()));
        }
        self.output.push('\n');
        for error in &data.errors {
            self.write_indent();
            self.output.push_str(&self.options.indent_str);
            self.output
                .push_str(&format!("! {} BND{}: {}\n", error.category, error.code, error));
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn detail_of(expr: &Expression) -> Option<String> {
    match expr {
        Expression::Literal(n) => Some(format!("{}: {:?}", n.value.type_name(), n.value)),
        Expression::SimpleName(n) => Some(n.name().unwrap_or("<missing>").to_string()),
        Expression::GenericName(n) => Some(n.name().to_string()),
        Expression::Unary(n) => Some(operator_text(n.operator, &n.data)),
        Expression::Binary(n) => Some(operator_text(n.operator, &n.data)),
        _ => None,
    }
}

/// The operator's punctuation, or the raw text for unsupported operators.
fn operator_text(kind: crate::SyntaxKind, data: &NodeData) -> String {
    match kind.punctuation_text() {
        Some(text) => text.to_string(),
        None => data
            .tokens
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.text.clone())
            .unwrap_or_else(|| kind.to_string()),
    }
}

impl AstVisitor for TreePrinter {
    fn visit_expression(&mut self, expr: &Expression) {
        let kind = expr.kind().to_string();
        self.write_node(&kind, detail_of(expr), expr.data());
        self.indent_level += 1;
        walk_expression(self, expr);
        self.indent_level -= 1;
    }

    fn visit_identifier_name(&mut self, name: &IdentifierName) {
        let detail = name.name().unwrap_or("<missing>").to_string();
        let kind = name.kind().to_string();
        self.write_node(&kind, Some(detail), name.data());
        self.indent_level += 1;
        walk_identifier_name(self, name);
        self.indent_level -= 1;
    }
}
