//! binding_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every error the scanner and parser can attach to a syntax node is defined
//! once in [`messages`]. Nodes carry [`NodeError`] values; a flattened view
//! with source spans is a [`DiagnosticCollection`] of [`Diagnostic`]s.

use binding_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// Diagnostic category. Every catalog entry is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 1104).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// An error recorded on a single syntax node.
///
/// Node errors describe defects local to the construction of the node that
/// owns them. They have no position of their own; the owning node's span is
/// attached when they are flattened into a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeError {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: String,
}

impl NodeError {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            code: message.code,
            category: message.category,
            message: format_message(message.message, args),
        }
    }

    /// Whether this error was created from the given catalog entry.
    pub fn is(&self, message: &DiagnosticMessage) -> bool {
        self.code == message.code
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    #[serde(rename = "message")]
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Attach the span of the node that owns `error`.
    pub fn from_node_error(error: &NodeError, span: TextSpan) -> Self {
        Self {
            file: None,
            span: Some(span),
            message_text: error.message.clone(),
            code: error.code,
            category: error.category,
        }
    }

    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} BND{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics gathered from a syntax tree.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Sort diagnostics by file and position. The sort is stable, so
    /// diagnostics at the same position keep their traversal order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Literal errors (1000-1099)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1001, Error, "Unterminated string literal.");
    pub const ESCAPE_CHARACTER_AT_END_OF_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "The escape character cannot be at the end of the string literal.");
    pub const ESCAPE_SEQUENCE_0_IS_NOT_SUPPORTED: DiagnosticMessage = diag!(1003, Error, "The escape sequence '\\{0}' is either not valid or not supported in bindings.");
    pub const NUMBER_LITERAL_TYPE_SUFFIX_IS_NOT_KNOWN: DiagnosticMessage = diag!(1010, Error, "Number literal type suffix is not known.");
    pub const NUMBER_0_IS_TOO_LARGE_FOR_INTEGRAL_LITERAL: DiagnosticMessage = diag!(1011, Error, "Number {0} is too large for an integral literal, try to append 'd' to make it a real number literal.");
    pub const COULD_NOT_PARSE_0_AS_NUMERIC_LITERAL: DiagnosticMessage = diag!(1012, Error, "Could not parse {0} as a numeric literal.");
    pub const COULD_NOT_PARSE_0_AS_1: DiagnosticMessage = diag!(1013, Error, "Could not parse {0} as {1}.");
    pub const REAL_NUMBER_CANNOT_HAVE_SUFFIX_0: DiagnosticMessage = diag!(1014, Error, "A real number literal cannot have the '{0}' suffix.");

    // ========================================================================
    // Expression errors (1100-1199)
    // ========================================================================
    pub const _0_WAS_EXPECTED: DiagnosticMessage = diag!(1100, Error, "The '{0}' was expected.");
    pub const IDENTIFIER_NAME_WAS_EXPECTED: DiagnosticMessage = diag!(1101, Error, "Identifier name was expected.");
    pub const OPERATOR_EXPECTED_BEFORE_THIS_EXPRESSION: DiagnosticMessage = diag!(1102, Error, "Operator expected before this expression.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1103, Error, "Unexpected token.");
    pub const UNSUPPORTED_OPERATOR_0: DiagnosticMessage = diag!(1104, Error, "Unsupported operator: {0}");
    pub const UNSUPPORTED_UNARY_OPERATOR_0: DiagnosticMessage = diag!(1105, Error, "Unsupported unary operator: {0}");
    pub const EXPRESSION_IS_TOO_DEEPLY_NESTED: DiagnosticMessage = diag!(1106, Error, "Expression is too deeply nested.");

    // ========================================================================
    // Directive errors (1200-1299)
    // ========================================================================
    pub const ONLY_SIMPLE_NAME_IS_ALLOWED_AS_ALIAS: DiagnosticMessage = diag!(1200, Error, "Only a simple name is allowed as an alias.");
    pub const UNEXPECTED_OPERATOR_0_EXPECTING_ASSIGNMENT: DiagnosticMessage = diag!(1201, Error, "Unexpected operator: '{0}', expecting assignment (=).");
    pub const GENERIC_NAME_IS_NOT_ALLOWED_IN_ASSEMBLY_NAME: DiagnosticMessage = diag!(1202, Error, "Generic identifier name is not allowed in assembly name.");
    pub const UNEXPECTED_OPERATOR_0_EXPECTING_COMMA_OR_END: DiagnosticMessage = diag!(1203, Error, "Unexpected operator: '{0}', expecting ',' or end.");
}
