//! Rich diagnostics rendered with miette.
//!
//! Converts parser diagnostics into miette reports showing the binding
//! source with a label under the offending node.

// Fields are read by the derive macros only.
#![allow(unused_assignments)]

use binding_diagnostics::Diagnostic as BindingDiagnostic;
use miette::{Diagnostic, SourceSpan};

#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(bindc::parse), severity(Error))]
pub struct ParseDiagnostic {
    pub message: String,
    #[source_code]
    pub src: miette::NamedSource<String>,
    #[label("{label}")]
    pub span: SourceSpan,
    pub label: String,
}

impl ParseDiagnostic {
    /// Create a report for `diagnostic`, which was produced from `source`.
    pub fn from_binding_diagnostic(diagnostic: &BindingDiagnostic, name: &str, source: &str) -> Self {
        let label = format!("BND{} here", diagnostic.code);
        let (offset, length) = diagnostic
            .span
            .map(|span| (span.start as usize, span.length as usize))
            .unwrap_or((0, 0));

        Self {
            message: diagnostic.message_text.clone(),
            src: miette::NamedSource::new(name, source.to_string()),
            span: (offset, length).into(),
            label,
        }
    }
}
