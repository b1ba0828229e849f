//! binding_ast: Syntax tree definitions for binding expressions.
//!
//! This module defines the token and node types, the SyntaxKind enum, the
//! visitor used to walk finished trees and a plain-text tree printer.

pub mod generated;
pub mod node;
pub mod printer;
pub mod syntax_kind;
pub mod token;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use printer::TreePrinter;
pub use syntax_kind::SyntaxKind;
pub use token::Token;
pub use types::*;
pub use visitor::{collect_diagnostics, subtree_has_errors, AstVisitor};
