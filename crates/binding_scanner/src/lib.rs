//! binding_scanner: Lexer/tokenizer for binding expressions.
//!
//! The scanner never rejects input. Every character of the source ends up in
//! exactly one token, whitespace included, so concatenating the token texts
//! reproduces the source. Operator-like sequences outside the grammar become
//! `UnsupportedOperatorToken`s that the parser reports.

mod char_codes;
mod scanner;

pub use binding_ast::token::Token;
pub use scanner::{tokenize, Scanner};
