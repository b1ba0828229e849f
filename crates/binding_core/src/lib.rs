//! binding_core: Core utilities shared by the binding expression toolchain.
//!
//! Provides source text spans and line maps used by tokens, syntax nodes
//! and diagnostics.

pub mod text;

pub use text::{LineAndColumn, LineMap, TextSpan};
