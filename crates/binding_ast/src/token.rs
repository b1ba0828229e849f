//! Tokens produced by the scanner and owned by syntax nodes.

use crate::syntax_kind::SyntaxKind;
use crate::types::TokenFlags;
use binding_core::text::TextSpan;

/// A scanned token. Whitespace is kept as `WhitespaceTrivia` tokens so the
/// token stream reproduces the source exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// The raw source text of the token.
    pub text: String,
    /// Start position in the source text, in bytes.
    pub pos: u32,
    /// 0-based line on which the token starts.
    pub line: u32,
    /// Lexical flags (unterminated string, hex specifier, ...).
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, pos: u32, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            pos,
            line,
            flags: TokenFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The length of this token in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// End position in the source text (exclusive).
    #[inline]
    pub fn end(&self) -> u32 {
        self.pos + self.len()
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.pos, self.len())
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}
