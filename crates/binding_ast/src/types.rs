//! Flag types attached to tokens.

bitflags::bitflags! {
    /// Lexical facts the scanner records about a token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                 = 0;
        /// A string literal with no closing quote.
        const UNTERMINATED         = 1 << 0;
        /// A string literal containing at least one backslash escape.
        const CONTAINS_ESCAPE      = 1 << 1;
        /// A numeric literal with an exponent part.
        const SCIENTIFIC           = 1 << 2;
        /// A numeric literal with a fractional part.
        const DECIMAL_POINT        = 1 << 3;
        /// A numeric literal starting with `0x`.
        const HEX_SPECIFIER        = 1 << 4;
        /// A whitespace token containing a line break.
        const LINE_BREAK           = 1 << 5;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::DECIMAL_POINT.bits()
            | Self::HEX_SPECIFIER.bits();
    }
}
