//! The binding expression scanner.
//!
//! Converts source text into a stream of tokens that the parser consumes.
//! Positions are byte offsets into the source.

use crate::char_codes::*;
use binding_ast::syntax_kind::SyntaxKind;
use binding_ast::token::Token;
use binding_ast::types::TokenFlags;

/// The scanner converts binding expression text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token.
    token_start: usize,
    /// Line on which the current token starts.
    token_line: u32,
    /// Line at the current position.
    line: u32,
    /// The current token kind.
    token: SyntaxKind,
    /// Token flags for the current token.
    token_flags: TokenFlags,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            token_start: 0,
            token_line: 0,
            line: 0,
            token: SyntaxKind::EndOfFileToken,
            token_flags: TokenFlags::NONE,
        }
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the start position of the current token.
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the raw source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Get an owned Token for the current token.
    pub fn token_info(&self) -> Token {
        Token::new(
            self.token,
            self.token_text(),
            self.token_start as u32,
            self.token_line,
        )
        .with_flags(self.token_flags)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Look at the byte at position pos + offset. Only used for ASCII lookahead.
    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Advance while `pred` holds for the current character.
    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.current_char() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_start = self.pos;
        self.token_line = self.line;

        let ch = match self.current_char() {
            Some(ch) => ch,
            None => {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            }
        };

        self.token = match ch {
            '(' => { self.pos += 1; SyntaxKind::OpenParenToken }
            ')' => { self.pos += 1; SyntaxKind::CloseParenToken }
            '[' => { self.pos += 1; SyntaxKind::OpenBracketToken }
            ']' => { self.pos += 1; SyntaxKind::CloseBracketToken }
            ',' => { self.pos += 1; SyntaxKind::CommaToken }
            '.' => { self.pos += 1; SyntaxKind::DotToken }
            ':' => { self.pos += 1; SyntaxKind::ColonToken }

            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_operator(SyntaxKind::PlusToken, 1),
            '-' => self.scan_minus(),
            '*' => self.scan_operator(SyntaxKind::AsteriskToken, 1),
            '/' => self.scan_operator(SyntaxKind::SlashToken, 1),
            '%' => self.scan_operator(SyntaxKind::PercentToken, 1),
            '&' => self.scan_ampersand(),
            '|' => self.scan_bar(),
            '^' | '~' => self.scan_unsupported_run(1),

            '\'' | '"' => self.scan_string_literal(ch),

            '0'..='9' => self.scan_number(),

            _ if is_white_space(ch) => self.scan_white_space(),

            _ if is_identifier_start(ch) => {
                self.skip_while(is_identifier_part);
                SyntaxKind::Identifier
            }

            _ => {
                self.pos += ch.len_utf8();
                tracing::trace!(pos = self.token_start, ch = %ch, "unrecognized character");
                SyntaxKind::UnsupportedOperatorToken
            }
        };

        self.line += count_line_breaks(self.token_text());
        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_white_space(&mut self) -> SyntaxKind {
        self.skip_while(is_white_space);
        if self.token_text().chars().any(is_line_break) {
            self.token_flags |= TokenFlags::LINE_BREAK;
        }
        SyntaxKind::WhitespaceTrivia
    }

    /// Consume a supported operator of `len` bytes. If operator glue follows,
    /// the whole run becomes one unsupported operator (`+=`, `&&=`, `&^`).
    fn scan_operator(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        if self.current_char().map_or(false, is_operator_glue) {
            self.skip_while(is_operator_glue);
            SyntaxKind::UnsupportedOperatorToken
        } else {
            kind
        }
    }

    /// Consume `len` bytes plus any following operator glue as one
    /// unsupported operator.
    fn scan_unsupported_run(&mut self, len: usize) -> SyntaxKind {
        self.pos += len;
        self.skip_while(is_operator_glue);
        SyntaxKind::UnsupportedOperatorToken
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'?') {
            if self.byte_at(2) == Some(b'=') {
                self.scan_unsupported_run(3)
            } else {
                self.pos += 2;
                SyntaxKind::QuestionQuestionToken
            }
        } else {
            self.pos += 1;
            SyntaxKind::QuestionToken
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match self.byte_at(1) {
            Some(b'=') => self.scan_operator(SyntaxKind::LessThanEqualsToken, 2),
            Some(b'<') => self.scan_unsupported_run(2),
            _ => {
                self.pos += 1;
                SyntaxKind::LessThanToken
            }
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        // `>>` stays two tokens so nested generic argument lists can close.
        if self.byte_at(1) == Some(b'=') {
            self.pos += 2;
            SyntaxKind::GreaterThanEqualsToken
        } else {
            self.pos += 1;
            SyntaxKind::GreaterThanToken
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match self.byte_at(1) {
            Some(b'=') => self.scan_operator(SyntaxKind::EqualsEqualsToken, 2),
            Some(b'>') => self.scan_unsupported_run(2),
            _ => self.scan_operator(SyntaxKind::EqualsToken, 1),
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'=') {
            self.scan_operator(SyntaxKind::ExclamationEqualsToken, 2)
        } else {
            self.pos += 1;
            SyntaxKind::ExclamationToken
        }
    }

    fn scan_minus(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'-') {
            self.scan_unsupported_run(2)
        } else {
            self.scan_operator(SyntaxKind::MinusToken, 1)
        }
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'&') {
            self.scan_operator(SyntaxKind::AmpersandAmpersandToken, 2)
        } else {
            self.scan_operator(SyntaxKind::AmpersandToken, 1)
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'|') {
            self.scan_operator(SyntaxKind::BarBarToken, 2)
        } else {
            self.scan_operator(SyntaxKind::BarToken, 1)
        }
    }

    /// Scan a numeric token. Only the shape is checked here; the parser
    /// validates suffixes and ranges.
    fn scan_number(&mut self) -> SyntaxKind {
        if self.byte_at(0) == Some(b'0')
            && matches!(self.byte_at(1), Some(b'x' | b'X'))
            && self.byte_at(2).map_or(false, |b| b.is_ascii_hexdigit())
        {
            self.pos += 2;
            self.skip_while(is_hex_digit);
            self.token_flags |= TokenFlags::HEX_SPECIFIER;
            self.skip_while(is_identifier_part);
            return SyntaxKind::NumericLiteral;
        }

        self.skip_while(is_digit);

        // A dot belongs to the number only when a digit follows: `42.ToString()`.
        if self.byte_at(0) == Some(b'.') && self.byte_at(1).map_or(false, |b| b.is_ascii_digit()) {
            self.pos += 1;
            self.skip_while(is_digit);
            self.token_flags |= TokenFlags::DECIMAL_POINT;
        }

        if matches!(self.byte_at(0), Some(b'e' | b'E')) {
            let digit_at = if matches!(self.byte_at(1), Some(b'+' | b'-')) { 2 } else { 1 };
            if self.byte_at(digit_at).map_or(false, |b| b.is_ascii_digit()) {
                self.pos += digit_at;
                self.skip_while(is_digit);
                self.token_flags |= TokenFlags::SCIENTIFIC;
            }
        }

        // Type suffix letters, and anything else glued to the number.
        self.skip_while(is_identifier_part);
        SyntaxKind::NumericLiteral
    }

    /// Scan a single- or double-quoted string. The token text keeps the
    /// quotes and the escapes; the parser decodes them.
    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        let quote = quote as u8;
        self.pos += 1; // skip opening quote
        loop {
            let rest = &self.text.as_bytes()[self.pos..];
            match memchr::memchr2(quote, b'\\', rest) {
                None => {
                    self.pos = self.text.len();
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    break;
                }
                Some(offset) if rest[offset] == b'\\' => {
                    self.token_flags |= TokenFlags::CONTAINS_ESCAPE;
                    self.pos += offset + 1;
                    if let Some(escaped) = self.current_char() {
                        self.pos += escaped.len_utf8();
                    }
                }
                Some(offset) => {
                    self.pos += offset + 1;
                    break;
                }
            }
        }
        SyntaxKind::StringLiteral
    }
}

/// Scan `text` into a complete token vector. The end-of-file marker is not
/// included.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    while scanner.scan() != SyntaxKind::EndOfFileToken {
        tokens.push(scanner.token_info());
    }
    tracing::trace!(count = tokens.len(), "tokenized binding expression");
    tokens
}
