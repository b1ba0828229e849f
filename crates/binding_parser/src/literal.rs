//! Value parsing for numeric and string literal tokens.

use binding_ast::node::LiteralValue;
use binding_ast::token::Token;
use binding_ast::types::TokenFlags;
use binding_diagnostics::{messages, NodeError};

/// Type suffix of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberSuffix {
    None,
    Unsigned,
    Long,
    UnsignedLong,
    Float,
    Double,
    Decimal,
}

impl NumberSuffix {
    fn is_real(self) -> bool {
        matches!(self, NumberSuffix::Float | NumberSuffix::Double | NumberSuffix::Decimal)
    }

    fn text(self) -> &'static str {
        match self {
            NumberSuffix::None => "",
            NumberSuffix::Unsigned => "u",
            NumberSuffix::Long => "l",
            NumberSuffix::UnsignedLong => "ul",
            NumberSuffix::Float => "f",
            NumberSuffix::Double => "d",
            NumberSuffix::Decimal => "m",
        }
    }
}

/// Parse the value of a numeric literal token.
///
/// On failure the value is `Null` and the error describes why.
pub fn parse_number_literal(token: &Token) -> (LiteralValue, Option<NodeError>) {
    let text = token.text.to_ascii_lowercase();
    let is_hex = token.flags.contains(TokenFlags::HEX_SPECIFIER) || text.starts_with("0x");

    let Some((body, suffix)) = split_suffix(&text, is_hex) else {
        return (
            LiteralValue::Null,
            Some(NodeError::new(&messages::NUMBER_LITERAL_TYPE_SUFFIX_IS_NOT_KNOWN, &[])),
        );
    };

    if !is_hex && (body.contains('.') || body.contains('e') || suffix.is_real()) {
        return parse_real(&token.text, body, suffix);
    }

    let value = if is_hex {
        parse_hex_integral(&body[2..], suffix)
    } else {
        parse_integral(body, suffix)
    };
    if let Some(value) = value {
        return (value, None);
    }

    let too_large = if is_hex {
        body.len() > 2 && body[2..].bytes().all(|b| b.is_ascii_hexdigit())
    } else {
        !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit())
    };
    let error = if too_large {
        NodeError::new(&messages::NUMBER_0_IS_TOO_LARGE_FOR_INTEGRAL_LITERAL, &[&token.text])
    } else {
        NodeError::new(&messages::COULD_NOT_PARSE_0_AS_NUMERIC_LITERAL, &[&token.text])
    };
    (LiteralValue::Null, Some(error))
}

/// Split a lowercase literal into its digits and type suffix. `None` when the
/// trailing letter is not a known suffix.
fn split_suffix(text: &str, is_hex: bool) -> Option<(&str, NumberSuffix)> {
    if text.ends_with("ul") || text.ends_with("lu") {
        return Some((&text[..text.len() - 2], NumberSuffix::UnsignedLong));
    }
    let Some(last) = text.chars().last() else {
        return Some((text, NumberSuffix::None));
    };
    if !last.is_ascii_alphabetic() || (is_hex && (last.is_ascii_hexdigit() || text.len() == 2)) {
        return Some((text, NumberSuffix::None));
    }
    let suffix = match last {
        'u' => NumberSuffix::Unsigned,
        'l' => NumberSuffix::Long,
        'f' => NumberSuffix::Float,
        'd' => NumberSuffix::Double,
        'm' => NumberSuffix::Decimal,
        _ => return None,
    };
    if is_hex && suffix.is_real() {
        return None;
    }
    Some((&text[..text.len() - 1], suffix))
}

fn parse_real(source: &str, body: &str, suffix: NumberSuffix) -> (LiteralValue, Option<NodeError>) {
    match suffix {
        NumberSuffix::Unsigned | NumberSuffix::Long | NumberSuffix::UnsignedLong => (
            LiteralValue::Null,
            Some(NodeError::new(&messages::REAL_NUMBER_CANNOT_HAVE_SUFFIX_0, &[suffix.text()])),
        ),
        NumberSuffix::Float => match body.parse::<f32>() {
            Ok(value) if value.is_finite() => (LiteralValue::Single(value), None),
            _ => (LiteralValue::Null, Some(could_not_parse(source, "float"))),
        },
        NumberSuffix::Decimal => match body.parse::<f64>() {
            Ok(value) if value.is_finite() => (LiteralValue::Decimal(body.to_string()), None),
            _ => (LiteralValue::Null, Some(could_not_parse(source, "decimal"))),
        },
        NumberSuffix::None | NumberSuffix::Double => match body.parse::<f64>() {
            Ok(value) if value.is_finite() => (LiteralValue::Double(value), None),
            _ => (LiteralValue::Null, Some(could_not_parse(source, "double"))),
        },
    }
}

fn could_not_parse(source: &str, type_name: &str) -> NodeError {
    NodeError::new(&messages::COULD_NOT_PARSE_0_AS_1, &[source, type_name])
}

/// The integral ladder: the narrowest type allowed by the suffix that holds
/// the value.
fn parse_integral(body: &str, suffix: NumberSuffix) -> Option<LiteralValue> {
    match suffix {
        NumberSuffix::None => body
            .parse::<i32>()
            .map(LiteralValue::Int32)
            .or_else(|_| body.parse::<u32>().map(LiteralValue::UInt32))
            .or_else(|_| body.parse::<i64>().map(LiteralValue::Int64))
            .or_else(|_| body.parse::<u64>().map(LiteralValue::UInt64))
            .ok(),
        NumberSuffix::Unsigned => body
            .parse::<u32>()
            .map(LiteralValue::UInt32)
            .or_else(|_| body.parse::<u64>().map(LiteralValue::UInt64))
            .ok(),
        NumberSuffix::Long => body
            .parse::<i64>()
            .map(LiteralValue::Int64)
            .or_else(|_| body.parse::<u64>().map(LiteralValue::UInt64))
            .ok(),
        NumberSuffix::UnsignedLong => body.parse::<u64>().map(LiteralValue::UInt64).ok(),
        _ => None,
    }
}

fn parse_hex_integral(digits: &str, suffix: NumberSuffix) -> Option<LiteralValue> {
    let value = u64::from_str_radix(digits, 16).ok()?;
    let fits_i32 = i32::try_from(value).ok();
    let fits_u32 = u32::try_from(value).ok();
    let fits_i64 = i64::try_from(value).ok();
    match suffix {
        NumberSuffix::None => fits_i32
            .map(LiteralValue::Int32)
            .or(fits_u32.map(LiteralValue::UInt32))
            .or(fits_i64.map(LiteralValue::Int64))
            .or(Some(LiteralValue::UInt64(value))),
        NumberSuffix::Unsigned => fits_u32
            .map(LiteralValue::UInt32)
            .or(Some(LiteralValue::UInt64(value))),
        NumberSuffix::Long => fits_i64
            .map(LiteralValue::Int64)
            .or(Some(LiteralValue::UInt64(value))),
        NumberSuffix::UnsignedLong => Some(LiteralValue::UInt64(value)),
        _ => None,
    }
}

/// Parse the value of a string literal token: strip the quotes and resolve
/// escape sequences.
pub fn parse_string_literal(token: &Token) -> (String, Vec<NodeError>) {
    let mut errors = Vec::new();
    let text = token.text.as_str();
    let unterminated = token.flags.contains(TokenFlags::UNTERMINATED) || !is_closed(text);

    let inner = match text.char_indices().nth(1) {
        Some((start, _)) if unterminated => &text[start..],
        Some((start, _)) => &text[start..text.len() - 1],
        None => "",
    };
    if unterminated {
        errors.push(NodeError::new(&messages::UNTERMINATED_STRING_LITERAL, &[]));
    }

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            None => errors.push(NodeError::new(
                &messages::ESCAPE_CHARACTER_AT_END_OF_STRING_LITERAL,
                &[],
            )),
            Some(c @ ('\'' | '"' | '\\')) => value.push(c),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some(other) => errors.push(NodeError::new(
                &messages::ESCAPE_SEQUENCE_0_IS_NOT_SUPPORTED,
                &[&other.to_string()],
            )),
        }
    }
    (value, errors)
}

/// Whether the literal ends with its opening quote character, and that quote
/// is not escaped.
fn is_closed(text: &str) -> bool {
    let Some(quote) = text.chars().next() else {
        return false;
    };
    if text.len() < 2 || !text.ends_with(quote) {
        return false;
    }
    let backslashes = text[1..text.len() - 1]
        .bytes()
        .rev()
        .take_while(|&b| b == b'\\')
        .count();
    backslashes % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use binding_ast::syntax_kind::SyntaxKind;

    fn number(text: &str) -> (LiteralValue, Option<NodeError>) {
        let mut flags = TokenFlags::NONE;
        if text.to_ascii_lowercase().starts_with("0x") {
            flags |= TokenFlags::HEX_SPECIFIER;
        }
        parse_number_literal(&Token::new(SyntaxKind::NumericLiteral, text, 0, 0).with_flags(flags))
    }

    fn string(text: &str) -> (String, Vec<NodeError>) {
        parse_string_literal(&Token::new(SyntaxKind::StringLiteral, text, 0, 0))
    }

    #[test]
    fn test_integral_ladder() {
        assert_eq!(number("12").0, LiteralValue::Int32(12));
        assert_eq!(number("3000000000").0, LiteralValue::UInt32(3_000_000_000));
        assert_eq!(number("9223372036854775807").0, LiteralValue::Int64(i64::MAX));
        assert_eq!(number("18446744073709551615").0, LiteralValue::UInt64(u64::MAX));
    }

    #[test]
    fn test_integral_suffixes() {
        assert_eq!(number("42L").0, LiteralValue::Int64(42));
        assert_eq!(number("42u").0, LiteralValue::UInt32(42));
        assert_eq!(number("42UL").0, LiteralValue::UInt64(42));
        assert_eq!(number("42lu").0, LiteralValue::UInt64(42));
    }

    #[test]
    fn test_real_numbers() {
        assert_eq!(number("12.45").0, LiteralValue::Double(12.45));
        assert_eq!(number("42f").0, LiteralValue::Single(42.0));
        assert_eq!(number("42d").0, LiteralValue::Double(42.0));
        assert_eq!(number("1e3").0, LiteralValue::Double(1000.0));
        assert_eq!(number("1.5m").0, LiteralValue::Decimal("1.5".to_string()));
    }

    #[test]
    fn test_real_number_with_integral_suffix() {
        let (value, error) = number("1.5u");
        assert!(value.is_null());
        assert!(error.is_some_and(|e| e.is(&messages::REAL_NUMBER_CANNOT_HAVE_SUFFIX_0)));
    }

    #[test]
    fn test_unknown_suffix() {
        let (value, error) = number("12x");
        assert!(value.is_null());
        assert!(error.is_some_and(|e| e.is(&messages::NUMBER_LITERAL_TYPE_SUFFIX_IS_NOT_KNOWN)));
    }

    #[test]
    fn test_too_large() {
        let (value, error) = number("184467440737095516150");
        assert!(value.is_null());
        assert!(error.is_some_and(|e| e.is(&messages::NUMBER_0_IS_TOO_LARGE_FOR_INTEGRAL_LITERAL)));

        let (_, error) = number("1844674407370955161500u");
        assert!(error.is_some_and(|e| e.is(&messages::NUMBER_0_IS_TOO_LARGE_FOR_INTEGRAL_LITERAL)));
    }

    #[test]
    fn test_hex_literals() {
        assert_eq!(number("0x1F").0, LiteralValue::Int32(31));
        assert_eq!(number("0xFFFFFFFF").0, LiteralValue::UInt32(u32::MAX));
        assert_eq!(number("0xFFul").0, LiteralValue::UInt64(255));
        assert_eq!(number("0xad").0, LiteralValue::Int32(0xad));
        let (_, error) = number("0x1FFFFFFFFFFFFFFFF");
        assert!(error.is_some_and(|e| e.is(&messages::NUMBER_0_IS_TOO_LARGE_FOR_INTEGRAL_LITERAL)));
        let (value, error) = number("0x");
        assert!(value.is_null());
        assert!(error.is_some_and(|e| e.is(&messages::COULD_NOT_PARSE_0_AS_NUMERIC_LITERAL)));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(string(r#""help\"help""#), ("help\"help".to_string(), vec![]));
        assert_eq!(string(r"'help\nhelp'").0, "help\nhelp");
        assert_eq!(string(r"'a\tb\rc\\d\'e'").0, "a\tb\rc\\d'e");
        assert_eq!(string("''").0, "");
    }

    #[test]
    fn test_unsupported_escape() {
        let (value, errors) = string(r"'a\qb'");
        assert_eq!(value, "ab");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is(&messages::ESCAPE_SEQUENCE_0_IS_NOT_SUPPORTED));
        assert!(errors[0].message.contains("\\q"));
    }

    #[test]
    fn test_unterminated_string() {
        let (value, errors) = string("'abc");
        assert_eq!(value, "abc");
        assert!(errors[0].is(&messages::UNTERMINATED_STRING_LITERAL));

        let (value, errors) = string(r"'abc\");
        assert_eq!(value, "abc");
        assert!(errors.iter().any(|e| e.is(&messages::ESCAPE_CHARACTER_AT_END_OF_STRING_LITERAL)));

        let (value, errors) = string(r"'abc\'");
        assert_eq!(value, "abc'");
        assert!(errors[0].is(&messages::UNTERMINATED_STRING_LITERAL));

        let (value, errors) = string("'");
        assert_eq!(value, "");
        assert!(errors[0].is(&messages::UNTERMINATED_STRING_LITERAL));
    }
}
