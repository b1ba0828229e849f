//! Parser integration tests.
//!
//! Verifies that the parser builds the expected trees, spans and errors for
//! binding expressions, including malformed ones.

use binding_ast::node::*;
use binding_ast::syntax_kind::SyntaxKind;
use binding_ast::visitor::{collect_diagnostics, subtree_has_errors};
use binding_diagnostics::messages;
use binding_options::{ParseMode, ParserOptions};
use binding_parser::{
    parse_directive_type_name, parse_directive_value, parse_expression, parse_with_options,
    DirectiveError, Parser,
};

/// Helper: parse one expression and assert that the whole input was read.
fn parse_all(source: &str) -> Expression {
    let mut parser = Parser::new(source);
    let node = parser.read_expression();
    assert!(parser.on_end(), "input not fully consumed: {:?}", source);
    node
}

fn binary(expr: &Expression) -> &BinaryExpression {
    match expr {
        Expression::Binary(node) => node,
        other => panic!("expected BinaryExpression, got {}", other.kind()),
    }
}

fn unary(expr: &Expression) -> &UnaryExpression {
    match expr {
        Expression::Unary(node) => node,
        other => panic!("expected UnaryExpression, got {}", other.kind()),
    }
}

fn member_access(expr: &Expression) -> &MemberAccessExpression {
    match expr {
        Expression::MemberAccess(node) => node,
        other => panic!("expected MemberAccessExpression, got {}", other.kind()),
    }
}

fn function_call(expr: &Expression) -> &FunctionCallExpression {
    match expr {
        Expression::FunctionCall(node) => node,
        other => panic!("expected FunctionCallExpression, got {}", other.kind()),
    }
}

fn array_access(expr: &Expression) -> &ArrayAccessExpression {
    match expr {
        Expression::ArrayAccess(node) => node,
        other => panic!("expected ArrayAccessExpression, got {}", other.kind()),
    }
}

fn literal(expr: &Expression) -> &LiteralValue {
    match expr {
        Expression::Literal(node) => &node.value,
        other => panic!("expected LiteralExpression, got {}", other.kind()),
    }
}

fn generic(name: &IdentifierName) -> &GenericName {
    match name {
        IdentifierName::Generic(node) => node,
        IdentifierName::Simple(node) => panic!("expected GenericName, got {:?}", node.name()),
    }
}

/// Helper: assert a binary node's operator and operand kinds.
fn check_binary(expr: &Expression, operator: SyntaxKind, left: SyntaxKind, right: SyntaxKind) {
    let node = binary(expr);
    assert_eq!(node.operator, operator);
    assert_eq!(node.left.kind(), left, "left operand of {:?}", expr.to_display_string());
    assert_eq!(node.right.kind(), right, "right operand of {:?}", expr.to_display_string());
}

fn token_kinds(tokens: &[binding_ast::Token]) -> Vec<SyntaxKind> {
    tokens.iter().map(|t| t.kind).collect()
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_boolean_and_null_literals() {
    assert_eq!(literal(&parse_all("true")), &LiteralValue::Boolean(true));
    assert_eq!(literal(&parse_all("false ")), &LiteralValue::Boolean(false));
    assert_eq!(literal(&parse_all(" null")), &LiteralValue::Null);
}

#[test]
fn test_string_literals() {
    assert_eq!(
        literal(&parse_all(r#""help\"help""#)),
        &LiteralValue::String("help\"help".to_string())
    );
    assert_eq!(
        literal(&parse_all(r"'help\nhelp'")),
        &LiteralValue::String("help\nhelp".to_string())
    );
}

#[test]
fn test_unterminated_string_literal() {
    let node = parse_all("'abc + d");
    assert_eq!(literal(&node), &LiteralValue::String("abc + d".to_string()));
    assert!(node.errors()[0].is(&messages::UNTERMINATED_STRING_LITERAL));
}

#[test]
fn test_numeric_literals() {
    assert_eq!(literal(&parse_all("12")), &LiteralValue::Int32(12));
    assert_eq!(literal(&parse_all("12.45")), &LiteralValue::Double(12.45));
    assert_eq!(literal(&parse_all("42f")), &LiteralValue::Single(42.0));
    assert_eq!(
        literal(&parse_all(&i64::MAX.to_string())),
        &LiteralValue::Int64(i64::MAX)
    );
    assert_eq!(literal(&parse_all("42L")), &LiteralValue::Int64(42));
    assert_eq!(literal(&parse_all("0xFFul")), &LiteralValue::UInt64(255));
}

#[test]
fn test_numeric_literal_too_large() {
    let node = parse_all("123456789012345678901234567890");
    assert!(literal(&node).is_null());
    assert!(node.errors()[0].is(&messages::NUMBER_0_IS_TOO_LARGE_FOR_INTEGRAL_LITERAL));
}

#[test]
fn test_method_call_on_number() {
    let node = parse_all("42.ToString()");
    let call = function_call(&node);
    assert!(call.arguments.is_empty());
    let access = member_access(&call.target);
    assert_eq!(literal(&access.target), &LiteralValue::Int32(42));
    assert_eq!(access.member_name.name(), Some("ToString"));
}

// ============================================================================
// Operators and precedence
// ============================================================================

#[test]
fn test_simple_binary() {
    let node = parse_all("a +b");
    check_binary(&node, SyntaxKind::PlusToken, SyntaxKind::SimpleName, SyntaxKind::SimpleName);
    assert_eq!(binary(&node).left.name(), Some("a"));
    assert_eq!(binary(&node).right.name(), Some("b"));
}

#[test]
fn test_member_access_operand() {
    let node = parse_all("a.c - b");
    check_binary(
        &node,
        SyntaxKind::MinusToken,
        SyntaxKind::MemberAccessExpression,
        SyntaxKind::SimpleName,
    );
}

#[test]
fn test_nested_member_access_with_multiplication() {
    let node = parse_all("a.c.d * b + 3.14");
    check_binary(
        &node,
        SyntaxKind::PlusToken,
        SyntaxKind::BinaryExpression,
        SyntaxKind::LiteralExpression,
    );
    let product = &binary(&node).left;
    check_binary(
        product,
        SyntaxKind::AsteriskToken,
        SyntaxKind::MemberAccessExpression,
        SyntaxKind::SimpleName,
    );
    assert_eq!(literal(&binary(&node).right), &LiteralValue::Double(3.14));
}

#[test]
fn test_operator_precedence() {
    let node = parse_all("a + b * c - d / (e + 2)");
    check_binary(
        &node,
        SyntaxKind::MinusToken,
        SyntaxKind::BinaryExpression,
        SyntaxKind::BinaryExpression,
    );
    let sum = &binary(&node).left;
    check_binary(sum, SyntaxKind::PlusToken, SyntaxKind::SimpleName, SyntaxKind::BinaryExpression);
    check_binary(
        &binary(sum).right,
        SyntaxKind::AsteriskToken,
        SyntaxKind::SimpleName,
        SyntaxKind::SimpleName,
    );
    let quotient = &binary(&node).right;
    check_binary(
        quotient,
        SyntaxKind::SlashToken,
        SyntaxKind::SimpleName,
        SyntaxKind::ParenthesizedExpression,
    );
}

#[test]
fn test_left_associativity() {
    let node = parse_all("a + b + c");
    check_binary(&node, SyntaxKind::PlusToken, SyntaxKind::BinaryExpression, SyntaxKind::SimpleName);
    assert_eq!(binary(&node).left.to_display_string(), "a + b ");
}

#[test]
fn test_logical_operators_bind_tighter_level_on_the_right() {
    let node = parse_all("a && b || c");
    check_binary(
        &node,
        SyntaxKind::BarBarToken,
        SyntaxKind::BinaryExpression,
        SyntaxKind::SimpleName,
    );
    let node = parse_all("a ?? b || c");
    check_binary(
        &node,
        SyntaxKind::QuestionQuestionToken,
        SyntaxKind::SimpleName,
        SyntaxKind::BinaryExpression,
    );
}

#[test]
fn test_assignment_is_right_associative() {
    let node = parse_all("a = b = c");
    check_binary(&node, SyntaxKind::EqualsToken, SyntaxKind::SimpleName, SyntaxKind::BinaryExpression);
}

#[test]
fn test_conditional() {
    let node = parse_all("a ? !b : c");
    let Expression::Conditional(conditional) = &node else {
        panic!("expected ConditionalExpression, got {}", node.kind());
    };
    assert_eq!(conditional.condition.name(), Some("a"));
    assert_eq!(unary(&conditional.when_true).operator, SyntaxKind::ExclamationToken);
    assert_eq!(conditional.when_false.name(), Some("c"));
    assert!(!subtree_has_errors(&node));
}

#[test]
fn test_conditional_is_right_associative() {
    let node = parse_all("a ? b : c ? d : e");
    let Expression::Conditional(conditional) = &node else {
        panic!("expected ConditionalExpression, got {}", node.kind());
    };
    assert_eq!(conditional.when_false.kind(), SyntaxKind::ConditionalExpression);
}

#[test]
fn test_conditional_missing_colon() {
    let node = parse_all("a ? b c");
    assert_eq!(node.kind(), SyntaxKind::ConditionalExpression);
    assert!(node.errors()[0].is(&messages::_0_WAS_EXPECTED));
    assert_eq!(node.errors()[0].message, "The ':' was expected.");
}

#[test]
fn test_postfix_chain() {
    let node = parse_all("a[b + -1](c).d[e ?? f]");
    let outer = array_access(&node);
    check_binary(
        &outer.index,
        SyntaxKind::QuestionQuestionToken,
        SyntaxKind::SimpleName,
        SyntaxKind::SimpleName,
    );
    let access = member_access(&outer.target);
    assert_eq!(access.member_name.name(), Some("d"));
    let call = function_call(&access.target);
    assert_eq!(call.arguments.len(), 1);
    let inner = array_access(&call.target);
    let sum = binary(&inner.index);
    assert_eq!(sum.operator, SyntaxKind::PlusToken);
    let negation = unary(&sum.right);
    assert_eq!(negation.operator, SyntaxKind::MinusToken);
    assert_eq!(literal(&negation.operand), &LiteralValue::Int32(1));
    assert!(!subtree_has_errors(&node));
}

// ============================================================================
// Function calls
// ============================================================================

#[test]
fn test_function_call_arguments() {
    let node = parse_all("f(a, b + 1, 'c')");
    let call = function_call(&node);
    assert_eq!(call.arguments.len(), 3);
    assert_eq!(call.arguments[1].kind(), SyntaxKind::BinaryExpression);
    assert!(!subtree_has_errors(&node));
}

#[test]
fn test_function_call_whitespace_only_arguments() {
    let node = parse_all("f( )");
    assert!(function_call(&node).arguments.is_empty());
    assert!(!subtree_has_errors(&node));
}

#[test]
fn test_function_call_missing_comma() {
    let node = parse_all("f(a b)");
    let call = function_call(&node);
    assert_eq!(call.arguments.len(), 3);
    let placeholder = &call.arguments[1];
    assert!(literal(placeholder).is_null());
    assert_eq!(placeholder.length(), 0);
    assert_eq!(placeholder.start_position(), 4);
    assert_eq!(placeholder.errors()[0].message, "The ',' was expected.");
    assert_eq!(call.arguments[2].name(), Some("b"));
}

#[test]
fn test_function_call_missing_close_paren() {
    let node = parse_all("f(a");
    assert!(node.errors()[0].is(&messages::_0_WAS_EXPECTED));
    assert_eq!(node.errors()[0].message, "The ')' was expected.");
}

#[test]
fn test_array_access_missing_close_bracket() {
    let node = parse_all("a[1");
    assert_eq!(node.errors()[0].message, "The ']' was expected.");
}

// ============================================================================
// Incomplete input
// ============================================================================

#[test]
fn test_empty_input() {
    let node = parse_all("");
    assert_eq!(node.kind(), SyntaxKind::SimpleName);
    assert!(node.has_node_errors());
    assert_eq!(node.start_position(), 0);
    assert_eq!(node.length(), 0);
}

#[test]
fn test_whitespace_input() {
    let node = parse_all(" ");
    assert_eq!(node.kind(), SyntaxKind::SimpleName);
    assert!(node.has_node_errors());
    assert_eq!(node.start_position(), 0);
    assert_eq!(node.length(), 1);
}

#[test]
fn test_incomplete_parenthesized() {
    let node = parse_all(" (a +");
    let Expression::Parenthesized(parenthesized) = &node else {
        panic!("expected ParenthesizedExpression, got {}", node.kind());
    };
    assert!(node.has_node_errors());
    assert_eq!(node.start_position(), 0);
    assert_eq!(node.length(), 5);

    let sum = binary(&parenthesized.expression);
    assert_eq!(sum.operator, SyntaxKind::PlusToken);
    assert_eq!(sum.left.name(), Some("a"));
    assert_eq!(sum.left.length(), 2);
    assert_eq!(sum.right.name(), None);
    assert!(sum.right.has_node_errors());
    assert_eq!(sum.right.length(), 0);
    assert_eq!(sum.right.start_position(), 5);
}

#[test]
fn test_assignment() {
    let node = parse_all("a = b");
    check_binary(&node, SyntaxKind::EqualsToken, SyntaxKind::SimpleName, SyntaxKind::SimpleName);
    assert!(!subtree_has_errors(&node));
}

#[test]
fn test_assignment_missing_right_side() {
    let node = parse_all("a = ");
    let assignment = binary(&node);
    assert!(!assignment.left.has_node_errors());
    assert!(assignment.right.has_node_errors());
}

#[test]
fn test_assignment_missing_both_sides() {
    let node = parse_all("=");
    let assignment = binary(&node);
    assert!(assignment.left.has_node_errors());
    assert!(assignment.right.has_node_errors());
}

// ============================================================================
// Unsupported operators
// ============================================================================

#[test]
fn test_unsupported_binary_operator() {
    let node = parse_all("_root.MyCoolProperty += 3");
    check_binary(
        &node,
        SyntaxKind::UnsupportedOperatorToken,
        SyntaxKind::MemberAccessExpression,
        SyntaxKind::LiteralExpression,
    );
    assert_eq!(node.errors()[0].message, "Unsupported operator: +=");
}

#[test]
fn test_multiple_unsupported_binary_operators() {
    let node = parse_all(
        "_root.MyCoolProperty += _this.Number1 + Number2^_parent0.Exponent * Multiplikator",
    );
    check_binary(
        &node,
        SyntaxKind::UnsupportedOperatorToken,
        SyntaxKind::MemberAccessExpression,
        SyntaxKind::BinaryExpression,
    );
    let caret = &binary(&node).right;
    check_binary(
        caret,
        SyntaxKind::UnsupportedOperatorToken,
        SyntaxKind::BinaryExpression,
        SyntaxKind::BinaryExpression,
    );
    check_binary(
        &binary(caret).left,
        SyntaxKind::PlusToken,
        SyntaxKind::MemberAccessExpression,
        SyntaxKind::SimpleName,
    );
    check_binary(
        &binary(caret).right,
        SyntaxKind::AsteriskToken,
        SyntaxKind::MemberAccessExpression,
        SyntaxKind::SimpleName,
    );
    assert!(caret.has_node_errors());
    assert!(node.has_node_errors());
}

#[test]
fn test_unsupported_unary_operators() {
    let node = parse_all("MyCoolProperty = ^&Number1 + ^&Number2 * ^&Number3");
    check_binary(&node, SyntaxKind::EqualsToken, SyntaxKind::SimpleName, SyntaxKind::BinaryExpression);
    let sum = &binary(&node).right;
    check_binary(
        sum,
        SyntaxKind::PlusToken,
        SyntaxKind::UnaryExpression,
        SyntaxKind::BinaryExpression,
    );
    let product = &binary(sum).right;
    check_binary(
        product,
        SyntaxKind::AsteriskToken,
        SyntaxKind::UnaryExpression,
        SyntaxKind::UnaryExpression,
    );
    for operand in [&binary(sum).left, &binary(product).left, &binary(product).right] {
        let node = unary(operand);
        assert_eq!(node.operator, SyntaxKind::UnsupportedOperatorToken);
        assert_eq!(node.operand.kind(), SyntaxKind::SimpleName);
        assert_eq!(operand.errors()[0].message, "Unsupported unary operator: ^&");
    }
}

#[test]
fn test_binary_and_unary_unsupported_operators() {
    let node = parse_all("MyCoolProperty += ^& Number1");
    check_binary(
        &node,
        SyntaxKind::UnsupportedOperatorToken,
        SyntaxKind::SimpleName,
        SyntaxKind::UnaryExpression,
    );
    let operand = &binary(&node).right;
    assert_eq!(unary(operand).operator, SyntaxKind::UnsupportedOperatorToken);
    assert!(operand.has_node_errors());
}

#[test]
fn test_node_tokens_with_unsupported_operators() {
    use SyntaxKind::{DotToken as Dot, Identifier as Id, UnsupportedOperatorToken as Op, WhitespaceTrivia as Ws};

    let node = parse_all("_this.MyCoolProperty +=  _control.ClientId &^ _root += Comments");
    let plus_equals = binary(&node);
    let and_caret = binary(&plus_equals.right);
    let plus_equals_inner = binary(&and_caret.right);

    assert_eq!(
        token_kinds(node.tokens()),
        vec![Id, Dot, Id, Ws, Op, Ws, Id, Dot, Id, Ws, Op, Ws, Id, Ws, Op, Ws, Id]
    );
    assert_eq!(token_kinds(plus_equals.left.tokens()), vec![Id, Dot, Id, Ws]);
    assert_eq!(
        token_kinds(plus_equals.right.tokens()),
        vec![Ws, Id, Dot, Id, Ws, Op, Ws, Id, Ws, Op, Ws, Id]
    );
    assert_eq!(token_kinds(and_caret.left.tokens()), vec![Ws, Id, Dot, Id, Ws]);
    assert_eq!(
        token_kinds(and_caret.right.tokens()),
        vec![Ws, Id, Ws, Op, Ws, Id]
    );
    assert_eq!(token_kinds(plus_equals_inner.left.tokens()), vec![Ws, Id, Ws]);
    assert_eq!(token_kinds(plus_equals_inner.right.tokens()), vec![Ws, Id]);
}

// ============================================================================
// Multi-expressions
// ============================================================================

#[test]
fn test_multi_expression_member_access_and_strings() {
    let mut parser = Parser::new(r#"_root.MyCoolProperty 'something' "something else""#);
    let multi = parser.read_multi_expression();
    assert!(parser.on_end());
    assert_eq!(multi.expressions.len(), 3);
    assert_eq!(multi.expressions[0].kind(), SyntaxKind::MemberAccessExpression);
    assert_eq!(multi.expressions[1].kind(), SyntaxKind::LiteralExpression);
    assert_eq!(multi.expressions[2].kind(), SyntaxKind::LiteralExpression);
    for extra in &multi.expressions[1..] {
        assert!(extra.errors()[0].is(&messages::OPERATOR_EXPECTED_BEFORE_THIS_EXPRESSION));
    }
}

#[test]
fn test_multi_expression_unsupported_operator_and_strings() {
    let mut parser = Parser::new(r#"_root.MyCoolProperty += 'something' "something else""#);
    let multi = parser.read_multi_expression();
    assert!(parser.on_end());
    assert_eq!(multi.expressions.len(), 2);
    assert_eq!(multi.expressions[0].kind(), SyntaxKind::BinaryExpression);
    assert_eq!(multi.expressions[1].kind(), SyntaxKind::LiteralExpression);
}

#[test]
fn test_multi_expression_unfriendly_content() {
    let source = r#"
        IsCanceled ? '}" ValueBinding="{value: Currency}" HeaderText="Currency" />
        <dot:RouteLink RouteName="OrderPaymentReceipt" Visible ="{ value:  PaidDate != null}" Param-OrderId="{ value: Id}" >
            There are no orders to show. &nbsp; :'(
        </dot:RouteLink>
    "#;
    let mut parser = Parser::new(source);
    let multi = parser.read_multi_expression();
    assert!(parser.on_end());
    assert!(multi.expressions.len() > 1);
    assert_eq!(multi.to_display_string(), source);
}

#[test]
fn test_multi_expression_forces_stuck_tokens() {
    let mut parser = Parser::new(") a");
    let multi = parser.read_multi_expression();
    assert!(parser.on_end());
    // The first extra attempt makes no progress; the next iteration forces
    // the `)` out as a literal.
    assert_eq!(multi.expressions.len(), 4);
    assert_eq!(multi.expressions[0].name(), None);
    assert_eq!(multi.expressions[1].name(), None);
    assert!(multi.expressions[1].errors()[0].is(&messages::OPERATOR_EXPECTED_BEFORE_THIS_EXPRESSION));
    assert_eq!(
        literal(&multi.expressions[2]),
        &LiteralValue::String(")".to_string())
    );
    assert!(multi.expressions[2].errors()[0].is(&messages::UNEXPECTED_TOKEN));
    assert_eq!(multi.expressions[2].start_position(), 0);
    assert_eq!(multi.expressions[2].length(), 1);
    assert_eq!(multi.expressions[3].name(), Some("a"));
}

// ============================================================================
// Generic names
// ============================================================================

#[test]
fn test_generic_simple_list() {
    let node = parse_expression("System.Collections.Generic.List<string>.Enumerator");
    let access = member_access(&node);
    assert_eq!(access.member_name.name(), Some("Enumerator"));
    let list = generic(&member_access(&access.target).member_name);
    assert_eq!(list.name(), "List");
    assert_eq!(list.type_arguments.len(), 1);
    assert_eq!(list.type_arguments[0].name(), Some("string"));
}

#[test]
fn test_generic_dictionary() {
    let node = parse_expression("System.Collections.Generic.Dictionary<string, int>.ValueCollection");
    let access = member_access(&node);
    assert_eq!(access.member_name.name(), Some("ValueCollection"));
    let dictionary = generic(&member_access(&access.target).member_name);
    assert_eq!(dictionary.name(), "Dictionary");
    assert_eq!(dictionary.type_arguments[0].name(), Some("string"));
    assert_eq!(dictionary.type_arguments[1].name(), Some("int"));
}

#[test]
fn test_generic_dictionary_of_tuples() {
    let source =
        "System.Collections.Generic.Dictionary<Tuple<bool, bool>, Tuple<string, int>>.ValueCollection";
    let node = parse_all(source);
    let access = member_access(&node);
    let dictionary = generic(&member_access(&access.target).member_name);
    assert_eq!(dictionary.type_arguments.len(), 2);
    for argument in &dictionary.type_arguments {
        assert_eq!(argument.kind(), SyntaxKind::GenericName);
    }
    assert_eq!(node.to_display_string(), source);
}

#[test]
fn test_generic_dictionary_of_tuples_invalid() {
    let source =
        "System.Collections.Generic.Dictionary<Tuple<bool, bool>, Tuple<string, int>.ValueCollection";
    let node = parse_expression(source);
    assert_eq!(
        node.to_display_string(),
        "System.Collections.Generic.Dictionary<Tuple<bool, bool>"
    );

    let mut parser = Parser::new(source);
    let multi = parser.read_multi_expression();
    assert!(parser.on_end());
    assert_eq!(multi.expressions.len(), 4);
    assert_eq!(multi.expressions[0].kind(), SyntaxKind::BinaryExpression);
    assert_eq!(
        multi.expressions[0].to_display_string(),
        "System.Collections.Generic.Dictionary<Tuple<bool, bool>"
    );
    assert_eq!(multi.expressions[1].to_display_string(), "");
    assert_eq!(multi.expressions[2].to_display_string(), ",");
    assert_eq!(multi.expressions[3].kind(), SyntaxKind::MemberAccessExpression);
    assert_eq!(
        multi.expressions[3].to_display_string().trim(),
        "Tuple<string, int>.ValueCollection"
    );
}

#[test]
fn test_generic_attempt_falls_back_to_comparison() {
    let source = "System.Collections.Generic.Dictionary<Tuple.Count&&Meep>Squeee";
    let node = parse_all(source);
    check_binary(
        &node,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::BinaryExpression,
        SyntaxKind::BinaryExpression,
    );
    assert_eq!(node.to_display_string(), source);
}

#[test]
fn test_generic_nested_deeply() {
    let source = "System.Collections.Generic.Dictionary<Generic.List<Generic.List<Generic.Set<Generic.List<System.String>>>>>";
    let node = parse_all(source);
    assert_eq!(node.kind(), SyntaxKind::MemberAccessExpression);
    assert_eq!(node.to_display_string(), source);
    assert!(!subtree_has_errors(&node));
}

#[test]
fn test_generic_member_access_instead_of_type() {
    let source = "System.Collections.Generic.Dictionary<Generic.List<int>.Items[0].Delf()>";
    let node = parse_all(source);
    assert_eq!(node.to_display_string(), source);

    let outer = binary(&node);
    assert_eq!(outer.operator, SyntaxKind::GreaterThanToken);
    assert_eq!(outer.right.name().unwrap_or(""), "");
    let comparison = binary(&outer.left);
    assert_eq!(comparison.operator, SyntaxKind::LessThanToken);
    let call = function_call(&comparison.right);
    assert_eq!(member_access(&call.target).member_name.name(), Some("Delf"));
}

#[test]
fn test_generic_followed_by_whitespace_and_operator() {
    let node = parse_all("List<int> + 1");
    check_binary(
        &node,
        SyntaxKind::PlusToken,
        SyntaxKind::GenericName,
        SyntaxKind::LiteralExpression,
    );
    assert_eq!(binary(&node).left.to_display_string(), "List<int> ");
}

#[test]
fn test_comparison_with_less_than() {
    let node = parse_all("a < b");
    check_binary(&node, SyntaxKind::LessThanToken, SyntaxKind::SimpleName, SyntaxKind::SimpleName);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_collect_diagnostics_in_preorder() {
    let node = parse_expression("f(a b) += c");
    let codes: Vec<u32> = collect_diagnostics(&node).iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![messages::UNSUPPORTED_OPERATOR_0.code, messages::_0_WAS_EXPECTED.code]
    );
}

// ============================================================================
// Directives
// ============================================================================

#[test]
fn test_directive_type_name() {
    let node = parse_directive_type_name("System.Collections.Generic.List<string>").unwrap();
    assert_eq!(node.kind(), SyntaxKind::MemberAccessExpression);
}

#[test]
fn test_directive_assembly_qualified_name() {
    let node = parse_directive_type_name("DotVVM.Samples.ViewModel, DotVVM.Samples").unwrap();
    let Expression::AssemblyQualifiedName(name) = &node else {
        panic!("expected AssemblyQualifiedName, got {}", node.kind());
    };
    assert_eq!(name.type_name.to_display_string(), "DotVVM.Samples.ViewModel");
    assert_eq!(name.assembly_name.to_display_string(), " DotVVM.Samples");
    assert_eq!(node.to_display_string(), "DotVVM.Samples.ViewModel, DotVVM.Samples");
}

#[test]
fn test_directive_generic_assembly_name_is_rejected() {
    let err = parse_directive_type_name("A.B, List<int>").unwrap_err();
    assert!(matches!(err, DirectiveError::InvalidTypeName { .. }));
    assert!(err.diagnostics().iter().any(|d| d.code == messages::GENERIC_NAME_IS_NOT_ALLOWED_IN_ASSEMBLY_NAME.code));
}

#[test]
fn test_directive_type_name_trailing_operator() {
    let err = parse_directive_type_name("A.B + C").unwrap_err();
    let diagnostic = &err.diagnostics().diagnostics()[0];
    assert_eq!(diagnostic.message_text, "Unexpected operator: '+', expecting ',' or end.");
}

#[test]
fn test_directive_value_alias() {
    let node = parse_directive_value("Alias = System.Collections.Generic").unwrap();
    let assignment = binary(&node);
    assert_eq!(assignment.operator, SyntaxKind::EqualsToken);
    assert_eq!(assignment.left.name(), Some("Alias"));
    assert_eq!(assignment.right.kind(), SyntaxKind::MemberAccessExpression);
}

#[test]
fn test_directive_value_plain_type() {
    let node = parse_directive_value("System.Collections").unwrap();
    assert_eq!(node.kind(), SyntaxKind::MemberAccessExpression);
}

#[test]
fn test_directive_value_errors() {
    let err = parse_directive_value("A.B = C").unwrap_err();
    assert!(matches!(err, DirectiveError::InvalidDirectiveValue { .. }));
    assert!(err.diagnostics().iter().any(|d| d.code == messages::ONLY_SIMPLE_NAME_IS_ALLOWED_AS_ALIAS.code));

    let err = parse_directive_value("A ? B").unwrap_err();
    assert_eq!(
        err.diagnostics().diagnostics()[0].message_text,
        "Unexpected operator: '?', expecting assignment (=)."
    );
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_parse_with_options_modes() {
    let mut options = ParserOptions::default();
    assert_eq!(parse_with_options("a b", &options).kind(), SyntaxKind::MultiExpression);

    options.mode = ParseMode::Expression;
    assert_eq!(parse_with_options("a b", &options).to_display_string(), "a ");

    options.mode = ParseMode::DirectiveTypeName;
    let node = parse_with_options("A, B", &options);
    assert_eq!(node.kind(), SyntaxKind::AssemblyQualifiedName);

    options.mode = ParseMode::DirectiveValue;
    let node = parse_with_options("A.B = C", &options);
    assert!(subtree_has_errors(&node));
}
