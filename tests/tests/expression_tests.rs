// End-to-end tests for expression parsing through the public API.

use folia_ast::{BinaryExpressionNode, BinaryOperator, ExpressionNode, LiteralNode};
use folia_parser::{parse_expression, ParseError};
use pretty_assertions::assert_eq;

fn int(value: i64) -> ExpressionNode {
    ExpressionNode::Literal(LiteralNode::Int(value))
}

fn binary(operator: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> ExpressionNode {
    ExpressionNode::Binary(Box::new(BinaryExpressionNode {
        left,
        operator,
        right,
    }))
}

#[test]
fn arithmetic_precedence_and_grouping() {
    assert_eq!(
        parse_expression("1+2*3").unwrap(),
        binary(
            BinaryOperator::Add,
            int(1),
            binary(BinaryOperator::Mul, int(2), int(3))
        )
    );
    assert_eq!(
        parse_expression("(1+2)*3").unwrap(),
        binary(
            BinaryOperator::Mul,
            binary(BinaryOperator::Add, int(1), int(2)),
            int(3)
        )
    );
}

#[test]
fn operators_within_a_family_split_in_declared_order() {
    // Inside a family each operator is scanned to exhaustion before the
    // next one, so `/` splits the whole text before `%` is considered.
    assert_eq!(
        parse_expression("8/2%3").unwrap(),
        binary(
            BinaryOperator::Div,
            int(8),
            binary(BinaryOperator::Mod, int(2), int(3))
        )
    );
}

#[test]
fn comparison_of_variables_and_literals() {
    assert_eq!(
        parse_expression("${cart.total} > 100.0").unwrap(),
        binary(
            BinaryOperator::Gt,
            ExpressionNode::Variable("cart.total".to_string()),
            ExpressionNode::Literal(LiteralNode::Float(100.0)),
        )
    );
}

#[test]
fn equality_over_string_literals() {
    assert_eq!(
        parse_expression("${mode} == 'draft'").unwrap(),
        binary(
            BinaryOperator::Eq,
            ExpressionNode::Variable("mode".to_string()),
            ExpressionNode::Literal(LiteralNode::String("draft".to_string())),
        )
    );
}

#[test]
fn booleans_and_null_parse_as_literals() {
    assert_eq!(
        parse_expression("true").unwrap(),
        ExpressionNode::Literal(LiteralNode::Bool(true))
    );
    assert_eq!(
        parse_expression("${missing} == null").unwrap(),
        binary(
            BinaryOperator::Eq,
            ExpressionNode::Variable("missing".to_string()),
            ExpressionNode::Literal(LiteralNode::Null),
        )
    );
}

#[test]
fn unary_minus_is_lenient_subtraction() {
    assert_eq!(
        parse_expression("-5").unwrap(),
        binary(BinaryOperator::Sub, int(0), int(5))
    );
    assert_eq!(
        parse_expression("3 * -2").unwrap(),
        binary(
            BinaryOperator::Mul,
            int(3),
            binary(BinaryOperator::Sub, int(0), int(2)),
        )
    );
}

#[test]
fn errors_carry_the_offending_text() {
    assert_eq!(parse_expression("  "), Err(ParseError::EmptyInput));
    assert_eq!(
        parse_expression("*5"),
        Err(ParseError::Syntax {
            text: "*5".to_string()
        })
    );
    assert!(matches!(
        parse_expression("(1+2"),
        Err(ParseError::Syntax { .. })
    ));
}

#[test]
fn deeply_nested_input_is_rejected_not_overflowed() {
    let mut input = String::new();
    for _ in 0..500 {
        input.push('(');
    }
    input.push('1');
    for _ in 0..500 {
        input.push(')');
    }
    assert!(matches!(
        parse_expression(&input),
        Err(ParseError::DepthLimitExceeded { .. })
    ));
}

#[test]
fn display_round_trips_through_the_parser() {
    for input in ["1+2*3", "(1+2)*3", "1-2-3", "${a} >= 1 && ${b} != 'x'"] {
        let first = parse_expression(input).unwrap();
        let second = parse_expression(&first.to_string()).unwrap();
        assert_eq!(first, second, "round trip changed the tree for {input:?}");
    }
}

#[test]
fn string_with_embedded_quote_round_trips() {
    let first = parse_expression("\"a'b\"").unwrap();
    assert_eq!(
        first,
        ExpressionNode::Literal(LiteralNode::String("a'b".to_string()))
    );
    assert_eq!(first.to_string(), "\"a'b\"");
    assert_eq!(parse_expression(&first.to_string()).unwrap(), first);
}
