// End-to-end tests for comma-separated sequences and assignation lists.

use folia_ast::{
    BinaryExpressionNode, BinaryOperator, ExpressionNode, ExpressionSequenceNode, LiteralNode,
};
use folia_parser::{
    parse_assignation_sequence, parse_expression_sequence, parse_sequence, ParseError,
};
use pretty_assertions::assert_eq;

fn int(value: i64) -> ExpressionNode {
    ExpressionNode::Literal(LiteralNode::Int(value))
}

fn string(value: &str) -> ExpressionNode {
    ExpressionNode::Literal(LiteralNode::String(value.to_string()))
}

#[test]
fn expression_sequence_keeps_source_order() {
    let parsed = parse_sequence("'one',${two},'three'", false).unwrap();
    let ExpressionNode::Sequence(sequence) = parsed else {
        panic!("expected an expression sequence");
    };
    assert_eq!(
        sequence.items(),
        &[
            string("one"),
            ExpressionNode::Variable("two".to_string()),
            string("three"),
        ]
    );
}

#[test]
fn duplicates_are_permitted() {
    let sequence = parse_expression_sequence("1,1,1").unwrap();
    assert_eq!(sequence.items(), &[int(1), int(1), int(1)]);
}

#[test]
fn assignations_with_and_without_values() {
    let parsed = parse_sequence("a=1,b", true).unwrap();
    let ExpressionNode::Assignations(sequence) = parsed else {
        panic!("expected an assignation sequence");
    };
    assert_eq!(sequence.size(), 2);

    let first = &sequence.items()[0];
    assert_eq!(first.left(), &ExpressionNode::Word("a".to_string()));
    assert_eq!(first.right(), Some(&int(1)));
    assert!(first.has_value());

    let second = &sequence.items()[1];
    assert_eq!(second.left(), &ExpressionNode::Word("b".to_string()));
    assert_eq!(second.right(), None);
    assert!(!second.has_value());
}

#[test]
fn valueless_assignation_is_an_error_when_values_are_required() {
    assert_eq!(
        parse_sequence("a=1,b", false),
        Err(ParseError::MissingAssignationValue {
            text: "b".to_string()
        })
    );
    assert_eq!(
        parse_assignation_sequence("a=1,b", false),
        Err(ParseError::MissingAssignationValue {
            text: "b".to_string()
        })
    );
}

#[test]
fn assignation_values_may_be_full_expressions() {
    let sequence = parse_assignation_sequence("total=${price}*2,label='x,y'", false).unwrap();
    assert_eq!(sequence.size(), 2);
    assert_eq!(
        sequence.items()[0].right(),
        Some(&ExpressionNode::Binary(Box::new(BinaryExpressionNode {
            left: ExpressionNode::Variable("price".to_string()),
            operator: BinaryOperator::Mul,
            right: int(2),
        })))
    );
    // The comma inside the quoted literal is not a separator.
    assert_eq!(sequence.items()[1].right(), Some(&string("x,y")));
}

#[test]
fn comparison_operators_are_not_assignation_operators() {
    let parsed = parse_sequence("${a}==1,${b}<=2", false).unwrap();
    let ExpressionNode::Sequence(sequence) = parsed else {
        panic!("expected an expression sequence");
    };
    assert_eq!(sequence.size(), 2);
}

#[test]
fn commas_inside_groups_are_invisible_to_splitting() {
    let parsed = parse_sequence("(1,2)+3", false).unwrap();
    let ExpressionNode::Sequence(sequence) = parsed else {
        panic!("expected an expression sequence");
    };
    assert_eq!(sequence.size(), 1);
    assert_eq!(
        sequence.items()[0],
        ExpressionNode::Binary(Box::new(BinaryExpressionNode {
            left: ExpressionNode::Sequence(ExpressionSequenceNode::new(vec![int(1), int(2)])),
            operator: BinaryOperator::Add,
            right: int(3),
        }))
    );
}

#[test]
fn empty_sequences_are_rejected() {
    assert_eq!(parse_sequence("", true), Err(ParseError::EmptyInput));
    assert!(matches!(
        parse_expression_sequence("1,,2"),
        Err(ParseError::Syntax { .. })
    ));
}

#[test]
fn sequence_display_round_trips() {
    for (input, allow_valueless) in [
        ("'one',${two},'three'", false),
        ("a=1,b", true),
        ("a=1,b=2", false),
        ("(1,2)+3", false),
    ] {
        let first = parse_sequence(input, allow_valueless).unwrap();
        let second = parse_sequence(&first.to_string(), allow_valueless).unwrap();
        assert_eq!(first, second, "round trip changed the tree for {input:?}");
    }
}
