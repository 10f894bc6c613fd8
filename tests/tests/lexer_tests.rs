// The literal lexer and the parser must agree on atomic inputs: whatever
// the lexer recognizes as a single token, the parser returns unchanged.

use folia_lexer::{try_parse_literal, TokenKind};
use folia_parser::parse_expression;
use pretty_assertions::assert_eq;

#[test]
fn parser_passes_atomic_literals_through() {
    for input in ["42", "3.5", "true", "null", "'one'", "${user.name}", "stuff"] {
        let token = try_parse_literal(input).expect("lexer should accept atomic literal");
        assert_eq!(parse_expression(input).unwrap(), token.into_expression());
    }
}

#[test]
fn operator_text_is_not_a_literal() {
    assert_eq!(try_parse_literal("1+2"), None);
    assert_eq!(try_parse_literal("a,b"), None);
    assert!(matches!(
        try_parse_literal("7").unwrap().kind,
        TokenKind::Int(7)
    ));
}
