//! Exact-match recognizers for the atomic literals of the expression
//! grammar. Each recognizer only accepts when the whole input is exactly
//! one literal; partial matches are rejected with `all_consuming`.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{alpha1, char, digit1};
use nom::combinator::{all_consuming, map, map_res, recognize};
use nom::sequence::{delimited, pair, tuple};
use nom::IResult;

use crate::token::{Token, TokenKind};

fn parse_int(input: &str) -> IResult<&str, TokenKind> {
    map_res(digit1, |s: &str| s.parse::<i64>().map(TokenKind::Int))(input)
}

fn parse_float(input: &str) -> IResult<&str, TokenKind> {
    map_res(
        recognize(tuple((digit1, char('.'), digit1))),
        |s: &str| s.parse::<f64>().map(TokenKind::Float),
    )(input)
}

fn parse_bool(input: &str) -> IResult<&str, TokenKind> {
    alt((
        map(tag("true"), |_| TokenKind::Bool(true)),
        map(tag("false"), |_| TokenKind::Bool(false)),
    ))(input)
}

fn parse_null(input: &str) -> IResult<&str, TokenKind> {
    map(tag("null"), |_| TokenKind::Null)(input)
}

fn parse_quoted_string(input: &str) -> IResult<&str, TokenKind> {
    alt((
        map(
            delimited(char('\''), take_while(|c| c != '\''), char('\'')),
            |s: &str| TokenKind::Str(s.to_string()),
        ),
        map(
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
            |s: &str| TokenKind::Str(s.to_string()),
        ),
    ))(input)
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn parse_word(input: &str) -> IResult<&str, TokenKind> {
    map(
        recognize(pair(
            alt((recognize(char('_')), alpha1)),
            take_while(is_word_continue),
        )),
        |s: &str| TokenKind::Word(s.to_string()),
    )(input)
}

/// Recognizes a `${name}` variable reference. The decomposer hands these
/// over as complete brace-balanced spans, so the inner text is taken as-is.
fn parse_variable(input: &str) -> Option<TokenKind> {
    let inner = input.strip_prefix("${")?.strip_suffix('}')?;
    if inner.is_empty() {
        return None;
    }
    Some(TokenKind::Variable(inner.to_string()))
}

/// Attempts to lex `input` as exactly one atomic literal.
///
/// Returns `None` when the trimmed input is not a single number, boolean,
/// null, quoted string, `${...}` variable reference or bare word token —
/// the caller then falls back to operator/sequence composition.
pub fn try_parse_literal(input: &str) -> Option<Token> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(kind) = parse_variable(trimmed) {
        return Some(Token::new(kind, trimmed));
    }

    // Every branch must consume the whole input on its own: a keyword
    // prefix like "nullability" has to fall through to the word rule, and
    // the float rule must be tried before the int rule so "1.5" is not cut
    // short.
    let mut exact = alt((
        all_consuming(parse_quoted_string),
        all_consuming(parse_float),
        all_consuming(parse_int),
        all_consuming(parse_bool),
        all_consuming(parse_null),
        all_consuming(parse_word),
    ));

    match exact(trimmed) {
        Ok((_, kind)) => Some(Token::new(kind, trimmed)),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lexes_numbers() {
        assert_eq!(try_parse_literal("42").unwrap().kind, TokenKind::Int(42));
        assert_eq!(
            try_parse_literal(" 3.5 ").unwrap().kind,
            TokenKind::Float(3.5)
        );
    }

    #[test]
    fn lexes_keywords() {
        assert_eq!(
            try_parse_literal("true").unwrap().kind,
            TokenKind::Bool(true)
        );
        assert_eq!(
            try_parse_literal("false").unwrap().kind,
            TokenKind::Bool(false)
        );
        assert_eq!(try_parse_literal("null").unwrap().kind, TokenKind::Null);
    }

    #[test]
    fn keyword_prefix_is_a_word() {
        assert_eq!(
            try_parse_literal("nullability").unwrap().kind,
            TokenKind::Word("nullability".to_string())
        );
    }

    #[test]
    fn lexes_quoted_strings() {
        assert_eq!(
            try_parse_literal("'one'").unwrap().kind,
            TokenKind::Str("one".to_string())
        );
        assert_eq!(
            try_parse_literal("\"two words\"").unwrap().kind,
            TokenKind::Str("two words".to_string())
        );
        assert_eq!(
            try_parse_literal("''").unwrap().kind,
            TokenKind::Str(String::new())
        );
    }

    #[test]
    fn lexes_variable_references() {
        assert_eq!(
            try_parse_literal("${user.name}").unwrap().kind,
            TokenKind::Variable("user.name".to_string())
        );
        assert_eq!(try_parse_literal("${}"), None);
    }

    #[test]
    fn rejects_non_literals() {
        assert_eq!(try_parse_literal("1 + 2"), None);
        assert_eq!(try_parse_literal("'unterminated"), None);
        assert_eq!(try_parse_literal(""), None);
        assert_eq!(try_parse_literal("   "), None);
        assert_eq!(try_parse_literal("(1)"), None);
    }

    #[test]
    fn numeric_predicate_covers_int_and_float_only() {
        assert!(try_parse_literal("7").unwrap().is_numeric());
        assert!(try_parse_literal("7.5").unwrap().is_numeric());
        assert!(!try_parse_literal("'7'").unwrap().is_numeric());
        assert!(!try_parse_literal("seven").unwrap().is_numeric());
    }
}
