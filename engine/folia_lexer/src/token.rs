//! Atomic tokens and their conversion into expression nodes.

use std::fmt;

use folia_ast::{ExpressionNode, LiteralNode};

/// The kind of an atomic token recognized by [`try_parse_literal`].
///
/// [`try_parse_literal`]: crate::try_parse_literal
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An integer numeric token.
    Int(i64),
    /// A decimal numeric token.
    Float(f64),
    /// `true` or `false`.
    Bool(bool),
    /// The `null` token.
    Null,
    /// A single- or double-quoted string literal, unquoted content.
    Str(String),
    /// A `${name}` context variable reference; holds the inner name.
    Variable(String),
    /// A bare unquoted word token.
    Word(String),
}

/// An atomic token together with the exact source text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The recognized kind, carrying the decoded value.
    pub kind: TokenKind,
    /// The trimmed source text the token was lexed from.
    pub text: String,
}

impl Token {
    /// Creates a token from its kind and source text.
    pub fn new(kind: TokenKind, text: &str) -> Self {
        Token {
            kind,
            text: text.to_string(),
        }
    }

    /// True for tokens that may sit directly next to an arithmetic
    /// `+`/`-` operator (numeric tokens only).
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, TokenKind::Int(_) | TokenKind::Float(_))
    }

    /// Converts the token into the expression node the composer hands on.
    pub fn into_expression(self) -> ExpressionNode {
        match self.kind {
            TokenKind::Int(value) => ExpressionNode::Literal(LiteralNode::Int(value)),
            TokenKind::Float(value) => ExpressionNode::Literal(LiteralNode::Float(value)),
            TokenKind::Bool(value) => ExpressionNode::Literal(LiteralNode::Bool(value)),
            TokenKind::Null => ExpressionNode::Literal(LiteralNode::Null),
            TokenKind::Str(value) => ExpressionNode::Literal(LiteralNode::String(value)),
            TokenKind::Variable(name) => ExpressionNode::Variable(name),
            TokenKind::Word(word) => ExpressionNode::Word(word),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
