//! Atomic literal lexer for the Folia template expression engine.
//!
//! The composer calls [`try_parse_literal`] whenever a leaf node's text is
//! not further decomposable by operators or sequences. Recognition is
//! all-or-nothing: a token is produced only when the entire (trimmed) input
//! is exactly one literal.

#![warn(missing_docs)]

pub mod literal;
pub mod token;

pub use literal::try_parse_literal;
pub use token::{Token, TokenKind};
