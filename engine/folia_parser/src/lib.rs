//! Decomposition/composition parser for the Folia template expression
//! engine.
//!
//! Raw attribute text is first decomposed: nested groups (parentheses,
//! quoted literals, `${...}` references) are replaced by index placeholders
//! and recorded as nodes of an append-only [`parser::state::ParsingState`].
//! Composition then folds the flattened text into a typed
//! [`folia_ast::ExpressionNode`] tree by scanning operators in precedence
//! order, without ever tracking bracket depth.

pub mod parser;

pub use parser::{
    parse_assignation_sequence, parse_expression, parse_expression_sequence, parse_sequence,
    ParseError,
};
