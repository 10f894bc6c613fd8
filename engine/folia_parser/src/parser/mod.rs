//! The decomposition/composition parsing pipeline.
//!
//! `parse_expression` and `parse_sequence` are the two operations the
//! attribute-processing layer calls. Both run the same pipeline: decompose
//! the raw text into a [`state::ParsingState`] worklist, then fold the
//! flattened node texts into an expression tree.

use log::debug;
use thiserror::Error;

use folia_ast::{AssignationSequenceNode, ExpressionNode, ExpressionSequenceNode};

pub mod decompose;
pub mod placeholder;
pub mod state;

mod operators;
mod scan;
mod sequence;


pub use decompose::{decompose, DecompositionConfig};
pub use placeholder::parse_as_simple_index_placeholder;
pub use state::{ParsingNode, ParsingState};

use operators::compose_node;
use sequence::{
    compose_assignation_sequence, compose_expression_sequence, looks_like_assignation_sequence,
};

/// Maximum nesting depth for decomposition and composition. Deeper input is
/// rejected instead of exhausting the call stack.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Everything that can go wrong while parsing an expression. Operand
/// validation failures during operator scanning are recovered by
/// backtracking and never surface here; a parse either produces a complete
/// tree or exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or whitespace-only.
    #[error("expression is empty or whitespace-only")]
    EmptyInput,

    /// No grammar rule matches `text`.
    #[error("could not parse expression: {text:?}")]
    Syntax { text: String },

    /// A placeholder references a node that does not exist. This indicates
    /// a broken decomposition invariant and is unreachable for any input
    /// the decomposer produced itself.
    #[error("placeholder references nonexistent parsing node {index}")]
    InvalidPlaceholder { index: usize },

    /// The recursion guard tripped on pathologically nested input.
    #[error("expression nesting exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// A `key` without `=value` appeared where values are required.
    #[error("assignation {text:?} is missing a value")]
    MissingAssignationValue { text: String },

    /// A parsing-state access used an index that was never assigned.
    #[error("parsing node index {index} is out of bounds (size {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A parsing node was resolved twice.
    #[error("parsing node {index} is already resolved")]
    AlreadyResolved { index: usize },
}

fn syntax_error(input: &str) -> ParseError {
    ParseError::Syntax {
        text: input.trim().to_string(),
    }
}

/// Parses raw attribute text into a single expression tree.
pub fn parse_expression(input: &str) -> Result<ExpressionNode, ParseError> {
    debug!("parsing expression {input:?}");
    let mut state = decompose(input, DecompositionConfig::DECOMPOSE_ALL_AND_UNNEST)?;
    match compose_node(&mut state, 0, 0)? {
        Some(expression) => Ok(expression),
        None => Err(syntax_error(input)),
    }
}

/// Parses raw attribute text into a comma-separated sequence.
///
/// When `allow_valueless_items` is set the caller is asking for a parameter
/// list and the result is always an assignation sequence. Otherwise the
/// text is read as assignations only when some top-level segment carries an
/// `=`, and as a plain expression sequence when none does.
pub fn parse_sequence(
    input: &str,
    allow_valueless_items: bool,
) -> Result<ExpressionNode, ParseError> {
    debug!("parsing sequence {input:?} (allow_valueless_items: {allow_valueless_items})");
    let mut state = decompose(input, DecompositionConfig::DECOMPOSE_ALL_AND_UNNEST)?;
    if allow_valueless_items || root_is_assignations(&state)? {
        match compose_assignation_sequence(&mut state, 0, allow_valueless_items, 0)? {
            Some(sequence) => Ok(ExpressionNode::Assignations(sequence)),
            None => Err(syntax_error(input)),
        }
    } else {
        match compose_expression_sequence(&mut state, 0, 0)? {
            Some(sequence) => Ok(ExpressionNode::Sequence(sequence)),
            None => Err(syntax_error(input)),
        }
    }
}

/// Parses raw attribute text into an ordered expression sequence.
pub fn parse_expression_sequence(input: &str) -> Result<ExpressionSequenceNode, ParseError> {
    let mut state = decompose(input, DecompositionConfig::DECOMPOSE_ALL_AND_UNNEST)?;
    match compose_expression_sequence(&mut state, 0, 0)? {
        Some(sequence) => Ok(sequence),
        None => Err(syntax_error(input)),
    }
}

/// Parses raw attribute text into an ordered assignation sequence.
pub fn parse_assignation_sequence(
    input: &str,
    allow_valueless_items: bool,
) -> Result<AssignationSequenceNode, ParseError> {
    let mut state = decompose(input, DecompositionConfig::DECOMPOSE_ALL_AND_UNNEST)?;
    match compose_assignation_sequence(&mut state, 0, allow_valueless_items, 0)? {
        Some(sequence) => Ok(sequence),
        None => Err(syntax_error(input)),
    }
}

/// Follows pointer aliases from the root node and reports whether its
/// effective text reads as a `key=value` list.
fn root_is_assignations(state: &ParsingState) -> Result<bool, ParseError> {
    let mut index = 0;
    loop {
        let text = match state.get(index)? {
            ParsingNode::Resolved(_) => return Ok(false),
            ParsingNode::Pending(text) => text,
        };
        match parse_as_simple_index_placeholder(text) {
            Some(pointer) if pointer < state.size() && pointer != index => index = pointer,
            Some(pointer) => {
                return Err(ParseError::InvalidPlaceholder { index: pointer });
            }
            None => return Ok(looks_like_assignation_sequence(text)),
        }
    }
}
