//! Decomposition: flattening nested sub-expressions into the worklist.
//!
//! The scanner walks the text left to right. Each complete top-level group
//! (a parenthesized sub-expression, a quoted literal, or a `${...}`
//! reference) is appended to the state as its own node and replaced in the
//! surrounding text by an index placeholder; the replaced region is never
//! rescanned. Nodes are appended before their content is recursed into, so
//! indices are assigned in pre-order and every placeholder written into a
//! node's text references an index that already exists.

use log::trace;

use folia_lexer::try_parse_literal;

use crate::parser::placeholder::{parse_as_simple_index_placeholder, placeholder_for, PLACEHOLDER_MARKER};
use crate::parser::state::{ParsingNode, ParsingState};
use crate::parser::{ParseError, MAX_NESTING_DEPTH};

/// Policy flags controlling decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompositionConfig {
    /// Collapse groups that are just a parenthesized pointer, aiming the
    /// outer placeholder directly at the inner node.
    pub unnest: bool,
    /// Maximum nesting depth before decomposition is rejected.
    pub max_depth: usize,
}

impl DecompositionConfig {
    /// Decompose every group and flatten needless nesting. This is the
    /// policy the parse entry points use.
    pub const DECOMPOSE_ALL_AND_UNNEST: DecompositionConfig = DecompositionConfig {
        unnest: true,
        max_depth: MAX_NESTING_DEPTH,
    };

    /// Decompose every group but keep alias nodes for parenthesized
    /// pointers.
    pub const DECOMPOSE_ALL: DecompositionConfig = DecompositionConfig {
        unnest: false,
        max_depth: MAX_NESTING_DEPTH,
    };
}

/// Decomposes `input` into a fresh [`ParsingState`] whose node 0 holds the
/// top-level text with every nested group replaced by a placeholder, or a
/// resolved expression when the whole input is a single atomic literal.
pub fn decompose(input: &str, config: DecompositionConfig) -> Result<ParsingState, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut state = ParsingState::new();
    let root = state.append(trimmed);
    decompose_node(&mut state, root, config, 0)?;
    Ok(state)
}

fn decompose_node(
    state: &mut ParsingState,
    index: usize,
    config: DecompositionConfig,
    depth: usize,
) -> Result<(), ParseError> {
    if depth > config.max_depth {
        return Err(ParseError::DepthLimitExceeded {
            limit: config.max_depth,
        });
    }

    let text = match state.get(index)? {
        ParsingNode::Resolved(_) => return Ok(()),
        ParsingNode::Pending(text) => text.clone(),
    };

    // A node whose whole text is one atomic literal resolves immediately.
    // Quote spans therefore never survive into composed text and are never
    // revisited by the operator/placeholder scanners.
    if let Some(token) = try_parse_literal(&text) {
        trace!("node {index} resolved as literal: {text:?}");
        state.set_resolved(index, token.into_expression())?;
        return Ok(());
    }

    let rewritten = decompose_text(state, &text, config, depth)?;
    trace!("node {index} decomposed to {rewritten:?}");
    state.set_pending_text(index, rewritten)
}

fn decompose_text(
    state: &mut ParsingState,
    text: &str,
    config: DecompositionConfig,
    depth: usize,
) -> Result<String, ParseError> {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        let c = match text[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        match c {
            '\'' | '"' => {
                let end = match text[i + 1..].find(c) {
                    Some(offset) => i + 1 + offset,
                    None => {
                        return Err(ParseError::Syntax {
                            text: text[i..].to_string(),
                        })
                    }
                };
                let span = &text[i..end + 1];
                let node = extract_group(state, span, config, depth)?;
                out.push_str(&placeholder_for(node));
                i = end + 1;
            }
            '$' if text[i + 1..].starts_with('{') => {
                let end = find_matching_brace(text, i + 1).ok_or_else(|| ParseError::Syntax {
                    text: text[i..].to_string(),
                })?;
                let span = &text[i..end + 1];
                let node = extract_group(state, span, config, depth)?;
                out.push_str(&placeholder_for(node));
                i = end + 1;
            }
            '(' => {
                let end = find_matching_paren(text, i).ok_or_else(|| ParseError::Syntax {
                    text: text[i..].to_string(),
                })?;
                let inner = &text[i + 1..end];
                let node = extract_group(state, inner, config, depth)?;
                out.push_str(&placeholder_for(node));
                i = end + 1;
            }
            ')' => {
                return Err(ParseError::Syntax {
                    text: text[i..].to_string(),
                })
            }
            PLACEHOLDER_MARKER => {
                // The marker is reserved for the decomposer's own output;
                // raw input may not contain it.
                return Err(ParseError::Syntax {
                    text: text[i..].to_string(),
                });
            }
            _ => {
                out.push(c);
                i += c.len_utf8();
            }
        }
    }

    Ok(out)
}

/// Appends `content` as a new node, recursively decomposes it, and returns
/// the index the surrounding placeholder should reference. Under the
/// unnesting policy a group that reduced to a bare pointer is collapsed to
/// the node it points at.
fn extract_group(
    state: &mut ParsingState,
    content: &str,
    config: DecompositionConfig,
    depth: usize,
) -> Result<usize, ParseError> {
    let node = state.append(content.trim());
    decompose_node(state, node, config, depth + 1)?;

    if config.unnest {
        if let Some(text) = state.pending_text(node)? {
            if let Some(pointer) = parse_as_simple_index_placeholder(text) {
                trace!("unnesting node {node} to pointer {pointer}");
                return Ok(pointer);
            }
        }
    }
    Ok(node)
}

/// Index of the `)` matching the `(` at `open`, honoring quoted spans.
fn find_matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut level = 0usize;
    let mut closing: Option<char> = None;
    for (i, c) in text[open..].char_indices() {
        match closing {
            Some(close) => {
                if c == close {
                    closing = None;
                }
            }
            None => match c {
                '\'' | '"' => closing = Some(c),
                '(' => level += 1,
                ')' => {
                    level -= 1;
                    if level == 0 {
                        return Some(open + i);
                    }
                }
                _ => {}
            },
        }
    }
    None
}

/// Index of the `}` matching the `{` at `open`, honoring quoted spans and
/// nested braces.
fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut level = 0usize;
    let mut closing: Option<char> = None;
    for (i, c) in text[open..].char_indices() {
        match closing {
            Some(close) => {
                if c == close {
                    closing = None;
                }
            }
            None => match c {
                '\'' | '"' => closing = Some(c),
                '{' => level += 1,
                '}' => {
                    level -= 1;
                    if level == 0 {
                        return Some(open + i);
                    }
                }
                _ => {}
            },
        }
    }
    None
}
