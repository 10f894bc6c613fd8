//! Sequence composition: comma-separated expression lists and
//! `key=value` assignation lists.
//!
//! Splitting on the separator is safe without bracket tracking because
//! nested content is already hidden behind opaque placeholders. All segment
//! nodes are appended before any segment is composed, so sibling indices
//! are contiguous and stable even though composing one segment may itself
//! append further descendant nodes.

use log::trace;

use folia_ast::{AssignationNode, AssignationSequenceNode, ExpressionSequenceNode};

use crate::parser::operators::compose_node;
use crate::parser::placeholder::parse_as_simple_index_placeholder;
use crate::parser::scan::{find_assignation_operator, split_top_level};
use crate::parser::state::{ParsingNode, ParsingState};
use crate::parser::{ParseError, MAX_NESTING_DEPTH};

/// Composes the node at `index` into an ordered expression sequence.
/// `Ok(None)` means the node (or one of its segments) does not compose; no
/// partial sequence is ever returned.
pub(crate) fn compose_expression_sequence(
    state: &mut ParsingState,
    index: usize,
    depth: usize,
) -> Result<Option<ExpressionSequenceNode>, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::DepthLimitExceeded {
            limit: MAX_NESTING_DEPTH,
        });
    }
    if index >= state.size() {
        return Ok(None);
    }

    // A resolved node can be reached while traversing pointers; it stands
    // for a sequence containing that one expression.
    let text = match state.get(index)? {
        ParsingNode::Resolved(expr) => {
            return Ok(Some(ExpressionSequenceNode::new(vec![expr.clone()])));
        }
        ParsingNode::Pending(text) => text.clone(),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }

    if let Some(pointer) = parse_as_simple_index_placeholder(&text) {
        if pointer >= state.size() {
            return Err(ParseError::InvalidPlaceholder { index: pointer });
        }
        return compose_expression_sequence(state, pointer, depth + 1);
    }

    let parts = split_top_level(&text, ',');
    trace!("sequence node {index} split into {} part(s)", parts.len());

    // All sibling nodes are appended before composing any of them.
    let start = state.size();
    for part in &parts {
        state.append(part.trim());
    }

    let mut items = Vec::with_capacity(parts.len());
    for node in start..start + parts.len() {
        match compose_node(state, node, depth + 1)? {
            Some(expr) => items.push(expr),
            None => return Ok(None),
        }
    }

    Ok(Some(ExpressionSequenceNode::new(items)))
}

/// Composes the node at `index` into an ordered assignation sequence.
/// Valueless items (`key` without `=value`) are legal only when
/// `allow_valueless_items` is set.
pub(crate) fn compose_assignation_sequence(
    state: &mut ParsingState,
    index: usize,
    allow_valueless_items: bool,
    depth: usize,
) -> Result<Option<AssignationSequenceNode>, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::DepthLimitExceeded {
            limit: MAX_NESTING_DEPTH,
        });
    }
    if index >= state.size() {
        return Ok(None);
    }

    if state.is_resolved(index) {
        // Reachable while traversing pointers: a single resolved expression
        // can only stand for a one-item, valueless assignation.
        if !allow_valueless_items {
            return Ok(None);
        }
        return match compose_assignation(state, index, allow_valueless_items, depth + 1)? {
            Some(assignation) => Ok(Some(AssignationSequenceNode::new(vec![assignation]))),
            None => Ok(None),
        };
    }

    let text = match state.pending_text(index)? {
        Some(text) => text.to_string(),
        None => return Ok(None),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }

    if let Some(pointer) = parse_as_simple_index_placeholder(&text) {
        if pointer >= state.size() {
            return Err(ParseError::InvalidPlaceholder { index: pointer });
        }
        return compose_assignation_sequence(state, pointer, allow_valueless_items, depth + 1);
    }

    let parts = split_top_level(&text, ',');
    trace!(
        "assignation sequence node {index} split into {} part(s)",
        parts.len()
    );

    let start = state.size();
    for part in &parts {
        state.append(part.trim());
    }

    let mut items = Vec::with_capacity(parts.len());
    for node in start..start + parts.len() {
        match compose_assignation(state, node, allow_valueless_items, depth + 1)? {
            Some(assignation) => items.push(assignation),
            None => return Ok(None),
        }
    }

    Ok(Some(AssignationSequenceNode::new(items)))
}

/// Composes one `key=value` or bare `key` item.
fn compose_assignation(
    state: &mut ParsingState,
    index: usize,
    allow_valueless_items: bool,
    depth: usize,
) -> Result<Option<AssignationNode>, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::DepthLimitExceeded {
            limit: MAX_NESTING_DEPTH,
        });
    }
    if index >= state.size() {
        return Ok(None);
    }

    let text = match state.get(index)? {
        ParsingNode::Resolved(expr) => {
            if !allow_valueless_items {
                return Ok(None);
            }
            return Ok(Some(AssignationNode::new(expr.clone(), None)));
        }
        ParsingNode::Pending(text) => text.clone(),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }

    if let Some(pointer) = parse_as_simple_index_placeholder(&text) {
        if pointer >= state.size() {
            return Err(ParseError::InvalidPlaceholder { index: pointer });
        }
        return compose_assignation(state, pointer, allow_valueless_items, depth + 1);
    }

    match find_assignation_operator(&text) {
        Some(pos) => {
            let key_text = text[..pos].trim();
            let value_text = text[pos + 1..].trim();
            if key_text.is_empty() || value_text.is_empty() {
                return Ok(None);
            }

            // Both nodes are appended before either side is composed.
            let key_node = state.append(key_text);
            let value_node = state.append(value_text);

            let key = match compose_node(state, key_node, depth + 1)? {
                Some(expr) => expr,
                None => return Ok(None),
            };
            let value = match compose_node(state, value_node, depth + 1)? {
                Some(expr) => expr,
                None => return Ok(None),
            };
            Ok(Some(AssignationNode::new(key, Some(value))))
        }
        None => {
            if !allow_valueless_items {
                return Err(ParseError::MissingAssignationValue {
                    text: text.trim().to_string(),
                });
            }
            let key_node = state.append(text.trim());
            match compose_node(state, key_node, depth + 1)? {
                Some(expr) => Ok(Some(AssignationNode::new(expr, None))),
                None => Ok(None),
            }
        }
    }
}

/// True when some top-level comma segment of `text` carries an assignation
/// operator, i.e. the text reads as a `key=value` list rather than a plain
/// expression list.
pub(crate) fn looks_like_assignation_sequence(text: &str) -> bool {
    split_top_level(text, ',')
        .iter()
        .any(|part| find_assignation_operator(part).is_some())
}
