//! The append-only worklist the decomposer and composers share.
//!
//! Indices are stable for the whole life of a parse request: nodes are never
//! removed or reordered, so a placeholder embedded in any node's text can
//! always be resolved by index.

use folia_ast::ExpressionNode;

use crate::parser::ParseError;

/// One entry of the worklist: raw text still to be composed, or the
/// expression it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsingNode {
    Pending(String),
    Resolved(ExpressionNode),
}

/// Append-only ordered collection of parsing nodes.
///
/// A `ParsingState` is created once per top-level parse request, grows
/// monotonically during decomposition and sequence splitting, and is
/// discarded once the final expression tree is produced. It is single-owner
/// and single-threaded for its entire lifetime.
#[derive(Debug, Default, PartialEq)]
pub struct ParsingState {
    nodes: Vec<ParsingNode>,
}

impl ParsingState {
    pub fn new() -> Self {
        ParsingState { nodes: Vec::new() }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Appends a new pending node at the end and returns its index.
    pub fn append(&mut self, text: &str) -> usize {
        self.nodes.push(ParsingNode::Pending(text.to_string()));
        self.nodes.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&ParsingNode, ParseError> {
        self.nodes.get(index).ok_or(ParseError::IndexOutOfBounds {
            index,
            size: self.nodes.len(),
        })
    }

    pub fn is_resolved(&self, index: usize) -> bool {
        matches!(self.nodes.get(index), Some(ParsingNode::Resolved(_)))
    }

    /// Transitions a pending node to resolved. A node resolves at most
    /// once and never reverts.
    pub fn set_resolved(&mut self, index: usize, expression: ExpressionNode) -> Result<(), ParseError> {
        let size = self.nodes.len();
        match self.nodes.get_mut(index) {
            None => Err(ParseError::IndexOutOfBounds { index, size }),
            Some(ParsingNode::Resolved(_)) => Err(ParseError::AlreadyResolved { index }),
            Some(node @ ParsingNode::Pending(_)) => {
                *node = ParsingNode::Resolved(expression);
                Ok(())
            }
        }
    }

    /// Rewrites a pending node's text after its groups were decomposed.
    /// Nodes are appended before recursion so indices are assigned in
    /// pre-order; the rewritten text is written back here.
    pub(crate) fn set_pending_text(&mut self, index: usize, text: String) -> Result<(), ParseError> {
        let size = self.nodes.len();
        match self.nodes.get_mut(index) {
            None => Err(ParseError::IndexOutOfBounds { index, size }),
            Some(ParsingNode::Resolved(_)) => Err(ParseError::AlreadyResolved { index }),
            Some(ParsingNode::Pending(current)) => {
                *current = text;
                Ok(())
            }
        }
    }

    /// The pending text at `index`, or `None` when the node is resolved.
    pub fn pending_text(&self, index: usize) -> Result<Option<&str>, ParseError> {
        match self.get(index)? {
            ParsingNode::Pending(text) => Ok(Some(text)),
            ParsingNode::Resolved(_) => Ok(None),
        }
    }
}
