// Expression tree definitions for the Folia template expression engine.
// These nodes are what the parser hands to the evaluator: literals, variable
// references, binary operations and the two comma-separated sequence forms.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpressionNode {
    /// An atomic literal: number, boolean, null or quoted string.
    Literal(LiteralNode),
    /// A `${name}` context variable reference, passed through unevaluated.
    Variable(String),
    /// A bare unquoted token, opaque to the parser.
    Word(String),
    Binary(Box<BinaryExpressionNode>),
    Sequence(ExpressionSequenceNode),
    Assignations(AssignationSequenceNode),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiteralNode {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpressionNode {
    pub left: ExpressionNode,
    pub operator: BinaryOperator,
    pub right: ExpressionNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Neq,
    And,
    Or,
}

impl BinaryOperator {
    /// The literal operator text as it appears in template attributes.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Eq => "==",
            BinaryOperator::Neq => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

/// An ordered, comma-separated list of expressions. Order is significant and
/// duplicates are permitted.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionSequenceNode {
    items: Vec<ExpressionNode>,
}

impl ExpressionSequenceNode {
    pub fn new(items: Vec<ExpressionNode>) -> Self {
        ExpressionSequenceNode { items }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ExpressionNode] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpressionNode> {
        self.items.iter()
    }
}

/// A single `key=value` (or bare `key`) item from a parameter list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignationNode {
    left: ExpressionNode,
    right: Option<ExpressionNode>,
}

impl AssignationNode {
    pub fn new(left: ExpressionNode, right: Option<ExpressionNode>) -> Self {
        AssignationNode { left, right }
    }

    pub fn left(&self) -> &ExpressionNode {
        &self.left
    }

    pub fn right(&self) -> Option<&ExpressionNode> {
        self.right.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.right.is_some()
    }
}

/// An ordered, comma-separated list of assignations.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignationSequenceNode {
    items: Vec<AssignationNode>,
}

impl AssignationSequenceNode {
    pub fn new(items: Vec<AssignationNode>) -> Self {
        AssignationSequenceNode { items }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[AssignationNode] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssignationNode> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ExpressionSequenceNode {
    type Item = &'a ExpressionNode;
    type IntoIter = std::slice::Iter<'a, ExpressionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a AssignationSequenceNode {
    type Item = &'a AssignationNode;
    type IntoIter = std::slice::Iter<'a, AssignationNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ---- String representations ----
//
// Display produces the canonical source form: re-parsing the output of any
// composed tree yields a structurally equal tree (strings containing both
// quote characters excepted, since the grammar has no escape sequences).
// Operands that are themselves binary operations or sequences are
// parenthesized so the shape survives the round trip.

fn fmt_operand(expr: &ExpressionNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        ExpressionNode::Binary(_) | ExpressionNode::Sequence(_) => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Literal(lit) => write!(f, "{lit}"),
            ExpressionNode::Variable(name) => write!(f, "${{{name}}}"),
            ExpressionNode::Word(word) => write!(f, "{word}"),
            ExpressionNode::Binary(binary) => write!(f, "{binary}"),
            ExpressionNode::Sequence(seq) => write!(f, "{seq}"),
            ExpressionNode::Assignations(seq) => write!(f, "{seq}"),
        }
    }
}

impl fmt::Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralNode::Int(value) => write!(f, "{value}"),
            // {:?} keeps the decimal point so a Float stays a Float when
            // the representation is parsed back.
            LiteralNode::Float(value) => write!(f, "{value:?}"),
            LiteralNode::Bool(value) => write!(f, "{value}"),
            LiteralNode::Null => write!(f, "null"),
            // Quote with whichever delimiter the content does not contain.
            // The grammar has no escape sequences, so a string holding both
            // quote kinds has no parseable source form; double quotes win
            // for that (unrepresentable) case.
            LiteralNode::String(value) if value.contains('\'') => write!(f, "\"{value}\""),
            LiteralNode::String(value) => write!(f, "'{value}'"),
        }
    }
}

impl fmt::Display for BinaryExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operand(&self.left, f)?;
        write!(f, " {} ", self.operator)?;
        fmt_operand(&self.right, f)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ExpressionSequenceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match item {
                ExpressionNode::Sequence(_) => write!(f, "({item})")?,
                _ => write!(f, "{item}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for AssignationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.right {
            Some(value) => write!(f, "{}={}", self.left, value),
            None => write!(f, "{}", self.left),
        }
    }
}

impl fmt::Display for AssignationSequenceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
