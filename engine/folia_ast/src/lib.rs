//! Expression tree (AST) for the Folia template expression engine.
//!
//! The parser composes these nodes from raw attribute text; the evaluator
//! (a separate crate) walks them against a data context. Trees are strictly
//! acyclic and exclusively owned by their parent node.

pub mod ast;

pub use ast::{
    AssignationNode, AssignationSequenceNode, BinaryExpressionNode, BinaryOperator,
    ExpressionNode, ExpressionSequenceNode, LiteralNode,
};
