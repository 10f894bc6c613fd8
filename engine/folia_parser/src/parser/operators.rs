//! Generic precedence-driven binary operation composer.
//!
//! One algorithm serves every operator family; each family is described by
//! a const table entry carrying its operator symbols, per-operator leniency
//! flags and operand admissibility predicates. Families are tried from the
//! loosest-binding outward so the first successful split happens at the
//! outermost level; inside a family, the rightmost top-level occurrence is
//! tried first, which yields left-associative grouping.

use log::trace;

use folia_ast::{BinaryExpressionNode, BinaryOperator, ExpressionNode, LiteralNode};
use folia_lexer::try_parse_literal;

use crate::parser::placeholder::parse_as_simple_index_placeholder;
use crate::parser::scan::{rightmost_top_level, split_top_level, top_level_mask};
use crate::parser::sequence::compose_expression_sequence;
use crate::parser::state::{ParsingNode, ParsingState};
use crate::parser::{ParseError, MAX_NESTING_DEPTH};

struct OperatorDef {
    symbol: &'static str,
    /// Lenient operators may have an elided left operand, which is
    /// substituted with a numeric zero (unary minus).
    lenient: bool,
    kind: BinaryOperator,
}

struct OperatorFamily {
    name: &'static str,
    operators: &'static [OperatorDef],
    left_allowed: fn(&ExpressionNode) -> bool,
    right_allowed: fn(&ExpressionNode) -> bool,
}

fn any_operand(_: &ExpressionNode) -> bool {
    true
}

/// Addition/subtraction reject bare non-numeric tokens as direct operands:
/// a sign marker next to a word, boolean or null is not a binary operation.
fn numeric_adjacent(expr: &ExpressionNode) -> bool {
    !matches!(
        expr,
        ExpressionNode::Word(_)
            | ExpressionNode::Literal(LiteralNode::Bool(_))
            | ExpressionNode::Literal(LiteralNode::Null)
    )
}

const fn op(symbol: &'static str, lenient: bool, kind: BinaryOperator) -> OperatorDef {
    OperatorDef {
        symbol,
        lenient,
        kind,
    }
}

/// Families in outer-to-inner composition order: earlier entries bind
/// looser and are split first.
static FAMILIES: &[OperatorFamily] = &[
    OperatorFamily {
        name: "or",
        operators: &[op("||", false, BinaryOperator::Or)],
        left_allowed: any_operand,
        right_allowed: any_operand,
    },
    OperatorFamily {
        name: "and",
        operators: &[op("&&", false, BinaryOperator::And)],
        left_allowed: any_operand,
        right_allowed: any_operand,
    },
    OperatorFamily {
        name: "equality",
        operators: &[
            op("==", false, BinaryOperator::Eq),
            op("!=", false, BinaryOperator::Neq),
        ],
        left_allowed: any_operand,
        right_allowed: any_operand,
    },
    OperatorFamily {
        name: "relational",
        operators: &[
            op(">=", false, BinaryOperator::Ge),
            op("<=", false, BinaryOperator::Le),
            op(">", false, BinaryOperator::Gt),
            op("<", false, BinaryOperator::Lt),
        ],
        left_allowed: any_operand,
        right_allowed: any_operand,
    },
    OperatorFamily {
        name: "addition-subtraction",
        operators: &[
            op("+", false, BinaryOperator::Add),
            op("-", true, BinaryOperator::Sub),
        ],
        left_allowed: numeric_adjacent,
        right_allowed: numeric_adjacent,
    },
    OperatorFamily {
        name: "multiplication-division",
        operators: &[
            op("*", false, BinaryOperator::Mul),
            op("/", false, BinaryOperator::Div),
            op("%", false, BinaryOperator::Mod),
        ],
        left_allowed: any_operand,
        right_allowed: any_operand,
    },
];

/// Composes the node at `index` into an expression, starting from the
/// loosest operator family. `Ok(None)` means no grammar rule matched; the
/// caller decides whether that is a syntax error or a rejected candidate.
pub(crate) fn compose_node(
    state: &mut ParsingState,
    index: usize,
    depth: usize,
) -> Result<Option<ExpressionNode>, ParseError> {
    compose_from_family(state, index, 0, depth)
}

fn compose_from_family(
    state: &mut ParsingState,
    index: usize,
    family_index: usize,
    depth: usize,
) -> Result<Option<ExpressionNode>, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::DepthLimitExceeded {
            limit: MAX_NESTING_DEPTH,
        });
    }

    // Already-resolved nodes short-circuit: resolution is memoized, so a
    // later pointer reference to the same index is O(1).
    let text = match state.get(index)? {
        ParsingNode::Resolved(expr) => return Ok(Some(expr.clone())),
        ParsingNode::Pending(text) => text.clone(),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }

    // A pure placeholder node is an alias introduced by decomposition;
    // composition threads through it transparently.
    if let Some(pointer) = parse_as_simple_index_placeholder(&text) {
        if pointer >= state.size() {
            return Err(ParseError::InvalidPlaceholder { index: pointer });
        }
        return compose_node(state, pointer, depth + 1);
    }

    let Some(family) = FAMILIES.get(family_index) else {
        return compose_leaf(state, index, &text, depth);
    };

    let mask = top_level_mask(&text);
    for op in family.operators {
        let mut bound = text.len();
        while let Some(pos) = rightmost_top_level(&text, op.symbol, bound, &mask) {
            bound = pos;
            if is_partial_symbol(&text, pos, op.symbol) {
                continue;
            }
            trace!("family {} trying {:?} at {pos}", family.name, op.symbol);
            if let Some(expr) = try_split(state, &text, pos, op, family, depth)? {
                state.set_resolved(index, expr.clone())?;
                return Ok(Some(expr));
            }
        }
    }

    // No operator of this family yields a valid split: delegate to the
    // next-tighter-binding family.
    compose_from_family(state, index, family_index + 1, depth)
}

/// `<` and `>` must not match inside `<=`/`>=`.
fn is_partial_symbol(text: &str, pos: usize, symbol: &str) -> bool {
    matches!(symbol, "<" | ">") && text.as_bytes().get(pos + 1) == Some(&b'=')
}

fn try_split(
    state: &mut ParsingState,
    text: &str,
    pos: usize,
    op: &OperatorDef,
    family: &OperatorFamily,
    depth: usize,
) -> Result<Option<ExpressionNode>, ParseError> {
    let left_text = text[..pos].trim();
    let right_text = text[pos + op.symbol.len()..].trim();

    if right_text.is_empty() {
        return Ok(None);
    }

    let left = if left_text.is_empty() {
        if !op.lenient {
            return Ok(None);
        }
        ExpressionNode::Literal(LiteralNode::Int(0))
    } else {
        let node = state.append(left_text);
        match compose_node(state, node, depth + 1)? {
            Some(expr) => expr,
            None => return Ok(None),
        }
    };

    let node = state.append(right_text);
    let right = match compose_node(state, node, depth + 1)? {
        Some(expr) => expr,
        None => return Ok(None),
    };

    if !(family.left_allowed)(&left) || !(family.right_allowed)(&right) {
        trace!(
            "family {} rejected operands for {:?}",
            family.name,
            op.symbol
        );
        return Ok(None);
    }

    Ok(Some(ExpressionNode::Binary(Box::new(BinaryExpressionNode {
        left,
        operator: op.kind,
        right,
    }))))
}

/// Delegation target once every operator family has failed: an atomic
/// literal, or an expression sequence when a top-level comma is present.
fn compose_leaf(
    state: &mut ParsingState,
    index: usize,
    text: &str,
    depth: usize,
) -> Result<Option<ExpressionNode>, ParseError> {
    if let Some(token) = try_parse_literal(text) {
        let expr = token.into_expression();
        state.set_resolved(index, expr.clone())?;
        return Ok(Some(expr));
    }

    // Only an actual top-level comma makes this a sequence; a single
    // segment would recurse into this very node forever.
    if split_top_level(text, ',').len() >= 2 {
        if let Some(sequence) = compose_expression_sequence(state, index, depth + 1)? {
            let expr = ExpressionNode::Sequence(sequence);
            state.set_resolved(index, expr.clone())?;
            return Ok(Some(expr));
        }
    }

    Ok(None)
}
