//! Symbolic differentiation engine.
//!
//! Implements the constant, sum, product, quotient and chain rules over the
//! node lattice. Results are not simplified: `d/dx (x * x)` comes back as
//! `((1.0 * x) + (x * 1.0))`.
//!
//! Two gaps are kept on purpose. `>=` has no derivative and fails with
//! [`SymbolicError::NotDifferentiable`]. A conditional differentiates both
//! branches and keeps its condition, which is only correct away from the
//! switching point.

use crate::error::SymbolicError;
use crate::expression::Expression;
use crate::node::{ChainOp, ExprNode};
use crate::traversal::fold;

impl Expression {
    /// Partial derivative with respect to the variable `x`.
    pub fn derive(&self, x: &str) -> Result<Expression, SymbolicError> {
        fold(self, differentiated_children, |expr, d: Vec<Expression>| {
            rule(expr, x, d)
        })
    }
}

/// Children whose derivatives a node's rule needs.
fn differentiated_children(node: &ExprNode) -> Vec<&Expression> {
    match node {
        ExprNode::Value(_) | ExprNode::Gte { .. } => Vec::new(),
        ExprNode::Chain {
            op: ChainOp::And, ..
        } => Vec::new(),
        ExprNode::If {
            then, otherwise, ..
        } => vec![then, otherwise],
        other => other.children(),
    }
}

/// One differentiation step. `d` holds the derivatives of
/// [`differentiated_children`], in order.
fn rule(expr: &Expression, x: &str, d: Vec<Expression>) -> Result<Expression, SymbolicError> {
    let derived = match (expr.node(), d.as_slice()) {
        (ExprNode::Value(v), []) => Expression::value(v.derive(x)),
        (
            ExprNode::Chain {
                op: ChainOp::Add, ..
            },
            [dh],
        ) => dh.clone(),
        (
            ExprNode::Chain {
                op: ChainOp::Add, ..
            },
            [dh, dt],
        ) => dh + dt,
        (
            ExprNode::Chain {
                op: ChainOp::Mul, ..
            },
            [dh],
        ) => dh.clone(),
        (
            ExprNode::Chain {
                op: ChainOp::Mul,
                head,
                tail: Some(tail),
            },
            [dh, dt],
        ) => {
            // Product rule: (uv)' = u'v + uv'
            dh * tail + head * dt
        }
        // Boolean results are piecewise constant.
        (
            ExprNode::Chain {
                op: ChainOp::And, ..
            },
            [],
        ) => Expression::zero(),
        (
            ExprNode::Div {
                numerator,
                denominator,
            },
            [dn, dd],
        ) => {
            // Quotient rule: (u/v)' = (u'v - uv') / v^2
            (dn * denominator - numerator * dd) / (denominator * denominator)
        }
        (ExprNode::Gte { .. }, []) => {
            return Err(SymbolicError::NotDifferentiable {
                node: expr.node().kind(),
                var: x.to_string(),
            })
        }
        (ExprNode::Exp { base, .. }, [du]) => {
            // (b^u)' = ln(b) * b^u * u'
            Expression::from(base.ln()) * expr * du
        }
        (ExprNode::Log { base, argument }, [du]) => {
            // (log_b u)' = 1 / (u * ln(b)) * u'
            let scale = Expression::one() / (argument * Expression::constant(base.ln()));
            scale * du
        }
        (ExprNode::If { condition, .. }, [dt, de]) => {
            Expression::if_else(condition.clone(), dt.clone(), de.clone())
        }
        _ => unreachable!("derivative count is fixed per node kind"),
    };
    Ok(derived)
}
