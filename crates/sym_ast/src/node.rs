//! The closed set of expression node kinds.

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::expression::Expression;
use crate::value::NumericValue;

/// Operator of an associative chain node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainOp {
    Add,
    Mul,
    /// Boolean `&&` over the 0/1 encoding.
    And,
}

impl ChainOp {
    /// Combines two evaluated operands.
    pub fn reduce(self, a: Complex64, b: Complex64) -> Complex64 {
        match self {
            ChainOp::Add => a + b,
            ChainOp::Mul => a * b,
            ChainOp::And => to_number(truthy(a) && truthy(b)),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChainOp::Add => "+",
            ChainOp::Mul => "*",
            ChainOp::And => "&&",
        }
    }
}

/// Truthiness of an evaluated scalar: its real part is not (almost) zero.
pub fn truthy(value: Complex64) -> bool {
    value.re.abs() > f64::EPSILON
}

/// Boolean encoded as `1.0` / `0.0`.
pub fn to_number(b: bool) -> Complex64 {
    if b {
        Complex64::one()
    } else {
        Complex64::zero()
    }
}

/// A node of an expression tree.
///
/// Children are [`Expression`] handles, so any sub-tree may be shared by
/// several parents. Nodes are never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// Leaf: a constant or a variable.
    Value(NumericValue),

    /// Right-leaning list for `+`, `*` and `&&`.
    ///
    /// `tail == None` marks the end of the chain; such a node's value is the
    /// value of `head` alone.
    Chain {
        op: ChainOp,
        head: Expression,
        tail: Option<Expression>,
    },

    Div {
        numerator: Expression,
        denominator: Expression,
    },

    /// `lhs >= rhs`, compared on real parts. Has no derivative.
    Gte { lhs: Expression, rhs: Expression },

    /// `base ^ exponent` with a fixed base.
    Exp { base: Complex64, exponent: Expression },

    /// `log_base(argument)`. Real-valued only.
    Log { base: f64, argument: Expression },

    /// `condition ? then : otherwise`. Only the selected branch is evaluated.
    If {
        condition: Expression,
        then: Expression,
        otherwise: Expression,
    },
}

impl ExprNode {
    /// Short lowercase name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExprNode::Value(_) => "value",
            ExprNode::Chain { op: ChainOp::Add, .. } => "addition",
            ExprNode::Chain { op: ChainOp::Mul, .. } => "multiplication",
            ExprNode::Chain { op: ChainOp::And, .. } => "and",
            ExprNode::Div { .. } => "division",
            ExprNode::Gte { .. } => "gte",
            ExprNode::Exp { .. } => "exponent",
            ExprNode::Log { .. } => "log",
            ExprNode::If { .. } => "if",
        }
    }

    /// Returns true if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ExprNode::Value(_))
    }

    /// Direct children, in rendering order.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            ExprNode::Value(_) => Vec::new(),
            ExprNode::Chain { head, tail, .. } => std::iter::once(head).chain(tail).collect(),
            ExprNode::Div {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            ExprNode::Gte { lhs, rhs } => vec![lhs, rhs],
            ExprNode::Exp { exponent, .. } => vec![exponent],
            ExprNode::Log { argument, .. } => vec![argument],
            ExprNode::If {
                condition,
                then,
                otherwise,
            } => vec![condition, then, otherwise],
        }
    }

    /// Same kind and scalar fields as `self`, with new children given in
    /// [`ExprNode::children`] order.
    pub(crate) fn with_children(&self, children: Vec<Expression>) -> ExprNode {
        let mut children = children.into_iter();
        let mut next = || match children.next() {
            Some(child) => child,
            None => unreachable!("child count is fixed per node kind"),
        };
        match self {
            ExprNode::Value(v) => ExprNode::Value(v.clone()),
            ExprNode::Chain { op, tail, .. } => ExprNode::Chain {
                op: *op,
                head: next(),
                tail: tail.as_ref().map(|_| next()),
            },
            ExprNode::Div { .. } => ExprNode::Div {
                numerator: next(),
                denominator: next(),
            },
            ExprNode::Gte { .. } => ExprNode::Gte {
                lhs: next(),
                rhs: next(),
            },
            ExprNode::Exp { base, .. } => ExprNode::Exp {
                base: *base,
                exponent: next(),
            },
            ExprNode::Log { base, .. } => ExprNode::Log {
                base: *base,
                argument: next(),
            },
            ExprNode::If { .. } => ExprNode::If {
                condition: next(),
                then: next(),
                otherwise: next(),
            },
        }
    }

    /// Moves the children of this node into `out`.
    pub(crate) fn take_children(self, out: &mut Vec<Expression>) {
        match self {
            ExprNode::Value(_) => {}
            ExprNode::Chain { head, tail, .. } => {
                out.push(head);
                out.extend(tail);
            }
            ExprNode::Div {
                numerator,
                denominator,
            } => out.extend([numerator, denominator]),
            ExprNode::Gte { lhs, rhs } => out.extend([lhs, rhs]),
            ExprNode::Exp { exponent, .. } => out.push(exponent),
            ExprNode::Log { argument, .. } => out.push(argument),
            ExprNode::If {
                condition,
                then,
                otherwise,
            } => out.extend([condition, then, otherwise]),
        }
    }

    /// Equal kind and scalar fields, ignoring children.
    pub(crate) fn same_shape(&self, other: &ExprNode) -> bool {
        match (self, other) {
            (ExprNode::Value(a), ExprNode::Value(b)) => a == b,
            (
                ExprNode::Chain { op: a, tail: ta, .. },
                ExprNode::Chain { op: b, tail: tb, .. },
            ) => a == b && ta.is_some() == tb.is_some(),
            (ExprNode::Div { .. }, ExprNode::Div { .. }) => true,
            (ExprNode::Gte { .. }, ExprNode::Gte { .. }) => true,
            (ExprNode::Exp { base: a, .. }, ExprNode::Exp { base: b, .. }) => a == b,
            (ExprNode::Log { base: a, .. }, ExprNode::Log { base: b, .. }) => a == b,
            (ExprNode::If { .. }, ExprNode::If { .. }) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce() {
        let a = Complex64::new(2.0, 1.0);
        let b = Complex64::new(3.0, 0.0);
        assert_eq!(ChainOp::Add.reduce(a, b), Complex64::new(5.0, 1.0));
        assert_eq!(ChainOp::Mul.reduce(a, b), Complex64::new(6.0, 3.0));
        assert_eq!(ChainOp::And.reduce(a, b), Complex64::one());
        assert_eq!(ChainOp::And.reduce(a, Complex64::zero()), Complex64::zero());
    }

    #[test]
    fn test_truthy_uses_real_part() {
        assert!(truthy(Complex64::new(-1.0, 0.0)));
        assert!(!truthy(Complex64::new(0.0, 5.0)));
        assert!(!truthy(Complex64::new(f64::EPSILON / 2.0, 0.0)));
    }

    #[test]
    fn test_children() {
        let x = Expression::var("x");
        let node = ExprNode::Chain {
            op: ChainOp::Add,
            head: x.clone(),
            tail: None,
        };
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.kind(), "addition");
        assert!(!node.is_leaf());
        assert!(ExprNode::Value(NumericValue::var("x")).is_leaf());
    }
}
