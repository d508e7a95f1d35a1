//! The [`Expression`] handle and its operator-level construction.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::sync::Arc;

use num_complex::Complex64;

use crate::node::{ChainOp, ExprNode};
use crate::value::NumericValue;

/// A shared handle to an immutable expression tree.
///
/// Cloning is O(1) and shares the tree. Operators build one new node that
/// references their operands, so composing `a + a` keeps a single copy of
/// `a`. Nothing ever edits a node in place: assignment and `+=` only change
/// which root a handle points to.
#[derive(Clone)]
pub struct Expression {
    root: Arc<ExprNode>,
}

impl Expression {
    pub fn new(node: ExprNode) -> Self {
        Self {
            root: Arc::new(node),
        }
    }

    pub fn node(&self) -> &ExprNode {
        &self.root
    }

    /// True if both handles point at the very same tree.
    pub fn ptr_eq(&self, other: &Expression) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    // === Leaves ===

    pub fn value(value: NumericValue) -> Self {
        Self::new(ExprNode::Value(value))
    }

    pub fn constant(re: f64) -> Self {
        Self::value(NumericValue::real_value(re))
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Self::value(NumericValue::complex(re, im))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::value(NumericValue::var(name))
    }

    pub fn zero() -> Self {
        Self::value(NumericValue::zero())
    }

    pub fn one() -> Self {
        Self::value(NumericValue::one())
    }

    pub fn pi() -> Self {
        Self::value(NumericValue::PI)
    }

    pub fn e() -> Self {
        Self::value(NumericValue::E)
    }

    /// The leaf value, if this expression is a single leaf.
    pub fn as_value(&self) -> Option<&NumericValue> {
        match self.node() {
            ExprNode::Value(v) => Some(v),
            _ => None,
        }
    }

    // === Compound constructors ===

    /// `base ^ exponent`.
    pub fn exp(base: impl Into<Complex64>, exponent: Expression) -> Self {
        Self::new(ExprNode::Exp {
            base: base.into(),
            exponent,
        })
    }

    /// `log(argument) / log(base)`, real-valued.
    pub fn log(base: f64, argument: Expression) -> Self {
        Self::new(ExprNode::Log { base, argument })
    }

    /// `lhs >= rhs`, evaluating to 1 or 0.
    pub fn gte(lhs: Expression, rhs: Expression) -> Self {
        Self::new(ExprNode::Gte { lhs, rhs })
    }

    /// Boolean `lhs && rhs`, evaluating to 1 or 0.
    pub fn and(lhs: Expression, rhs: Expression) -> Self {
        Self::pair(ChainOp::And, lhs, rhs)
    }

    pub fn if_else(condition: Expression, then: Expression, otherwise: Expression) -> Self {
        Self::new(ExprNode::If {
            condition,
            then,
            otherwise,
        })
    }

    /// `head + rest[0] + rest[1] + ...` as one right-leaning chain.
    pub fn sum(head: Expression, rest: impl IntoIterator<Item = Expression>) -> Self {
        Self::chain(ChainOp::Add, head, rest)
    }

    /// `head * rest[0] * rest[1] * ...` as one right-leaning chain.
    pub fn product(head: Expression, rest: impl IntoIterator<Item = Expression>) -> Self {
        Self::chain(ChainOp::Mul, head, rest)
    }

    /// `head && rest[0] && ...` as one right-leaning chain.
    pub fn all(head: Expression, rest: impl IntoIterator<Item = Expression>) -> Self {
        Self::chain(ChainOp::And, head, rest)
    }

    /// Builds a chain from a non-empty sequence of terms.
    ///
    /// The last term becomes the end node, so `sum(a, [b, c])` is
    /// `(a + (b + (c)))`.
    pub fn chain(op: ChainOp, head: Expression, rest: impl IntoIterator<Item = Expression>) -> Self {
        let end = |term: Expression| {
            Self::new(ExprNode::Chain {
                op,
                head: term,
                tail: None,
            })
        };

        let mut rest: Vec<Expression> = rest.into_iter().collect();
        let mut acc = match rest.pop() {
            Some(last) => end(last),
            None => return end(head),
        };
        while let Some(term) = rest.pop() {
            acc = Self::pair(op, term, acc);
        }
        Self::pair(op, head, acc)
    }

    fn pair(op: ChainOp, head: Expression, tail: Expression) -> Self {
        Self::new(ExprNode::Chain {
            op,
            head,
            tail: Some(tail),
        })
    }
}

/// Structural equality, compared with an explicit stack.
impl PartialEq for Expression {
    fn eq(&self, other: &Expression) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.ptr_eq(b) {
                continue;
            }
            if !a.node().same_shape(b.node()) {
                return false;
            }
            pending.extend(a.node().children().into_iter().zip(b.node().children()));
        }
        true
    }
}

/// Releases the tree without recursing once per level.
///
/// Nodes this handle owns exclusively are emptied and their children queued;
/// nodes still shared elsewhere only lose a reference.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.root, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach(&mut expr.root, &mut pending);
        }
    }
}

fn detach(root: &mut Arc<ExprNode>, out: &mut Vec<Expression>) {
    if let Some(node) = Arc::get_mut(root) {
        if !node.is_leaf() {
            let placeholder = ExprNode::Value(NumericValue::Bound(Complex64::new(0.0, 0.0)));
            std::mem::replace(node, placeholder).take_children(out);
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Expression::zero()
    }
}

impl From<NumericValue> for Expression {
    fn from(value: NumericValue) -> Self {
        Expression::value(value)
    }
}

impl From<f64> for Expression {
    fn from(re: f64) -> Self {
        Expression::constant(re)
    }
}

impl From<Complex64> for Expression {
    fn from(c: Complex64) -> Self {
        Expression::value(NumericValue::Bound(c))
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({})", self)
    }
}

// === Operators ===

impl Add for Expression {
    type Output = Expression;
    fn add(self, rhs: Expression) -> Expression {
        Expression::pair(ChainOp::Add, self, rhs)
    }
}

impl Mul for Expression {
    type Output = Expression;
    fn mul(self, rhs: Expression) -> Expression {
        Expression::pair(ChainOp::Mul, self, rhs)
    }
}

/// `lhs - rhs` is `lhs + (-1 * rhs)`.
impl Sub for Expression {
    type Output = Expression;
    fn sub(self, rhs: Expression) -> Expression {
        self + (-rhs)
    }
}

impl Div for Expression {
    type Output = Expression;
    fn div(self, rhs: Expression) -> Expression {
        Expression::new(ExprNode::Div {
            numerator: self,
            denominator: rhs,
        })
    }
}

impl Neg for Expression {
    type Output = Expression;
    fn neg(self) -> Expression {
        Expression::constant(-1.0) * self
    }
}

impl Neg for &Expression {
    type Output = Expression;
    fn neg(self) -> Expression {
        -self.clone()
    }
}

/// Re-points the handle at `(self + rhs)`; the old tree is left untouched.
impl AddAssign for Expression {
    fn add_assign(&mut self, rhs: Expression) {
        *self = self.clone() + rhs;
    }
}

impl AddAssign<&Expression> for Expression {
    fn add_assign(&mut self, rhs: &Expression) {
        *self = self.clone() + rhs.clone();
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Expression> for &Expression {
            type Output = Expression;
            fn $method(self, rhs: &Expression) -> Expression {
                $trait::$method(self.clone(), rhs.clone())
            }
        }

        impl $trait<&Expression> for Expression {
            type Output = Expression;
            fn $method(self, rhs: &Expression) -> Expression {
                $trait::$method(self, rhs.clone())
            }
        }

        impl $trait<Expression> for &Expression {
            type Output = Expression;
            fn $method(self, rhs: Expression) -> Expression {
                $trait::$method(self.clone(), rhs)
            }
        }

        impl $trait<f64> for Expression {
            type Output = Expression;
            fn $method(self, rhs: f64) -> Expression {
                $trait::$method(self, Expression::constant(rhs))
            }
        }

        impl $trait<f64> for &Expression {
            type Output = Expression;
            fn $method(self, rhs: f64) -> Expression {
                $trait::$method(self.clone(), Expression::constant(rhs))
            }
        }

        impl $trait<Expression> for f64 {
            type Output = Expression;
            fn $method(self, rhs: Expression) -> Expression {
                $trait::$method(Expression::constant(self), rhs)
            }
        }

        impl $trait<&Expression> for f64 {
            type Output = Expression;
            fn $method(self, rhs: &Expression) -> Expression {
                $trait::$method(Expression::constant(self), rhs.clone())
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_share_operands() {
        let a = Expression::var("a");
        let s = &a + &a;
        match s.node() {
            ExprNode::Chain { head, tail, .. } => {
                assert!(head.ptr_eq(&a));
                assert!(tail.as_ref().is_some_and(|t| t.ptr_eq(&a)));
            }
            other => panic!("expected chain, got {:?}", other),
        }
    }

    #[test]
    fn test_add_assign_replaces_root() {
        let base = Expression::var("x");
        let mut acc = base.clone();
        acc += Expression::constant(1.0);
        acc += &base;

        // The original handle still sees the original leaf.
        assert_eq!(base.to_string(), "x");
        assert_eq!(acc.to_string(), "((x + 1.0) + x)");
    }

    #[test]
    fn test_chain_is_right_leaning() {
        let e = Expression::sum(
            Expression::var("a"),
            [Expression::var("b"), Expression::var("c")],
        );
        assert_eq!(e.to_string(), "(a + (b + (c)))");

        let single = Expression::product(Expression::var("a"), []);
        assert_eq!(single.to_string(), "(a)");
    }

    #[test]
    fn test_sub_and_neg() {
        let e = Expression::var("a") - Expression::var("b");
        assert_eq!(e.to_string(), "(a + (-1.0 * b))");
        assert_eq!((-Expression::var("a")).to_string(), "(-1.0 * a)");
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Expression::default().as_value(), Some(&NumericValue::zero()));
    }

    #[test]
    fn test_structural_equality() {
        let build = || Expression::var("x") * 2.0 + Expression::exp(2.0, Expression::var("y"));
        assert_eq!(build(), build());
        assert_ne!(build(), Expression::var("x") * 2.0 + Expression::exp(3.0, Expression::var("y")));
        assert_ne!(
            Expression::sum(Expression::var("a"), [Expression::var("b")]),
            Expression::var("a") + Expression::var("b")
        );
    }

    #[test]
    fn test_drop_keeps_shared_subtrees_alive() {
        let shared = Expression::var("w") * Expression::var("i");
        let e = &shared + 1.0;
        drop(e);
        assert_eq!(shared.to_string(), "(w * i)");
    }

    #[test]
    fn test_deep_accumulation_compares_and_drops() {
        let build = || {
            let mut acc = Expression::var("x");
            for _ in 0..100_000 {
                acc += Expression::one();
            }
            acc
        };
        let (a, b) = (build(), build());
        assert_eq!(a, b);
        drop(a);
        drop(b);
    }
}
