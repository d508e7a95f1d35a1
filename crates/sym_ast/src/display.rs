//! Fully parenthesized infix rendering.
//!
//! Chains render as nested binary groups (`((a + b) + c)`), never as a flat
//! n-ary list.

use std::fmt;

use crate::expression::Expression;
use crate::node::{ChainOp, ExprNode};
use crate::value::NumericValue;

enum Piece<'a> {
    Node(&'a ExprNode),
    Text(&'static str),
    Op(ChainOp),
    Scalar(NumericValue),
}

impl fmt::Display for ExprNode {
    /// Writes with an explicit stack of pending pieces, so arbitrarily deep
    /// trees render without recursion.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Op(op) => {
                    write!(f, " {} ", op.symbol())?;
                    continue;
                }
                Piece::Scalar(value) => {
                    write!(f, "{}", value)?;
                    continue;
                }
                Piece::Node(node) => node,
            };

            // Pieces are pushed in reverse reading order.
            match node {
                ExprNode::Value(v) => write!(f, "{}", v)?,
                ExprNode::Chain { op, head, tail } => match tail {
                    Some(tail) => pending.extend([
                        Piece::Text(")"),
                        Piece::Node(tail.node()),
                        Piece::Op(*op),
                        Piece::Node(head.node()),
                        Piece::Text("("),
                    ]),
                    None => pending.extend([
                        Piece::Text(")"),
                        Piece::Node(head.node()),
                        Piece::Text("("),
                    ]),
                },
                ExprNode::Div {
                    numerator,
                    denominator,
                } => pending.extend([
                    Piece::Text(")"),
                    Piece::Node(denominator.node()),
                    Piece::Text(" / "),
                    Piece::Node(numerator.node()),
                    Piece::Text("("),
                ]),
                ExprNode::Gte { lhs, rhs } => pending.extend([
                    Piece::Text(")"),
                    Piece::Node(rhs.node()),
                    Piece::Text(" >= "),
                    Piece::Node(lhs.node()),
                    Piece::Text("("),
                ]),
                ExprNode::Exp { base, exponent } => pending.extend([
                    Piece::Text(")"),
                    Piece::Node(exponent.node()),
                    Piece::Text(" ^ "),
                    Piece::Scalar(NumericValue::Bound(*base)),
                    Piece::Text("("),
                ]),
                ExprNode::Log { base, argument } => pending.extend([
                    Piece::Text(")"),
                    Piece::Node(argument.node()),
                    Piece::Text(", "),
                    Piece::Scalar(NumericValue::real_value(*base)),
                    Piece::Text("log("),
                ]),
                ExprNode::If {
                    condition,
                    then,
                    otherwise,
                } => pending.extend([
                    Piece::Text("))"),
                    Piece::Node(otherwise.node()),
                    Piece::Text(") : ("),
                    Piece::Node(then.node()),
                    Piece::Text(") ? ("),
                    Piece::Node(condition.node()),
                    Piece::Text("(("),
                ]),
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.node(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_chain_rendering() {
        let e = Expression::var("a") + Expression::var("b") + Expression::var("c");
        assert_eq!(e.to_string(), "((a + b) + c)");
    }

    #[test]
    fn test_node_rendering() {
        let x = Expression::var("x");
        assert_eq!((&x / 2.0).to_string(), "(x / 2.0)");
        assert_eq!(
            Expression::gte(x.clone(), Expression::zero()).to_string(),
            "(x >= 0.0)"
        );
        assert_eq!(Expression::exp(2.0, x.clone()).to_string(), "(2.0 ^ x)");
        assert_eq!(Expression::log(10.0, x.clone()).to_string(), "log(10.0, x)");
        assert_eq!(
            Expression::and(x.clone(), Expression::one()).to_string(),
            "(x && 1.0)"
        );
        assert_eq!(
            Expression::if_else(x.clone(), Expression::one(), Expression::zero()).to_string(),
            "((x) ? (1.0) : (0.0))"
        );
    }

    #[test]
    fn test_deep_tree_renders() {
        let mut acc = Expression::var("x");
        for _ in 0..100_000 {
            acc += Expression::one();
        }
        let text = acc.to_string();
        let opening = "(".repeat(100_000);
        assert!(text.starts_with(&opening));
        assert!(text[opening.len()..].starts_with("x + 1.0) + 1.0)"));
        assert!(text.ends_with(" + 1.0)"));
        assert_eq!(text.matches('(').count(), 100_000);
    }
}
