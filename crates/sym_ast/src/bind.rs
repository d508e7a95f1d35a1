//! Variable binding (substitution of values for names).
//!
//! Binding never edits the input tree. A sub-tree that contains none of the
//! environment's names comes back as the same shared node, so binding one
//! input of a large network only allocates along the paths that mention it.

use std::convert::Infallible;

use crate::env::Environment;
use crate::expression::Expression;
use crate::node::ExprNode;
use crate::traversal::fold;
use crate::value::NumericValue;

impl Expression {
    /// Binds a single variable.
    pub fn bind(&self, name: &str, value: impl Into<NumericValue>) -> Expression {
        let env = Environment::new().with(name, value);
        self.bind_env(&env)
    }

    /// Substitutes every variable present in `env`. Names missing from `env`
    /// stay free; partial binding is expected.
    pub fn bind_env(&self, env: &Environment) -> Expression {
        if env.is_empty() {
            return self.clone();
        }

        let bound = fold(self, ExprNode::children, |expr, children: Vec<Expression>| {
            let node = expr.node();
            let rebuilt = match node {
                ExprNode::Value(v @ NumericValue::Unbound(name)) if env.contains(name) => {
                    Expression::value(v.bind(env))
                }
                _ if children
                    .iter()
                    .zip(node.children())
                    .all(|(new, old)| new.ptr_eq(old)) =>
                {
                    expr.clone()
                }
                _ => Expression::new(node.with_children(children)),
            };
            Ok::<_, Infallible>(rebuilt)
        });
        match bound {
            Ok(e) => e,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_leaves_original_untouched() {
        let e = Expression::var("x") + Expression::var("y");
        let bound = e.bind("x", 1.0);

        assert_eq!(e.to_string(), "(x + y)");
        assert_eq!(bound.to_string(), "(1.0 + y)");
    }

    #[test]
    fn test_bind_shares_untouched_subtrees() {
        let weights = Expression::var("w") * Expression::var("v");
        let e = &weights + Expression::var("i");

        let bound = e.bind("i", 2.0);
        match bound.node() {
            ExprNode::Chain { head, .. } => assert!(head.ptr_eq(&weights)),
            other => panic!("expected chain, got {:?}", other),
        }

        // Nothing to substitute: the very same tree comes back.
        assert!(e.bind("z", 1.0).ptr_eq(&e));
    }

    #[test]
    fn test_bind_preserves_chain_shape() {
        let e = Expression::sum(Expression::var("a"), [Expression::var("b")]);
        let bound = e.bind("b", 3.0);
        assert_eq!(bound.to_string(), "(a + (3.0))");
    }

    #[test]
    fn test_bind_inside_unary_and_ternary_nodes() {
        let x = Expression::var("x");
        let e = Expression::if_else(
            Expression::gte(x.clone(), Expression::zero()),
            Expression::exp(2.0, x.clone()),
            Expression::log(2.0, x.clone()),
        );
        assert!(e.bind("x", 4.0).variables().is_empty());
    }

    #[test]
    fn test_bind_deep_accumulated_sum() {
        let mut acc = Expression::var("x");
        for _ in 0..100_000 {
            acc += Expression::var("y");
        }
        let bound = acc.bind("y", 1.0);
        assert_eq!(bound.variables().into_iter().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(bound.bind("x", 0.5).evaluate_real(), Some(100_000.5));
    }
}
