//! Stack-safe traversal of expression trees.
//!
//! `x += term` in a loop nests one level per term, so trees built by
//! accumulation are as deep as they are long. Every walk in this crate goes
//! through an explicit stack instead of the call stack.
//!
//! Shared sub-trees are visited once per reference.

use std::collections::BTreeSet;

use crate::expression::Expression;
use crate::node::ExprNode;
use crate::value::NumericValue;

/// Post-order fold over the tree.
///
/// `operands` picks which children of a node are folded first; `combine`
/// receives the node together with the results for those children, in the
/// order `operands` returned them. The first error stops the walk.
pub(crate) fn fold<'a, R, E, O, C>(root: &'a Expression, operands: O, mut combine: C) -> Result<R, E>
where
    O: Fn(&'a ExprNode) -> Vec<&'a Expression>,
    C: FnMut(&'a Expression, Vec<R>) -> Result<R, E>,
{
    enum Frame<'a> {
        Enter(&'a Expression),
        Exit(&'a Expression, usize),
    }

    let top = operands(root.node());
    let arity = top.len();
    let mut frames: Vec<Frame<'a>> = top.into_iter().rev().map(Frame::Enter).collect();
    let mut results: Vec<R> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(expr) => {
                let children = operands(expr.node());
                frames.push(Frame::Exit(expr, children.len()));
                frames.extend(children.into_iter().rev().map(Frame::Enter));
            }
            Frame::Exit(expr, n) => {
                let args = results.split_off(results.len() - n);
                results.push(combine(expr, args)?);
            }
        }
    }

    debug_assert_eq!(results.len(), arity);
    combine(root, results)
}

/// Count all node references in the tree.
pub fn count_nodes(root: &Expression) -> usize {
    let mut count = 0;
    let mut stack = vec![root];

    while let Some(expr) = stack.pop() {
        count += 1;
        stack.extend(expr.node().children());
    }

    count
}

/// Collect the names of all unbound leaves.
pub fn collect_variables(root: &Expression) -> BTreeSet<String> {
    let mut vars = BTreeSet::new();
    let mut stack = vec![root];

    while let Some(expr) = stack.pop() {
        match expr.node() {
            ExprNode::Value(NumericValue::Unbound(name)) => {
                vars.insert(name.clone());
            }
            node => stack.extend(node.children()),
        }
    }

    vars
}

/// Length of the longest root-to-leaf path, counting the root as depth 0.
pub fn max_depth(root: &Expression) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 0usize)];

    while let Some((expr, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(expr.node().children().into_iter().map(|c| (c, depth + 1)));
    }

    deepest
}

impl Expression {
    /// Variables which need to be bound before the expression can be evaluated.
    pub fn variables(&self) -> BTreeSet<String> {
        collect_variables(self)
    }

    /// Size of the expression counted as a tree (shared sub-trees repeat).
    pub fn node_count(&self) -> usize {
        count_nodes(self)
    }

    pub fn depth(&self) -> usize {
        max_depth(self)
    }
}
