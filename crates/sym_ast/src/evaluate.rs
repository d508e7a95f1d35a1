//! Numeric evaluation of fully bound trees.
//!
//! Evaluation fails (no value) as soon as it reaches an unbound leaf on a
//! path it has to take. Domain problems are not checked: division by zero and
//! logarithms of non-positive numbers produce whatever IEEE / complex
//! arithmetic yields (NaN or infinities) and the caller interprets them.

use std::collections::BTreeSet;

use num_complex::Complex64;

use crate::error::SymbolicError;
use crate::expression::Expression;
use crate::node::{to_number, truthy, ExprNode};

impl Expression {
    /// The value of the expression, or `None` if a needed variable is unbound.
    pub fn evaluate(&self) -> Option<Complex64> {
        run(self, None)
    }

    /// Like [`Expression::evaluate`], but names the unbound variables that
    /// blocked evaluation. Variables only reachable through an unselected
    /// conditional branch are not reported.
    pub fn try_evaluate(&self) -> Result<Complex64, SymbolicError> {
        let mut missing = BTreeSet::new();
        run(self, Some(&mut missing)).ok_or_else(|| SymbolicError::Unbound {
            variables: missing.into_iter().collect(),
        })
    }

    /// Real part of the value.
    pub fn evaluate_real(&self) -> Option<f64> {
        self.evaluate().map(|c| c.re)
    }
}

enum Step<'a> {
    Eval(&'a Expression),
    /// Combine the operand values already on the value stack.
    Apply(&'a ExprNode),
    /// Pick a branch from the condition value on top of the value stack.
    Select(&'a ExprNode),
}

/// Evaluates with an explicit stack. Without `missing` the walk stops at the
/// first unbound leaf; with it, the walk carries on along the same path so
/// that every blocking name is collected.
fn run(root: &Expression, mut missing: Option<&mut BTreeSet<String>>) -> Option<Complex64> {
    let mut steps = vec![Step::Eval(root)];
    let mut values: Vec<Option<Complex64>> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Eval(expr) => match expr.node() {
                ExprNode::Value(v) => {
                    let value = v.try_evaluate();
                    if value.is_none() {
                        match missing.as_deref_mut() {
                            Some(names) => names.extend(v.name().map(str::to_string)),
                            None => return None,
                        }
                    }
                    values.push(value);
                }
                ExprNode::Chain {
                    head, tail: None, ..
                } => steps.push(Step::Eval(head)),
                ExprNode::If { condition, .. } => {
                    steps.push(Step::Select(expr.node()));
                    steps.push(Step::Eval(condition));
                }
                node => {
                    steps.push(Step::Apply(node));
                    steps.extend(node.children().into_iter().rev().map(Step::Eval));
                }
            },
            Step::Apply(node) => {
                let arity = node.children().len();
                let operands = values.split_off(values.len() - arity);
                let value = operands
                    .into_iter()
                    .collect::<Option<Vec<_>>>()
                    .map(|operands| apply(node, &operands));
                values.push(value);
            }
            Step::Select(node) => {
                let condition = values.pop().flatten();
                match (node, condition) {
                    (
                        ExprNode::If {
                            then, otherwise, ..
                        },
                        Some(c),
                    ) => steps.push(Step::Eval(if truthy(c) { then } else { otherwise })),
                    // Neither branch is known to be needed.
                    _ => values.push(None),
                }
            }
        }
    }

    values.pop().flatten()
}

fn apply(node: &ExprNode, operands: &[Complex64]) -> Complex64 {
    match (node, operands) {
        (ExprNode::Chain { op, .. }, [head, tail]) => op.reduce(*head, *tail),
        (ExprNode::Div { .. }, [n, d]) => *n / *d,
        (ExprNode::Gte { .. }, [l, r]) => to_number(l.re >= r.re),
        (ExprNode::Exp { base, .. }, [e]) => power(*base, *e),
        (ExprNode::Log { base, .. }, [a]) => Complex64::new(a.re.ln() / base.ln(), 0.0),
        _ => unreachable!("operand count is fixed per node kind"),
    }
}

/// `base ^ exponent`; stays in real arithmetic when both are real and the
/// base is non-negative.
fn power(base: Complex64, exponent: Complex64) -> Complex64 {
    if base.im == 0.0 && exponent.im == 0.0 && base.re >= 0.0 {
        Complex64::new(base.re.powf(exponent.re), 0.0)
    } else {
        base.powc(exponent)
    }
}
