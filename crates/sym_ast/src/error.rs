//! Error types for sym_ast crate.

use thiserror::Error;

/// Errors produced by the expression algorithms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// Evaluation reached a variable that was never bound.
    #[error("cannot evaluate: unbound variables {}", .variables.join(", "))]
    Unbound { variables: Vec<String> },

    /// The expression contains an operator without a derivative.
    #[error("'{node}' is not differentiable (while deriving with respect to '{var}')")]
    NotDifferentiable { node: &'static str, var: String },
}
