//! Element-wise bind + evaluate for collections of expressions, e.g. the
//! entries of a symbolic matrix or the outputs of a network.

use num_complex::Complex64;
use sym_ast::{Environment, Expression};
use tracing::debug;

use crate::engine::Engine;
use crate::error::EngineError;

impl Engine {
    /// Binds every expression in `env` and evaluates it, keeping order.
    pub fn evaluate_all(
        &self,
        expressions: &[Expression],
        env: &Environment,
    ) -> Result<Vec<Complex64>, EngineError> {
        debug!(count = expressions.len(), "evaluating batch");
        self.run(expressions, |index, expr| {
            expr.bind_env(env)
                .try_evaluate()
                .map_err(|source| EngineError::Batch { index, source })
        })
    }

    /// Real parts of [`Engine::evaluate_all`].
    pub fn evaluate_all_real(
        &self,
        expressions: &[Expression],
        env: &Environment,
    ) -> Result<Vec<f64>, EngineError> {
        Ok(self
            .evaluate_all(expressions, env)?
            .into_iter()
            .map(|c| c.re)
            .collect())
    }

    /// Binds every expression without evaluating; the results may still hold
    /// free variables.
    pub fn bind_all(&self, expressions: &[Expression], env: &Environment) -> Vec<Expression> {
        expressions.iter().map(|e| e.bind_env(env)).collect()
    }
}
