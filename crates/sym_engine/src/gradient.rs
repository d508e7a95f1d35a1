//! Gradient fan-out over a shared error expression.
//!
//! For every parameter `w` the engine computes `d error / d w`, binds it in
//! the environment snapshot and evaluates it. Each parameter is independent,
//! so the work runs on rayon workers when the engine is parallel. All workers
//! read the same tree and the same environment.

use std::collections::{BTreeMap, HashSet};

use num_complex::Complex64;
use sym_ast::{Environment, Expression};
use tracing::{debug, trace, warn, Level};

use crate::engine::Engine;
use crate::error::EngineError;

/// Partial derivatives of one expression, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gradient {
    values: BTreeMap<String, Complex64>,
}

impl Gradient {
    pub fn get(&self, parameter: &str) -> Option<Complex64> {
        self.values.get(parameter).copied()
    }

    /// Real part of one entry; gradients of real-valued errors are real.
    pub fn real(&self, parameter: &str) -> Option<f64> {
        self.get(parameter).map(|c| c.re)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Complex64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Euclidean norm over all entries.
    pub fn norm(&self) -> f64 {
        self.values.values().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
    }
}

impl Engine {
    /// Computes `d error / d p` for every `p` in `parameters`, evaluated in
    /// `env`.
    ///
    /// Variables of `env` that are not parameters are bound once up front,
    /// so each per-parameter derivative only walks what is left symbolic.
    /// Fails if any derivative is undefined or does not evaluate, naming the
    /// parameter and the variables still unbound.
    pub fn gradient(
        &self,
        error: &Expression,
        env: &Environment,
        parameters: &[String],
    ) -> Result<Gradient, EngineError> {
        debug!(
            parameters = parameters.len(),
            bound = env.len(),
            parallel = self.config().parallel,
            "computing gradient"
        );

        let symbolic: HashSet<&str> = parameters.iter().map(String::as_str).collect();
        let fixed: Environment = env
            .iter()
            .filter(|(name, _)| !symbolic.contains(name))
            .map(|(name, value)| (name, value.clone()))
            .collect();
        let prepared = error.bind_env(&fixed);

        let entries = self.run(parameters, |_, parameter| {
            let value = partial(&prepared, env, parameter).map_err(|source| {
                warn!(%parameter, %source, "gradient entry failed");
                EngineError::Gradient {
                    parameter: parameter.clone(),
                    source,
                }
            })?;
            Ok((parameter.clone(), value))
        })?;

        Ok(Gradient {
            values: entries.into_iter().collect(),
        })
    }
}

fn partial(
    error: &Expression,
    env: &Environment,
    parameter: &str,
) -> Result<Complex64, sym_ast::SymbolicError> {
    let derivative = error.derive(parameter)?;
    if tracing::enabled!(Level::TRACE) {
        trace!(%parameter, nodes = derivative.node_count(), "derived");
    }
    derivative.bind_env(env).try_evaluate()
}
