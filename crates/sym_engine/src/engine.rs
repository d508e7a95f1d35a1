//! The engine owns the execution policy for fan-out work.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Runs independent per-item work (one gradient entry, one matrix element)
/// sequentially or on rayon workers, depending on [`EngineConfig`].
///
/// The expression trees handed to the workers are only read, so no locking
/// happens here.
pub struct Engine {
    config: EngineConfig,
    pool: Option<ThreadPool>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let pool = match (config.parallel, config.threads) {
            (true, Some(threads)) => {
                debug!(threads, "building dedicated worker pool");
                Some(ThreadPoolBuilder::new().num_threads(threads).build()?)
            }
            _ => None,
        };
        Ok(Self { config, pool })
    }

    pub fn sequential() -> Self {
        Self {
            config: EngineConfig::sequential(),
            pool: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies `f` to every item, keeping input order. Stops at the first
    /// error in sequential mode; in parallel mode one of the errors is
    /// returned.
    pub(crate) fn run<T, R, F>(&self, items: &[T], f: F) -> Result<Vec<R>, EngineError>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> Result<R, EngineError> + Sync + Send,
    {
        if !self.config.parallel {
            return items.iter().enumerate().map(|(i, item)| f(i, item)).collect();
        }

        let work = || {
            items
                .par_iter()
                .enumerate()
                .map(|(i, item)| f(i, item))
                .collect::<Result<Vec<R>, EngineError>>()
        };
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            pool: None,
        }
    }
}
