//! Engine configuration.
//!
//! Read from TOML; every field is optional:
//!
//! ```toml
//! parallel = true
//! threads = 4
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fan per-parameter work out over rayon workers.
    pub parallel: bool,
    /// Size of a dedicated worker pool. `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl EngineConfig {
    /// Single-threaded configuration.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.parallel = true;
        self.threads = Some(threads);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no engine config, using defaults");
            Ok(Self::default())
        }
    }
}
