use sym_ast::SymbolicError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),

    #[error("gradient for '{parameter}' failed: {source}")]
    Gradient {
        parameter: String,
        #[source]
        source: SymbolicError,
    },

    #[error("expression {index} could not be evaluated: {source}")]
    Batch {
        index: usize,
        #[source]
        source: SymbolicError,
    },

    #[error("{outputs} outputs but {targets} targets")]
    LengthMismatch { outputs: usize, targets: usize },

    #[error("nothing to sum: no outputs given")]
    Empty,

    #[error("invalid engine config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
