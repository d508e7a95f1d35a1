//! # sym_engine
//!
//! Work that fans out over one shared [`sym_ast::Expression`]:
//!
//! - [`Engine::gradient`] differentiates an error expression with respect to
//!   every parameter and evaluates each partial derivative.
//! - [`Engine::evaluate_all`] binds and evaluates a batch of expressions
//!   against one environment.
//!
//! Both run on rayon workers unless the [`EngineConfig`] says otherwise.
//!
//! ```
//! use sym_ast::{Environment, Expression};
//! use sym_engine::{squared_error, Engine};
//!
//! let w = Expression::var("w");
//! let prediction = &w * 2.0;
//! let error = squared_error(&[prediction], &[Expression::constant(6.0)]).unwrap();
//!
//! let env = Environment::new().with("w", 1.0);
//! let grad = Engine::default()
//!     .gradient(&error, &env, &["w".to_string()])
//!     .unwrap();
//! // d/dw (2w - 6)^2 = 4 (2w - 6)
//! assert_eq!(grad.real("w"), Some(-16.0));
//! ```

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod symbols;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use gradient::Gradient;
pub use symbols::{squared_error, DenseWeights, SymbolGenerator, WeightAddress};
