//! # sym_ast
//!
//! Immutable symbolic expression trees over named variables and complex
//! constants.
//!
//! - [`Expression`] is a cheap, shareable handle to a tree of [`ExprNode`]s.
//! - [`Expression::bind_env`] substitutes values from an [`Environment`].
//! - [`Expression::evaluate`] computes the value once nothing is left unbound.
//! - [`Expression::derive`] builds the exact partial derivative.
//!
//! ```
//! use sym_ast::{Environment, Expression};
//!
//! let x = Expression::var("x");
//! let y = Expression::var("y");
//! let e = &x + &y * 2.0;
//!
//! let env = Environment::new().with("x", 3.0).with("y", 4.0);
//! assert_eq!(e.bind_env(&env).evaluate_real(), Some(11.0));
//!
//! let dy = e.derive("y").unwrap();
//! assert_eq!(dy.bind_env(&env).evaluate_real(), Some(2.0));
//! ```
//!
//! Trees are never mutated after construction, so an `Expression` can be
//! shared between threads and differentiated concurrently without locking.
//! All walks use explicit stacks (see [`traversal`]), so depth is bounded by
//! memory rather than by the thread's stack.

pub mod bind;
pub mod derive;
pub mod display;
pub mod env;
pub mod error;
pub mod evaluate;
pub mod expression;
pub mod node;
pub mod traversal;
pub mod value;

pub use env::Environment;
pub use error::SymbolicError;
pub use expression::Expression;
pub use node::{ChainOp, ExprNode};
pub use traversal::{collect_variables, count_nodes, max_depth};
pub use value::NumericValue;

pub use num_complex::Complex64;
