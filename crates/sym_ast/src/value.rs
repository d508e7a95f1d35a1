//! Scalar leaves of the expression tree.
//!
//! A [`NumericValue`] is either a bound complex number or a named variable
//! that still waits for a value.

use std::collections::BTreeSet;
use std::fmt;

use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::env::Environment;

/// A scalar leaf: a concrete complex number or an unbound variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumericValue {
    /// A concrete value.
    Bound(Complex64),
    /// A placeholder for a value supplied later through binding.
    Unbound(String),
}

impl NumericValue {
    /// π as a bound constant.
    pub const PI: NumericValue = NumericValue::Bound(Complex64::new(std::f64::consts::PI, 0.0));

    /// Euler's number as a bound constant.
    pub const E: NumericValue = NumericValue::Bound(Complex64::new(std::f64::consts::E, 0.0));

    /// A bound real value.
    pub fn real_value(re: f64) -> Self {
        NumericValue::Bound(Complex64::new(re, 0.0))
    }

    /// A bound complex value.
    pub fn complex(re: f64, im: f64) -> Self {
        NumericValue::Bound(Complex64::new(re, im))
    }

    /// An unbound variable.
    pub fn var(name: impl Into<String>) -> Self {
        NumericValue::Unbound(name.into())
    }

    pub fn zero() -> Self {
        NumericValue::Bound(Complex64::zero())
    }

    pub fn one() -> Self {
        NumericValue::Bound(Complex64::one())
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, NumericValue::Bound(_))
    }

    /// The concrete value, if bound.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            NumericValue::Bound(c) => Some(*c),
            NumericValue::Unbound(_) => None,
        }
    }

    /// Real part, if bound.
    pub fn real(&self) -> Option<f64> {
        self.as_complex().map(|c| c.re)
    }

    /// Imaginary part, if bound.
    pub fn imaginary(&self) -> Option<f64> {
        self.as_complex().map(|c| c.im)
    }

    /// Variable name, if unbound.
    pub fn name(&self) -> Option<&str> {
        match self {
            NumericValue::Bound(_) => None,
            NumericValue::Unbound(name) => Some(name),
        }
    }

    /// `{}` when bound, `{name}` otherwise.
    pub fn variables(&self) -> BTreeSet<String> {
        match self {
            NumericValue::Bound(_) => BTreeSet::new(),
            NumericValue::Unbound(name) => BTreeSet::from([name.clone()]),
        }
    }

    /// Substitutes this value from `env` if it is an unbound name the
    /// environment knows. Anything else comes back unchanged.
    pub fn bind(&self, env: &Environment) -> NumericValue {
        match self {
            NumericValue::Unbound(name) => match env.get(name) {
                Some(value) => value.clone(),
                None => self.clone(),
            },
            NumericValue::Bound(_) => self.clone(),
        }
    }

    pub fn try_evaluate(&self) -> Option<Complex64> {
        self.as_complex()
    }

    /// Leaf derivative: `1` for the variable itself, `0` for everything else.
    pub fn derive(&self, x: &str) -> NumericValue {
        match self {
            NumericValue::Unbound(name) if name == x => NumericValue::one(),
            _ => NumericValue::zero(),
        }
    }
}

impl From<f64> for NumericValue {
    fn from(re: f64) -> Self {
        NumericValue::real_value(re)
    }
}

impl From<Complex64> for NumericValue {
    fn from(c: Complex64) -> Self {
        NumericValue::Bound(c)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Unbound(name) => write!(f, "{}", name),
            NumericValue::Bound(c) => {
                write!(f, "{:?}", c.re)?;
                if c.im != 0.0 {
                    write!(f, " + {:?}i", c.im)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables() {
        assert!(NumericValue::real_value(2.0).variables().is_empty());
        let vars = NumericValue::var("x").variables();
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["x".to_string()]);
    }

    #[test]
    fn test_bind_substitutes_only_known_names() {
        let env = Environment::new().with("x", 3.0);

        assert_eq!(NumericValue::var("x").bind(&env), NumericValue::real_value(3.0));
        assert_eq!(NumericValue::var("y").bind(&env), NumericValue::var("y"));
        assert_eq!(
            NumericValue::complex(1.0, 2.0).bind(&env),
            NumericValue::complex(1.0, 2.0)
        );
    }

    #[test]
    fn test_derive_leaf() {
        assert_eq!(NumericValue::var("x").derive("x"), NumericValue::one());
        assert_eq!(NumericValue::var("y").derive("x"), NumericValue::zero());
        assert_eq!(NumericValue::PI.derive("x"), NumericValue::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(NumericValue::var("W[3]").to_string(), "W[3]");
        assert_eq!(NumericValue::real_value(3.0).to_string(), "3.0");
        assert_eq!(NumericValue::real_value(-0.5).to_string(), "-0.5");
        assert_eq!(NumericValue::complex(1.0, 2.0).to_string(), "1.0 + 2.0i");
    }

    #[test]
    fn test_constants() {
        assert_eq!(NumericValue::PI.real(), Some(std::f64::consts::PI));
        assert_eq!(NumericValue::E.imaginary(), Some(0.0));
        assert_eq!(NumericValue::E.name(), None);
    }
}
