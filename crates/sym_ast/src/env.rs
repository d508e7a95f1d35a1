//! Variable environments used for binding.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::NumericValue;

/// Maps variable names to the values substituted by [`Expression::bind_env`].
///
/// For instance `x^2 + y` bound in `{ x: 2, y: 3 }` becomes `2^2 + 3`.
/// Binding is order independent; the map is ordered only so that display and
/// serialization are deterministic.
///
/// [`Expression::bind_env`]: crate::Expression::bind_env
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    values: BTreeMap<String, NumericValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<NumericValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<NumericValue>,
    ) -> Option<NumericValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&NumericValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NumericValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NumericValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<NumericValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}

impl<K, V> Extend<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<NumericValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces() {
        let mut env = Environment::new().with("x", 1.0);
        let previous = env.insert("x", 2.0);
        assert_eq!(previous, Some(NumericValue::real_value(1.0)));
        assert_eq!(env.get("x"), Some(&NumericValue::real_value(2.0)));
        assert_eq!(env.len(), 1);

        assert_eq!(env.remove("x"), Some(NumericValue::real_value(2.0)));
        assert_eq!(env.remove("x"), None);
        assert!(env.is_empty());
    }

    #[test]
    fn test_from_iter_and_display() {
        let env: Environment = [("y", 2.0), ("x", 1.0)].into_iter().collect();
        assert_eq!(env.to_string(), "{x: 1.0, y: 2.0}");
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_toml_roundtrip() {
        let env = Environment::new()
            .with("W[0]", 0.25)
            .with("I[0]", NumericValue::complex(1.0, -1.0));
        let text = toml::to_string(&env).unwrap();
        let back: Environment = toml::from_str(&text).unwrap();
        assert_eq!(back, env);
    }
}
