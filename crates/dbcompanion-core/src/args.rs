//! Bound-argument mapping.
//!
//! An [`ArgMap`] associates a handler's parameter names with the values
//! supplied in one particular call. It is built explicitly by the caller
//! rather than recovered by reflection, and discarded after the call.
//!
//! Forwarded catch-all arguments follow a reserved-name convention: an entry
//! named `kwargs` or `args` whose value is a map is flattened one level into
//! the top-level mapping, so validators can target parameters nested inside a
//! forwarded aggregate.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::Value;

/// Reserved names for forwarded aggregate arguments, flattened in this order.
pub const AGGREGATE_NAMES: [&str; 2] = ["kwargs", "args"];

/// Mapping from parameter name to the argument value supplied in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArgMap {
    entries: BTreeMap<String, Value>,
}

impl ArgMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// # Example
    ///
    /// ```
    /// use dbcompanion_core::ArgMap;
    ///
    /// let args = ArgMap::new().with("user_id", 7).with("name", "Alice");
    /// assert_eq!(args.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a value, overwriting any existing entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Get a value by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Remove a value, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Whether a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over bound parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Promote entries of reserved aggregate maps to the top level.
    ///
    /// For each reserved name (`kwargs`, then `args`) whose entry is a
    /// `Value::Map`, the entry is removed and its contents are merged into the
    /// top level, overwriting on key collision. Only one level is flattened;
    /// aggregates holding non-map values are left untouched.
    pub fn flatten_aggregates(&mut self) {
        for name in AGGREGATE_NAMES {
            if matches!(self.entries.get(name), Some(Value::Map(_))) {
                if let Some(Value::Map(nested)) = self.entries.remove(name) {
                    self.entries.extend(nested);
                }
            }
        }
    }
}

impl FromIterator<(String, Value)> for ArgMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(pairs: &[(&str, Value)]) -> Value {
        Value::Map(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_set_get_remove() {
        let mut args = ArgMap::new().with("user_id", 7);
        assert!(args.contains("user_id"));
        assert_eq!(args.get("user_id"), Some(&Value::Int(7)));
        assert_eq!(args.remove("user_id"), Some(Value::Int(7)));
        assert!(args.is_empty());
    }

    #[test]
    fn test_flatten_promotes_kwargs_entries() {
        let mut args = ArgMap::new().with("kwargs", nested(&[("user_id", Value::Int(7))]));
        args.flatten_aggregates();

        assert!(!args.contains("kwargs"));
        assert_eq!(args.get("user_id"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_flatten_nested_wins_on_collision() {
        let mut args = ArgMap::new()
            .with("user_id", 1)
            .with("args", nested(&[("user_id", Value::Int(2))]));
        args.flatten_aggregates();

        assert_eq!(args.get("user_id"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_flatten_ignores_non_map_aggregates() {
        let mut args = ArgMap::new().with("args", Value::List(vec![Value::Int(1)]));
        args.flatten_aggregates();

        assert_eq!(args.get("args"), Some(&Value::List(vec![Value::Int(1)])));
    }

    #[test]
    fn test_flatten_is_single_level() {
        let inner = nested(&[("deep", Value::Int(3))]);
        let mut args = ArgMap::new().with("kwargs", nested(&[("outer", inner.clone())]));
        args.flatten_aggregates();

        // The nested map is promoted as-is, not recursively flattened.
        assert_eq!(args.get("outer"), Some(&inner));
        assert!(!args.contains("deep"));
    }
}
