//! Argument Map Module
//!
//! Named runtime arguments of a single invocation.

use serde_json::Value;

use crate::error::ConfigError;

// == Argument Map ==
/// Declared parameter names paired with their runtime values.
///
/// Keeps the declared order; lookups are by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentMap {
    entries: Vec<(String, Value)>,
}

impl ArgumentMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    // == From Parts ==
    /// Pairs declared names with runtime values positionally.
    ///
    /// Fails when the two sequences differ in length or a name repeats.
    pub fn from_parts<N, I, V>(names: I, values: V) -> Result<Self, ConfigError>
    where
        N: Into<String>,
        I: IntoIterator<Item = N>,
        V: IntoIterator<Item = Value>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let values: Vec<Value> = values.into_iter().collect();

        if names.len() != values.len() {
            return Err(ConfigError::ArgumentCountMismatch {
                declared: names.len(),
                supplied: values.len(),
            });
        }

        let mut map = Self {
            entries: Vec::with_capacity(names.len()),
        };
        for (name, value) in names.into_iter().zip(values) {
            if map.contains(&name) {
                return Err(ConfigError::DuplicateParameter(name));
            }
            map.entries.push((name, value));
        }
        Ok(map)
    }

    /// Adds or replaces one argument.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Looks up an argument by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
