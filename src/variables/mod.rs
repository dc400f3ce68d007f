//! Variable storage for linecalc
//!
//! One flat namespace of integer variables per run. No scoping, no removal.

use crate::error::{CalcError, Result};
use std::collections::HashMap;

/// Variable environment mapping names to integer values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, i64>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Bind a variable, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.variables.insert(name.into(), value);
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Result<i64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| CalcError::UndefinedVariable(name.to_string()))
    }

    /// Check if a variable has been assigned
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// All bindings ordered by name
    pub fn iter_sorted(&self) -> Vec<(&str, i64)> {
        let mut bindings: Vec<(&str, i64)> = self
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}
