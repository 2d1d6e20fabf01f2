use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for antecedent variables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn get(&self, key: VariableKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, key: VariableKey, val: f64) {
        self.0.insert(key, val);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}
