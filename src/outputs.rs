use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Results of one evaluation cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    defuzzificated_memberships: HashMap<VariableKey, f64>,
    aggregated_memberships: HashMap<VariableKey, Vec<f64>>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(
        defuzzificated_memberships: HashMap<VariableKey, f64>,
        aggregated_memberships: HashMap<VariableKey, Vec<f64>>,
        firing_strengths: Vec<f64>,
    ) -> Self {
        Self {
            defuzzificated_memberships,
            aggregated_memberships,
            firing_strengths,
        }
    }

    /// Crisp value of a consequent.
    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.get_by_key(var.0)
    }

    pub fn get_by_key(&self, key: VariableKey) -> Option<f64> {
        self.defuzzificated_memberships.get(&key).copied()
    }

    /// Aggregated fuzzy set of a consequent, sampled over its universe.
    pub fn aggregated<I>(&self, var: Variable<I>) -> Option<&[f64]> {
        self.aggregated_memberships.get(&var.0).map(Vec::as_slice)
    }

    /// Firing strength of each rule, in rule order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }
}
