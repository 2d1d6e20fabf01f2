#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::inference::MamdaniInference;

/// What to do with an input outside its variable's universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutOfRangePolicy {
    /// Fail with [`FuzzyError::InputOutOfRange`](crate::FuzzyError::InputOutOfRange)
    #[default]
    Reject,
    /// Clamp to the nearest universe bound
    Clamp,
}

/// What to do when a consequent's aggregated set is all zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoRuleFiredPolicy {
    /// Fail with [`FuzzyError::NoRuleFired`](crate::FuzzyError::NoRuleFired)
    #[default]
    Error,
    /// Report the middle of the consequent's universe
    Midpoint,
}

/// Evaluation settings of a [`Simulation`](crate::Simulation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    pub inference: MamdaniInference,
    pub out_of_range: OutOfRangePolicy,
    pub no_rule_fired: NoRuleFiredPolicy,
}

impl SimulationConfig {
    pub fn with_inference(mut self, inference: MamdaniInference) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    pub fn with_no_rule_fired(mut self, policy: NoRuleFiredPolicy) -> Self {
        self.no_rule_fired = policy;
        self
    }
}
