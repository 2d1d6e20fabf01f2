use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::config::{NoRuleFiredPolicy, OutOfRangePolicy, SimulationConfig};
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::system::ControlSystem;
use crate::variable::{unknown_key, Role, Variable, VariableKey};

/// Scratch state for evaluating a [`ControlSystem`].
///
/// Inputs persist between calls to [`compute`](Self::compute) until they are
/// overwritten or cleared. A failed `compute` leaves the previous outputs
/// untouched.
#[derive(Debug)]
pub struct Simulation<'s, T> {
    system: &'s ControlSystem<T>,
    config: SimulationConfig,
    inputs: Inputs,
    outputs: Option<Outputs>,
}

impl<'s, T: Eq + Hash + Clone + Debug> Simulation<'s, T> {
    pub fn new(system: &'s ControlSystem<T>) -> Self {
        Self::with_config(system, SimulationConfig::default())
    }

    pub fn with_config(system: &'s ControlSystem<T>, config: SimulationConfig) -> Self {
        Self {
            system,
            config,
            inputs: Inputs::new(),
            outputs: None,
        }
    }

    pub fn system(&self) -> &'s ControlSystem<T> {
        self.system
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_input<I>(&mut self, var: Variable<I>, value: f64) -> Result<()> {
        self.set_input_by_key(var.0, value)
    }

    pub fn set_input_named(&mut self, name: &str, value: f64) -> Result<()> {
        let key = self.system.key_of(name).ok_or_else(|| FuzzyError::UnknownVariable {
            name: name.to_owned(),
        })?;

        self.set_input_by_key(key, value)
    }

    fn set_input_by_key(&mut self, key: VariableKey, value: f64) -> Result<()> {
        let var = self.system.variable(key).ok_or_else(|| unknown_key(key))?;

        if var.role != Role::Antecedent {
            return Err(FuzzyError::RoleMismatch {
                variable: var.name.clone(),
                expected: Role::Antecedent,
            });
        }

        self.inputs.insert(key, value);

        Ok(())
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
    }

    /// Runs one inference cycle over the current inputs and stores the
    /// crisp value of every consequent the rules write to.
    pub fn compute(&mut self) -> Result<&Outputs> {
        debug!(inputs = self.inputs.len(), "computing");

        let inputs = self.checked_inputs()?;
        let sets = self.config.inference.infer(self.system, &inputs)?;
        let mut defuzzificated = HashMap::with_capacity(sets.aggregated.len());

        for &var_key in self.system.outputs() {
            let var = self.system.variable(var_key).ok_or_else(|| unknown_key(var_key))?;
            let Some(aggregated) = sets.aggregated.get(&var_key) else {
                continue;
            };
            let crisp = match var.defuzz_op.call(var.universe.points(), aggregated) {
                Some(crisp) => crisp,
                None => match self.config.no_rule_fired {
                    NoRuleFiredPolicy::Error => {
                        return Err(FuzzyError::NoRuleFired {
                            variable: var.name.clone(),
                        })
                    },
                    NoRuleFiredPolicy::Midpoint => {
                        warn!(variable = %var.name, "no rule fired, using universe midpoint");
                        var.universe.midpoint()
                    },
                },
            };

            debug!(variable = %var.name, crisp, "defuzzificated");
            defuzzificated.insert(var_key, crisp);
        }

        let outputs = self
            .outputs
            .insert(Outputs::new(defuzzificated, sets.aggregated, sets.firing_strengths));

        Ok(outputs)
    }

    /// Validates the current inputs against the system, applying the
    /// out-of-range policy.
    fn checked_inputs(&self) -> Result<Inputs> {
        for &var_key in self.system.required_inputs() {
            if self.inputs.get(var_key).is_none() {
                let var = self.system.variable(var_key).ok_or_else(|| unknown_key(var_key))?;

                return Err(FuzzyError::MissingInput {
                    variable: var.name.clone(),
                });
            }
        }

        let mut checked = Inputs::new();

        for (var_key, var) in self.system.antecedents() {
            let Some(value) = self.inputs.get(var_key) else {
                continue;
            };
            let universe = &var.universe;

            let value = if universe.contains(value) {
                value
            } else if self.config.out_of_range == OutOfRangePolicy::Clamp && !value.is_nan() {
                let clamped = value.clamp(universe.min(), universe.max());

                warn!(variable = %var.name, value, clamped, "input clamped to universe");
                clamped
            } else {
                return Err(FuzzyError::InputOutOfRange {
                    variable: var.name.clone(),
                    value,
                    min: universe.min(),
                    max: universe.max(),
                });
            };

            checked.insert(var_key, value);
        }

        Ok(checked)
    }

    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    /// Crisp value of `var` from the last successful [`compute`](Self::compute).
    pub fn output<I>(&self, var: Variable<I>) -> Option<f64> {
        self.outputs.as_ref()?.get(var)
    }

    pub fn output_named(&self, name: &str) -> Option<f64> {
        let key = self.system.key_of(name)?;

        self.outputs.as_ref()?.get_by_key(key)
    }
}
