use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::math::clamp_unit;
use crate::ops::*;
use crate::system::ControlSystem;
use crate::variable::{unknown_key, Term, VariableConstraints, VariableKey, Variables};

/// Operator set of a Mamdani inference pass. The default is min/max logic
/// with min implication and max aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    prod_link: ProductionLink,
}

/// Per-rule firing strengths and per-consequent aggregated fuzzy sets.
#[derive(Clone, Debug, PartialEq)]
pub struct InferredSets {
    pub firing_strengths: Vec<f64>,
    pub aggregated: HashMap<VariableKey, Vec<f64>>,
}

impl MamdaniInference {
    pub fn new(and_op: AndOp, or_op: OrOp, imp_op: ImplicationOp, prod_link: ProductionLink) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
        }
    }

    /// Degree to which `expr` holds for the crisp `inputs`.
    pub fn fire<T: Eq + Hash + Debug>(&self, variables: &Variables<T>, expr: &Expr<T>, inputs: &Inputs) -> Result<f64> {
        match expr {
            Expr::Is(var_key, label) => {
                let var = variables.get(*var_key).ok_or_else(|| unknown_key(*var_key))?;
                let value = inputs.get(*var_key).ok_or_else(|| FuzzyError::MissingInput {
                    variable: var.name.clone(),
                })?;

                Ok(term_of(var, label)?.degree(value))
            },
            Expr::And(exprs) => {
                let and_op = self.and_op;
                self.fold(variables, exprs, inputs, and_op.identity(), |u, v| and_op.apply(u, v))
            },
            Expr::Or(exprs) => {
                let or_op = self.or_op;
                self.fold(variables, exprs, inputs, or_op.identity(), |u, v| or_op.apply(u, v))
            },
            Expr::Not(expr) => Ok(clamp_unit(1. - self.fire(variables, expr, inputs)?)),
        }
    }

    /// Combines the children of an `And`/`Or` node starting from the first
    /// child, so a single child passes through unchanged. `empty` is only
    /// returned for a node without children.
    fn fold<T: Eq + Hash + Debug>(
        &self,
        variables: &Variables<T>,
        exprs: &[Expr<T>],
        inputs: &Inputs,
        empty: f64,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<f64> {
        let mut degrees = exprs.iter().map(|expr| self.fire(variables, expr, inputs));

        match degrees.next() {
            Some(first) => degrees.try_fold(first?, |acc, degree| -> Result<f64> { Ok(op(acc, degree?)) }),
            None => Ok(empty),
        }
    }

    /// Fires every rule of `system` and aggregates their implied sets for
    /// each consequent the rules write to.
    ///
    /// Rules with zero firing strength are skipped; a consequent no rule
    /// supports keeps an all-zero set.
    pub fn infer<T: Eq + Hash + Clone + Debug>(&self, system: &ControlSystem<T>, inputs: &Inputs) -> Result<InferredSets> {
        let variables = system.variables();
        let mut aggregated = HashMap::with_capacity(system.outputs().len());

        for &var_key in system.outputs() {
            let var = variables.get(var_key).ok_or_else(|| unknown_key(var_key))?;

            aggregated.insert(var_key, vec![0.; var.universe.len()]);
        }

        let mut firing_strengths = Vec::with_capacity(system.rules().len());

        for (i, rule) in system.rules().iter().enumerate() {
            let strength = self.fire(variables, rule.premise(), inputs)?;

            trace!(rule = i, strength, "fired rule");
            firing_strengths.push(strength);

            if strength <= 0. {
                continue;
            }

            for (var_key, label, weight) in rule.targets() {
                let var = variables.get(var_key).ok_or_else(|| unknown_key(var_key))?;
                let activation = strength * weight;
                let implied = term_of(var, label)?
                    .membership()
                    .iter()
                    .map(|&m| self.imp_op.apply(activation, m));
                let agg = aggregated
                    .entry(var_key)
                    .or_insert_with(|| vec![0.; var.universe.len()]);

                *agg = self.prod_link.call(agg.iter().copied(), implied).collect();
            }
        }

        Ok(InferredSets {
            firing_strengths,
            aggregated,
        })
    }
}

fn term_of<'v, T: Eq + Hash + Debug>(var: &'v VariableConstraints<T>, label: &T) -> Result<&'v Term> {
    var.term(label).ok_or_else(|| FuzzyError::UndefinedTerm {
        variable: var.name.clone(),
        term: format!("{label:?}"),
    })
}
