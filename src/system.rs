use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::rules::{Rule, Rules};
use crate::variable::{unknown_key, Role, VariableConstraints, VariableKey, Variables};

/// The static definition of a fuzzy controller: its variables and rules.
///
/// Construction checks every rule against the variables, so evaluation can
/// only fail on the inputs it is given. A control system is never mutated
/// afterwards and can be shared by any number of simulations.
#[derive(Clone, Debug)]
pub struct ControlSystem<T> {
    variables: Variables<T>,
    rules: Rules<T>,
    required_inputs: Vec<VariableKey>,
    outputs: Vec<VariableKey>,
}

impl<T: Eq + Hash + Clone + Debug> ControlSystem<T> {
    pub fn new(variables: Variables<T>, rules: Rules<T>) -> Result<Self> {
        let mut required_inputs = Vec::new();
        let mut outputs = Vec::new();

        for rule in rules.iter() {
            validate_premise(&variables, &rule.premise)?;
            validate_consequence(&variables, rule)?;

            for (var_key, _) in rule.premise.propositions() {
                if !required_inputs.contains(var_key) {
                    required_inputs.push(*var_key);
                }
            }
            for (var_key, _, _) in rule.targets() {
                if !outputs.contains(&var_key) {
                    outputs.push(var_key);
                }
            }
        }

        debug!(
            variables = variables.len(),
            rules = rules.len(),
            inputs = required_inputs.len(),
            outputs = outputs.len(),
            "built control system"
        );

        Ok(Self {
            variables,
            rules,
            required_inputs,
            outputs,
        })
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.variables
    }

    pub fn variable(&self, key: VariableKey) -> Option<&VariableConstraints<T>> {
        self.variables.get(key)
    }

    pub fn key_of(&self, name: &str) -> Option<VariableKey> {
        self.variables.key_of(name)
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn antecedents(&self) -> impl Iterator<Item = (VariableKey, &VariableConstraints<T>)> {
        self.variables.iter().filter(|(_, var)| var.role == Role::Antecedent)
    }

    pub fn consequents(&self) -> impl Iterator<Item = (VariableKey, &VariableConstraints<T>)> {
        self.variables.iter().filter(|(_, var)| var.role == Role::Consequent)
    }

    /// Antecedents read by at least one rule, in first-use order.
    pub fn required_inputs(&self) -> &[VariableKey] {
        &self.required_inputs
    }

    /// Consequents written by at least one rule, in first-use order.
    pub fn outputs(&self) -> &[VariableKey] {
        &self.outputs
    }
}

fn lookup_term<'v, T: Eq + Hash + Debug>(
    variables: &'v Variables<T>,
    var_key: VariableKey,
    term: &T,
    role: Role,
) -> Result<&'v VariableConstraints<T>> {
    let var = variables.get(var_key).ok_or_else(|| unknown_key(var_key))?;

    if var.role != role {
        return Err(FuzzyError::RoleMismatch {
            variable: var.name.clone(),
            expected: role,
        });
    }
    if var.term(term).is_none() {
        return Err(FuzzyError::UndefinedTerm {
            variable: var.name.clone(),
            term: format!("{term:?}"),
        });
    }

    Ok(var)
}

fn validate_premise<T: Eq + Hash + Debug>(variables: &Variables<T>, expr: &Expr<T>) -> Result<()> {
    match expr {
        Expr::Is(var_key, term) => lookup_term(variables, *var_key, term, Role::Antecedent).map(drop),
        Expr::And(exprs) if exprs.is_empty() => Err(FuzzyError::EmptyPremise { combinator: "AND" }),
        Expr::Or(exprs) if exprs.is_empty() => Err(FuzzyError::EmptyPremise { combinator: "OR" }),
        Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().try_for_each(|expr| validate_premise(variables, expr)),
        Expr::Not(expr) => validate_premise(variables, expr),
    }
}

fn validate_consequence<T: Eq + Hash + Debug>(variables: &Variables<T>, rule: &Rule<T>) -> Result<()> {
    fn check<T: Eq + Hash + Debug>(variables: &Variables<T>, expr: &Expr<T>) -> Result<()> {
        match expr {
            Expr::Is(var_key, term) => lookup_term(variables, *var_key, term, Role::Consequent).map(drop),
            Expr::And(exprs) if !exprs.is_empty() => exprs.iter().try_for_each(|expr| check(variables, expr)),
            Expr::And(_) => Err(FuzzyError::InvalidConsequence {
                reason: "empty AND".to_owned(),
            }),
            Expr::Or(_) | Expr::Not(_) => Err(FuzzyError::InvalidConsequence {
                reason: "terms may only be combined with AND".to_owned(),
            }),
        }
    }

    if rule.consequence.is_empty() {
        return Err(FuzzyError::InvalidConsequence {
            reason: "rule has no consequent".to_owned(),
        });
    }

    for (expr, weight) in &rule.consequence {
        if !(*weight > 0. && *weight <= 1.) {
            return Err(FuzzyError::InvalidWeight { weight: *weight });
        }

        check(variables, expr)?;
    }

    Ok(())
}
