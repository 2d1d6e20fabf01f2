use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::membership::MembershipFunction;
use crate::ops::DefuzzificationOp;
use crate::terms::Terms;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Whether a variable is read by rule premises or produced by inference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Antecedent,
    Consequent,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Antecedent => f.write_str("an antecedent"),
            Self::Consequent => f.write_str("a consequent"),
        }
    }
}

/// Typed handle to a variable whose terms are labelled by `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Debug for Variable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

/// Strictly increasing samples over `[min, max]`, both ends included.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
}

impl Universe {
    /// Upper bound on the number of samples in a universe.
    pub const MAX_POINTS: usize = 1 << 24;

    /// Samples `range` every `step`. When the range is not a whole multiple
    /// of `step`, the samples are spread evenly so that `max` is still kept.
    pub fn new(name: &str, range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let invalid = |reason: &str| FuzzyError::InvalidUniverse {
            variable: name.to_owned(),
            reason: reason.to_owned(),
        };
        let (min_u, max_u) = range.into_inner();

        if !min_u.is_finite() || !max_u.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if min_u >= max_u {
            return Err(invalid("min must be smaller than max"));
        }
        if !step.is_finite() || step <= 0. {
            return Err(invalid("step must be positive"));
        }

        // The epsilon absorbs division error such as 0.3 / 0.1 == 2.9999999999999996
        let steps = ((max_u - min_u) / step + 1e-9).floor();

        if !steps.is_finite() || steps >= Self::MAX_POINTS as f64 {
            return Err(invalid("too many points for the given step"));
        }

        let num = (steps as usize)
            .checked_add(1)
            .ok_or_else(|| invalid("too many points for the given step"))?;
        let points = Linspace::new(min_u, max_u, num.max(2)).collect();

        Ok(Self { points })
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn midpoint(&self) -> f64 {
        (self.min() + self.max()) / 2.
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min() <= value && value <= self.max()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true: a universe holds at least its two bounds.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A membership function together with its samples over the owning
/// variable's universe.
#[derive(Clone, Debug)]
pub struct Term {
    function: MembershipFunction,
    membership: Vec<f64>,
}

impl Term {
    fn new(function: MembershipFunction, universe: &Universe) -> Self {
        let membership = universe.points().iter().map(|&u| function.degree(u)).collect();

        Self { function, membership }
    }

    pub fn function(&self) -> &MembershipFunction {
        &self.function
    }

    pub fn degree(&self, x: f64) -> f64 {
        self.function.degree(x)
    }

    /// Degrees at each universe point.
    pub fn membership(&self) -> &[f64] {
        &self.membership
    }
}

#[derive(Clone, Debug)]
pub struct VariableConstraints<T> {
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) universe: Universe,
    pub(crate) terms: HashMap<T, Term>,
    pub(crate) term_order: Vec<T>,
    pub(crate) defuzz_op: DefuzzificationOp,
}

impl<T: Eq + Hash> VariableConstraints<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term(&self, label: &T) -> Option<&Term> {
        self.terms.get(label)
    }

    /// Term labels in the order they were defined.
    pub fn labels(&self) -> &[T] {
        &self.term_order
    }

    pub fn defuzzification(&self) -> DefuzzificationOp {
        self.defuzz_op
    }
}

/// Registry of every variable of a control system.
#[derive(Clone, Debug)]
pub struct Variables<T> {
    pub(crate) vars: SlotMap<VariableKey, VariableConstraints<T>>,
    pub(crate) names: HashMap<String, VariableKey>,
}

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self {
            vars: SlotMap::with_key(),
            names: HashMap::new(),
        }
    }
}

impl<T> Variables<T> {
    pub fn get(&self, key: VariableKey) -> Option<&VariableConstraints<T>> {
        self.vars.get(key)
    }

    pub fn key_of(&self, name: &str) -> Option<VariableKey> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &VariableConstraints<T>)> {
        self.vars.iter()
    }
}

impl<T: Eq + Hash + Clone + Debug> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input variable. If the step value is not provided, it defaults to 0.1
    pub fn add_antecedent<I: Into<T>>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        self.add(Role::Antecedent, name.into(), universe_range, terms, step)
    }

    /// Adds an output variable. If the step value is not provided, it defaults to 0.1
    pub fn add_consequent<I: Into<T>>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        self.add(Role::Consequent, name.into(), universe_range, terms, step)
    }

    fn add<I: Into<T>>(
        &mut self,
        role: Role,
        name: String,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        if self.names.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable { name });
        }

        let universe = Universe::new(&name, universe_range, step.unwrap_or(0.1))?;
        let mut term_map = HashMap::with_capacity(terms.len());
        let mut term_order = Vec::with_capacity(terms.len());

        for (label, function) in terms.0 {
            let label: T = label.into();

            function.validate(&format!("{name}.{label:?}"))?;
            term_order.push(label.clone());
            term_map.insert(label, Term::new(function, &universe));
        }

        debug!(
            variable = %name,
            ?role,
            points = universe.len(),
            terms = term_order.len(),
            "added variable"
        );

        let key = self.vars.insert(VariableConstraints {
            name: name.clone(),
            role,
            universe,
            terms: term_map,
            term_order,
            defuzz_op: DefuzzificationOp::default(),
        });
        self.names.insert(name, key);

        Ok(Variable(key, PhantomData))
    }

    /// Selects how a consequent's aggregated set is reduced to a crisp value.
    pub fn set_defuzzification<I>(&mut self, var: Variable<I>, defuzz_op: DefuzzificationOp) -> Result<()> {
        let constraints = self.vars.get_mut(var.0).ok_or_else(|| unknown_key(var.0))?;

        if constraints.role != Role::Consequent {
            return Err(FuzzyError::RoleMismatch {
                variable: constraints.name.clone(),
                expected: Role::Consequent,
            });
        }

        constraints.defuzz_op = defuzz_op;

        Ok(())
    }
}

pub(crate) fn unknown_key(key: VariableKey) -> FuzzyError {
    FuzzyError::UnknownVariable {
        name: format!("{key:?}"),
    }
}
