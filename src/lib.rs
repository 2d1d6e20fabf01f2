//! Mamdani fuzzy inference.
//!
//! Linguistic variables own a sampled universe and a set of labelled
//! membership functions. Rules combine antecedent terms with AND (min),
//! OR (max) and NOT (complement) and imply consequent terms. A
//! [`Simulation`] fires every rule of a [`ControlSystem`] against crisp
//! inputs, clips and aggregates the implied sets and defuzzifies them into
//! crisp outputs.
//!
//! ```
//! use fuzzy_mamdani::{ControlSystem, Rules, Simulation, Terms, Variables};
//!
//! # fn main() -> Result<(), fuzzy_mamdani::FuzzyError> {
//! let mut terms = Terms::new();
//! terms.trimf("low", 0., 0., 5.);
//! terms.trimf("high", 5., 10., 10.);
//!
//! let mut vars = Variables::<&str>::new();
//! let service = vars.add_antecedent("service", 0. ..=10., terms.clone(), Some(0.5))?;
//! let tip = vars.add_consequent("tip", 0. ..=10., terms, Some(0.5))?;
//!
//! let mut rules = Rules::new();
//! rules.add(service.is("low"), tip.is("low"));
//! rules.add(service.is("high"), tip.is("high"));
//!
//! let system = ControlSystem::new(vars, rules)?;
//! let mut sim = Simulation::new(&system);
//!
//! sim.set_input(service, 9.)?;
//! sim.compute()?;
//!
//! assert!(sim.output(tip).unwrap() > 5.);
//! # Ok(())
//! # }
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod simulation;
mod system;
mod terms;
mod variable;

pub use config::{NoRuleFiredPolicy, OutOfRangePolicy, SimulationConfig};
pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::{InferredSets, MamdaniInference};
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use simulation::Simulation;
pub use system::ControlSystem;
pub use terms::Terms;
pub use variable::{Role, Term, Universe, Variable, VariableConstraints, VariableKey, Variables};
