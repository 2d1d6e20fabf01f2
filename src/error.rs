use crate::variable::Role;

/// Errors raised while building a control system or running a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    #[error("term {term} is not defined on variable {variable}")]
    UndefinedTerm { variable: String, term: String },

    #[error("no input value set for antecedent {variable}")]
    MissingInput { variable: String },

    #[error("input {value} for {variable} is outside its universe [{min}, {max}]")]
    InputOutOfRange {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("no rule fired for consequent {variable}")]
    NoRuleFired { variable: String },

    #[error("variable {name} is already defined")]
    DuplicateVariable { name: String },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("invalid universe for {variable}: {reason}")]
    InvalidUniverse { variable: String, reason: String },

    #[error("invalid membership function for term {term}: {reason}")]
    InvalidMembership { term: String, reason: String },

    #[error("rule weight {weight} is outside (0, 1]")]
    InvalidWeight { weight: f64 },

    #[error("variable {variable} is not used as {expected}")]
    RoleMismatch { variable: String, expected: Role },

    #[error("invalid rule consequence: {reason}")]
    InvalidConsequence { reason: String },

    #[error("rule premise contains an empty {combinator}")]
    EmptyPremise { combinator: &'static str },
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;
