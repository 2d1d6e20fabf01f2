use std::iter::Sum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use num::Float;

use crate::math::interp_one;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }

    /// The identity element, so an empty fold leaves full membership.
    pub(crate) fn identity<F: Float>(self) -> F {
        F::one()
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }

    pub(crate) fn identity<F: Float>(self) -> F {
        F::zero()
    }
}

/// Implication operator deriving a rule's output set from its activation
/// (firing strength times weight) and the consequent term's membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImplicationOp {
    /// Mamdani: clip the consequent at the activation
    #[default]
    Min,
    /// Larsen: scale the consequent by the activation
    Prod,
}

impl ImplicationOp {
    pub fn apply<F: Float>(self, activation: F, membership: F) -> F {
        match self {
            Self::Min => F::min(activation, membership),
            Self::Prod => activation * membership,
        }
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProductionLink {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl ProductionLink {
    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
        })
    }
}

/// Method for defuzzificating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DefuzzificationOp {
    /// Center of gravity over the sampled universe
    #[default]
    Centroid,
    /// Point splitting the area under the membership function in half
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    /// Reduces `membership`, sampled over `universe`, to a crisp value.
    ///
    /// Returns `None` when the membership function is identically zero or
    /// when the two slices differ in length.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> Option<F> {
        if universe.len() != membership.len() {
            return None;
        }

        let maximum = membership.iter().copied().fold(F::zero(), F::max);

        if maximum <= F::zero() {
            return None;
        }

        let at_maximum = move || {
            universe
                .iter()
                .copied()
                .zip(membership.iter().copied())
                .filter_map(move |(u, m)| if m == maximum { Some(u) } else { None })
        };

        match self {
            Self::Centroid => {
                let num = universe
                    .iter()
                    .zip(membership)
                    .map(|(&u, &m)| u * m)
                    .sum::<F>();
                let den = membership.iter().copied().sum::<F>();

                Some(num / den)
            },
            Self::Bisector => {
                let two = F::one() + F::one();
                let n_areas = universe.len().saturating_sub(1);

                if n_areas == 0 {
                    return universe.first().copied();
                }

                let areas: Vec<F> = (0..n_areas)
                    .map(|i| (membership[i] + membership[i + 1]) * (universe[i + 1] - universe[i]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    cum_area = cum_area + area;

                    if cum_area >= target {
                        let coords = [(cum_area - area, universe[i]), (cum_area, universe[i + 1])];

                        return Some(interp_one(target, &coords));
                    }
                }

                universe.last().copied()
            },
            Self::MeanOfMaximum => {
                let (len, sum) = at_maximum().fold((0usize, F::zero()), |(len, sum), u| (len + 1, sum + u));

                F::from(len).map(|len| sum / len)
            },
            Self::SmallestOfMaximum => at_maximum().reduce(F::min),
            Self::LargestOfMaximum => at_maximum().reduce(F::max),
        }
    }
}
