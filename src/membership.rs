//! Membership functions mapping a crisp value onto a degree in [0, 1].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::math::{clamp_unit, interp_one};

/// Shape of a fuzzy set.
///
/// Every shape evaluates to a value in [0, 1] and never to NaN. Degenerate
/// edges (`a == b` or `b == c` on a triangle) become step edges that reach
/// full membership exactly at the shared breakpoint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MembershipFunction {
    /// Triangle with feet at `a` and `c` and its peak at `b`
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapezoid with feet at `a` and `d` and a plateau over `[b, c]`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Bell curve centered on `mean`
    Gaussian { mean: f64, sigma: f64 },
    /// Straight lines between `(x, degree)` points, flat beyond the ends
    Piecewise(Vec<(f64, f64)>),
}

impl MembershipFunction {
    /// Equivalent of `trimf(x, [a, b, c])`
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        Self::Triangular { a, b, c }
    }

    /// Equivalent of `trapmf(x, [a, b, c, d])`
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::Trapezoidal { a, b, c, d }
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Self {
        Self::Gaussian { mean, sigma }
    }

    pub fn piecewise(points: impl Into<Vec<(f64, f64)>>) -> Self {
        Self::Piecewise(points.into())
    }

    /// Degree of membership of `x`.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        let degree = match *self {
            Self::Triangular { a, b, c } => rise(x, a, b).min(fall(x, b, c)),
            Self::Trapezoidal { a, b, c, d } => {
                if b <= x && x <= c {
                    1.
                } else if x < b {
                    rise(x, a, b)
                } else {
                    fall(x, c, d)
                }
            },
            Self::Gaussian { mean, sigma } => {
                let z = (x - mean) / sigma;
                (-0.5 * z * z).exp()
            },
            Self::Piecewise(ref points) => interp_one(x, points),
        };

        clamp_unit(degree)
    }

    /// Checks breakpoints are finite and ordered.
    pub(crate) fn validate(&self, term: &str) -> Result<()> {
        let invalid = |reason: &str| FuzzyError::InvalidMembership {
            term: term.to_owned(),
            reason: reason.to_owned(),
        };

        match self {
            Self::Triangular { a, b, c } => {
                if ![a, b, c].iter().all(|p| p.is_finite()) {
                    return Err(invalid("breakpoints must be finite"));
                }
                if !(a <= b && b <= c) {
                    return Err(invalid("expected a <= b <= c"));
                }
            },
            Self::Trapezoidal { a, b, c, d } => {
                if ![a, b, c, d].iter().all(|p| p.is_finite()) {
                    return Err(invalid("breakpoints must be finite"));
                }
                if !(a <= b && b <= c && c <= d) {
                    return Err(invalid("expected a <= b <= c <= d"));
                }
            },
            Self::Gaussian { mean, sigma } => {
                if !mean.is_finite() || !sigma.is_finite() {
                    return Err(invalid("parameters must be finite"));
                }
                if *sigma <= 0. {
                    return Err(invalid("sigma must be positive"));
                }
            },
            Self::Piecewise(points) => {
                if points.is_empty() {
                    return Err(invalid("no points given"));
                }
                if points.iter().any(|(x, y)| !x.is_finite() || !(0. ..=1.).contains(y)) {
                    return Err(invalid("points must be finite with degrees in [0, 1]"));
                }
                if points.windows(2).any(|w| w[1].0 < w[0].0) {
                    return Err(invalid("x coordinates must be non-decreasing"));
                }
            },
        }

        Ok(())
    }
}

/// Left edge: 0 at or below `a`, 1 at or above `b`.
fn rise(x: f64, a: f64, b: f64) -> f64 {
    if x >= b {
        1.
    } else if x <= a {
        0.
    } else {
        (x - a) / (b - a)
    }
}

/// Right edge: 1 at or below `b`, 0 at or above `c`.
fn fall(x: f64, b: f64, c: f64) -> f64 {
    if x <= b {
        1.
    } else if x >= c {
        0.
    } else {
        (c - x) / (c - b)
    }
}
