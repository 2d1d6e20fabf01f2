use num::Float;

/// Similar to numpy.interp: piecewise-linear interpolation of `x` through
/// `coords`, holding the first/last `y` outside of the covered range.
///
/// Zero-width segments (repeated `x` coordinates) are skipped, which makes
/// vertical edges left-continuous.
pub(crate) fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        if x2 == x1 {
            continue;
        }

        // Actual interpolation
        if x1 <= x && x <= x2 {
            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    y_last
}

/// Clamps floating error back into [0, 1]. NaN collapses to zero.
pub(crate) fn clamp_unit<F: Float>(value: F) -> F {
    if value.is_nan() {
        F::zero()
    } else {
        value.max(F::zero()).min(F::one())
    }
}

#[cfg(test)]
fn interp(x_input: impl IntoIterator<Item = f64>, coords: &[(f64, f64)]) -> Vec<f64> {
    x_input.into_iter().map(|x| interp_one(x, coords)).collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_vertical_edge() {
    let coords = [(0., 0.), (2., 0.), (2., 1.), (4., 1.)];

    assert_eq!(interp_one(2., &coords), 0.);
    assert_eq!(interp_one(3., &coords), 1.);
    assert_eq!(interp_one::<f64>(1., &[]), 0.);
}

#[test]
fn test_clamp_unit() {
    assert_eq!(clamp_unit(1.0000000000000002f64), 1.);
    assert_eq!(clamp_unit(-1e-17f64), 0.);
    assert_eq!(clamp_unit(f64::NAN), 0.);
    assert_eq!(clamp_unit(0.25f64), 0.25);
}
