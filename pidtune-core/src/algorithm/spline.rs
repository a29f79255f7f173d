use nalgebra::DVector;

use crate::Error;

/// Cubic interpolating spline with not-a-knot end conditions.
///
/// The spline is stored as the knots, the values at the knots and the second
/// derivative (moment) at every knot. The third derivative is continuous at
/// the second and the second-to-last knot, so any cubic polynomial is
/// reproduced exactly.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Minimum number of knots for a cubic fit.
    pub const MIN_KNOTS: usize = 4;

    /// Fit a spline through the given points.
    ///
    /// Knots must be strictly increasing and match the values in length.
    pub fn interpolate(knots: &[f64], values: &[f64]) -> Result<Self, Error> {
        if knots.len() != values.len() {
            return Err(Error::KnotMismatch {
                knots: knots.len(),
                values: values.len(),
            });
        }

        let n = knots.len();
        if n < Self::MIN_KNOTS {
            return Err(Error::InsufficientKnots {
                required: Self::MIN_KNOTS,
                actual: n,
            });
        }

        // Negated comparison so NaN knots are rejected as well.
        if knots.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(Error::UnorderedKnots);
        }

        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let moments = solve_moments(&h, values)?;

        Ok(Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            moments,
        })
    }

    /// Evaluate the spline at `x`.
    ///
    /// Points outside the knot range are extrapolated from the boundary
    /// segment.
    pub fn evaluate(&self, x: f64) -> f64 {
        let i = self.segment(x);

        let (x0, x1) = (self.knots[i], self.knots[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);

        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Evaluate the spline at every point.
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    #[inline]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    fn segment(&self, x: f64) -> usize {
        let last = self.knots.len() - 2;

        match self.knots.partition_point(|&k| k <= x) {
            0 => 0,
            p => (p - 1).min(last),
        }
    }
}

/// Solve the not-a-knot moment system.
///
/// The two end conditions are folded into the first and last interior rows,
/// which leaves a tridiagonal system in the interior moments. That system is
/// diagonally dominant and solved by forward elimination and back
/// substitution in linear time.
fn solve_moments(h: &[f64], values: &[f64]) -> Result<Vec<f64>, Error> {
    let n = values.len();
    let m = n - 2;

    let mut sub = DVector::<f64>::zeros(m);
    let mut diag = DVector::<f64>::zeros(m);
    let mut sup = DVector::<f64>::zeros(m);
    let mut rhs = DVector::<f64>::zeros(m);

    for j in 0..m {
        let i = j + 1;

        sub[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        sup[j] = h[i];
        rhs[j] = 6.0
            * ((values[i + 1] - values[i]) / h[i] - (values[i] - values[i - 1]) / h[i - 1]);
    }

    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;

    let (ha, hb) = (h[n - 3], h[n - 2]);
    sub[m - 1] = (ha * ha - hb * hb) / ha;
    diag[m - 1] = (ha + hb) * (2.0 * ha + hb) / ha;

    for j in 1..m {
        let pivot = diag[j - 1];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(Error::SingularSystem);
        }

        let w = sub[j] / pivot;
        diag[j] -= w * sup[j - 1];
        rhs[j] -= w * rhs[j - 1];
    }

    if diag[m - 1] == 0.0 || !diag[m - 1].is_finite() {
        return Err(Error::SingularSystem);
    }

    let mut interior = rhs;
    interior[m - 1] /= diag[m - 1];
    for j in (0..m - 1).rev() {
        interior[j] = (interior[j] - sup[j] * interior[j + 1]) / diag[j];
    }

    let first = ((h0 + h1) * interior[0] - h0 * interior[1]) / h1;
    let last = ((ha + hb) * interior[m - 1] - hb * interior[m - 2]) / ha;

    let mut moments = Vec::with_capacity(n);
    moments.push(first);
    moments.extend(interior.iter().copied());
    moments.push(last);

    Ok(moments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn passes_through_knots() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let values = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];

        let spline = CubicSpline::interpolate(&knots, &values).unwrap();

        for (x, y) in knots.iter().zip(values.iter()) {
            assert!((spline.evaluate(*x) - y).abs() < TOLERANCE);
        }
    }

    #[test]
    fn reproduce_cubic() {
        let f = |x: f64| 0.5 * x.powi(3) - 2.0 * x.powi(2) + x - 3.0;

        let knots = [0.0, 0.5, 1.5, 2.0, 3.5, 4.0];
        let values: Vec<f64> = knots.iter().map(|&x| f(x)).collect();

        let spline = CubicSpline::interpolate(&knots, &values).unwrap();

        for x in [0.25, 1.0, 1.75, 2.7, 3.9] {
            assert!((spline.evaluate(x) - f(x)).abs() < TOLERANCE);
        }
    }

    #[test]
    fn reproduce_cubic_minimum_knots() {
        let knots = [0.0, 1.0, 2.0, 3.0];
        let values = [0.0, 1.0, 8.0, 27.0];

        let spline = CubicSpline::interpolate(&knots, &values).unwrap();

        assert!((spline.evaluate(2.5) - 15.625).abs() < TOLERANCE);
        assert!((spline.evaluate(0.5) - 0.125).abs() < TOLERANCE);
    }

    #[test]
    fn extrapolate_boundary() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0];
        let values = [1.0, 3.0, 5.0, 7.0, 9.0];

        let spline = CubicSpline::interpolate(&knots, &values).unwrap();

        assert!((spline.evaluate(-1.0) + 1.0).abs() < TOLERANCE);
        assert!((spline.evaluate(5.0) - 11.0).abs() < TOLERANCE);
    }

    #[test]
    fn sample_dense() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0];
        let values = [0.0, 2.0, 4.0, 6.0, 8.0];

        let spline = CubicSpline::interpolate(&knots, &values).unwrap();
        let samples = spline.sample(&[0.0, 0.5, 3.25]);

        assert_eq!(samples.len(), 3);
        assert!((samples[1] - 1.0).abs() < TOLERANCE);
        assert!((samples[2] - 6.5).abs() < TOLERANCE);
    }

    #[test]
    fn moments_match_dense_solve() {
        use nalgebra::DMatrix;

        let knots = [0.0, 0.4, 1.1, 1.5, 2.9, 3.0, 4.2, 5.0];
        let values = [0.3, -1.2, 0.8, 2.5, -0.4, 0.0, 1.7, -2.2];
        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let n = knots.len();

        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut b = DVector::<f64>::zeros(n);

        a[(0, 0)] = h[1];
        a[(0, 1)] = -(h[0] + h[1]);
        a[(0, 2)] = h[0];
        for i in 1..n - 1 {
            a[(i, i - 1)] = h[i - 1];
            a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            a[(i, i + 1)] = h[i];
            b[i] = 6.0
                * ((values[i + 1] - values[i]) / h[i] - (values[i] - values[i - 1]) / h[i - 1]);
        }
        a[(n - 1, n - 3)] = h[n - 2];
        a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
        a[(n - 1, n - 1)] = h[n - 3];

        let expected = a.lu().solve(&b).unwrap();
        let spline = CubicSpline::interpolate(&knots, &values).unwrap();

        for (moment, expected) in spline.moments.iter().zip(expected.iter()) {
            assert!((moment - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn many_knots() {
        let f = |x: f64| 2.0 * x.powi(3) - x + 0.5;

        let knots = crate::algorithm::linspace(0.0, 2.0, 20_001);
        let values: Vec<f64> = knots.iter().map(|&x| f(x)).collect();

        let spline = CubicSpline::interpolate(&knots, &values).unwrap();

        for x in [0.00005, 0.7, 1.33333, 1.99995] {
            assert!((spline.evaluate(x) - f(x)).abs() < 1e-6);
        }
    }

    #[test]
    fn reject_invalid_input() {
        assert_eq!(
            CubicSpline::interpolate(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap_err(),
            Error::InsufficientKnots {
                required: 4,
                actual: 3
            }
        );
        assert_eq!(
            CubicSpline::interpolate(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0]).unwrap_err(),
            Error::KnotMismatch {
                knots: 4,
                values: 2
            }
        );
        assert_eq!(
            CubicSpline::interpolate(&[0.0, 2.0, 1.0, 3.0], &[0.0; 4]).unwrap_err(),
            Error::UnorderedKnots
        );
        assert_eq!(
            CubicSpline::interpolate(&[0.0, 1.0, 1.0, 3.0], &[0.0; 4]).unwrap_err(),
            Error::UnorderedKnots
        );
        assert_eq!(
            CubicSpline::interpolate(&[0.0, f64::NAN, 2.0, 3.0], &[0.0; 4]).unwrap_err(),
            Error::UnorderedKnots
        );
    }
}
