/// Single-pole low-pass filter.
///
/// Exponential smoothing where the smoothing factor is supplied with every
/// sample. The previous output starts at zero.
#[derive(Clone, Debug, Default)]
pub struct LowPassFilter {
    /// Previous filter output.
    yp: f64,
}

impl LowPassFilter {
    /// Construct the filter.
    pub fn new() -> Self {
        Self { yp: 0.0 }
    }

    /// Feed the next value to the filter, then return the filtered value.
    ///
    /// A `beta` of 1 passes `x` through unchanged, a `beta` of 0 holds the
    /// previous output. Values outside [0, 1] are not rejected.
    pub fn filter(&mut self, x: f64, beta: f64) -> f64 {
        let y = beta * x + (1.0 - beta) * self.yp;
        self.yp = y;
        y
    }

    /// Previous filter output.
    #[inline]
    pub fn last(&self) -> f64 {
        self.yp
    }

    /// Reset the filter state.
    pub fn reset(&mut self) {
        self.yp = 0.0;
    }
}
