use crate::Error;

/// Controller gains.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gains {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
}

impl Gains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

impl std::fmt::Display for Gains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kp: {}, Ki: {}, Kd: {}", self.kp, self.ki, self.kd)
    }
}

/// Discrete PID controller.
///
/// Euler integration for the integral term and a backward difference for the
/// derivative term. The output is neither clamped nor protected against
/// integral windup.
#[derive(Clone, Debug)]
pub struct PidController {
    /// Controller gains.
    gains: Gains,
    /// Target value.
    setpoint: f64,
    /// Fixed time step, always positive.
    dt: f64,
    /// Integral of error.
    integral: f64,
    /// Error of the previous step.
    pre_err: f64,
    /// Process measurement used by the next step.
    feedback_value: f64,
}

impl PidController {
    /// Construct a new controller with cleared state.
    ///
    /// Returns an error if `dt` is not a positive finite number, as the
    /// derivative term divides by it.
    pub fn new(gains: Gains, setpoint: f64, dt: f64) -> Result<Self, Error> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidTimeStep(dt));
        }

        Ok(Self {
            gains,
            setpoint,
            dt,
            integral: 0.0,
            pre_err: 0.0,
            feedback_value: 0.0,
        })
    }

    /// Reset integral, previous error and feedback value.
    pub fn clear(&mut self) {
        self.integral = 0.0;
        self.pre_err = 0.0;
        self.feedback_value = 0.0;
    }

    /// Run one controller step.
    ///
    /// If `feedback_value` is `None` the stored feedback value is reused. After
    /// the step the output becomes the stored feedback value, so repeated calls
    /// without an argument chain the controller onto its own output.
    pub fn compute(&mut self, feedback_value: Option<f64>) -> f64 {
        if let Some(value) = feedback_value {
            self.feedback_value = value;
        }

        let error = self.setpoint - self.feedback_value;
        self.integral += error * self.dt;
        let derivative = (error - self.pre_err) / self.dt;

        let output =
            self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative;

        self.pre_err = error;
        self.feedback_value = output;

        output
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.gains
    }

    #[inline]
    pub fn set_gains(&mut self, gains: Gains) {
        self.gains = gains;
    }

    #[inline]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    #[inline]
    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    #[inline]
    pub fn previous_error(&self) -> f64 {
        self.pre_err
    }

    #[inline]
    pub fn feedback_value(&self) -> f64 {
        self.feedback_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_invalid_time_step() {
        let gains = Gains::new(1.0, 1.0, 1.0);

        assert_eq!(
            PidController::new(gains, 1.0, 0.0).unwrap_err(),
            Error::InvalidTimeStep(0.0)
        );
        assert!(PidController::new(gains, 1.0, -0.1).is_err());
        assert!(PidController::new(gains, 1.0, f64::NAN).is_err());
        assert!(PidController::new(gains, 1.0, f64::INFINITY).is_err());
        assert!(PidController::new(gains, 1.0, 0.1).is_ok());
    }

    #[test]
    fn zero_gains_yield_zero() {
        let mut pid = PidController::new(Gains::default(), 42.0, 0.1).unwrap();

        assert_eq!(pid.compute(Some(-3.5)), 0.0);
        assert_eq!(pid.compute(Some(1e6)), 0.0);
        assert_eq!(pid.compute(None), 0.0);
    }

    #[test]
    fn proportional_only() {
        let mut pid = PidController::new(Gains::new(2.5, 0.0, 0.0), 1.0, 0.1).unwrap();

        for v in [0.0, 0.25, 1.0, 3.0, -7.5] {
            assert_eq!(pid.compute(Some(v)), 2.5 * (1.0 - v));
        }
    }

    #[test]
    fn first_step_terms() {
        let mut pid = PidController::new(Gains::new(1.0, 10.0, 0.001), 1.0, 0.1).unwrap();

        // error = 1, integral = 0.1, derivative = 10
        let output = pid.compute(Some(0.0));

        assert_eq!(output, 1.0 + 10.0 * 0.1 + 0.001 * 10.0);
        assert_eq!(pid.integral(), 0.1);
        assert_eq!(pid.previous_error(), 1.0);
        assert_eq!(pid.feedback_value(), output);
    }

    #[test]
    fn chain_own_output() {
        let mut chained = PidController::new(Gains::new(0.5, 1.0, 0.0), 1.0, 0.1).unwrap();
        let mut explicit = chained.clone();

        let mut x = chained.compute(Some(0.0));
        assert_eq!(explicit.compute(Some(0.0)), x);

        for _ in 0..10 {
            let y = chained.compute(None);
            x = explicit.compute(Some(x));
            assert_eq!(x, y);
        }
    }

    #[test]
    fn clear_is_empty() {
        let mut pid = PidController::new(Gains::new(1.0, 10.0, 0.001), 1.0, 0.1).unwrap();

        pid.compute(Some(0.3));
        pid.compute(None);
        pid.clear();

        assert_eq!(pid.integral(), 0.0);
        assert_eq!(pid.previous_error(), 0.0);
        assert_eq!(pid.feedback_value(), 0.0);
        assert_eq!(pid.gains(), Gains::new(1.0, 10.0, 0.001));
    }

    #[test]
    fn gains_take_effect_next_step() {
        let mut pid = PidController::new(Gains::new(1.0, 0.0, 0.0), 1.0, 0.1).unwrap();

        assert_eq!(pid.compute(Some(0.5)), 0.5);

        pid.set_gains(Gains::new(4.0, 0.0, 0.0));
        assert_eq!(pid.compute(Some(0.5)), 2.0);
    }
}
