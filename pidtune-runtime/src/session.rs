use pidtune_core::{
    algorithm::{linspace, CubicSpline},
    Gains, SimulationParams, StepResponse, StepResponseSimulator,
};

use crate::{
    config::Config,
    slider::{GainKind, SliderBank},
};

/// Step response together with its smoothed curve.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseCurve {
    /// Raw simulation samples.
    response: StepResponse,
    /// Dense time axis in steps.
    time: Vec<f64>,
    /// Smoothed response on the dense time axis.
    values: Vec<f64>,
}

impl ResponseCurve {
    /// Smooth a step response onto `resolution` evenly spaced points.
    pub fn smooth(response: StepResponse, resolution: usize) -> crate::Result<Self> {
        let knots: Vec<f64> = (0..response.len()).map(|i| i as f64).collect();
        let spline = CubicSpline::interpolate(&knots, response.samples())?;

        let end = response.len().saturating_sub(1) as f64;
        let time = linspace(0.0, end, resolution);
        let values = spline.sample(&time);

        Ok(Self {
            response,
            time,
            values,
        })
    }

    #[inline]
    pub fn response(&self) -> &StepResponse {
        &self.response
    }

    #[inline]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Reference line for the curve.
    #[inline]
    pub fn setpoint(&self) -> f64 {
        self.response.setpoint()
    }

    /// Smoothed curve as `(time, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.values.iter().copied())
    }
}

/// Tuning session.
///
/// Holds the gain sliders and a single simulator. Every slider change
/// reconfigures the gains, clears the engine and regenerates the curve.
pub struct TuningSession {
    simulator: StepResponseSimulator,
    sliders: SliderBank,
    params: SimulationParams,
    resolution: usize,
    curve: ResponseCurve,
}

impl TuningSession {
    /// Construct the session and run the initial simulation.
    pub fn new(config: &Config) -> crate::Result<Self> {
        config.validate()?;

        let sliders = SliderBank::new(&config.sliders);
        let params = config.simulation.params();
        let resolution = config.simulation.resolution;

        let mut simulator = StepResponseSimulator::new(
            sliders.gains(),
            config.controller.setpoint,
            config.controller.dt,
        )?;

        debug!("Initial gains: {}", sliders);

        let curve = ResponseCurve::smooth(simulator.run(&params), resolution)?;

        Ok(Self {
            simulator,
            sliders,
            params,
            resolution,
            curve,
        })
    }

    /// Move a slider and regenerate the curve if its position changed.
    pub fn set_slider(&mut self, kind: GainKind, position: i32) -> crate::Result<&ResponseCurve> {
        if self.sliders.get_mut(kind).set_position(position) {
            self.apply()
        } else {
            trace!("{} position unchanged at {}", kind, self.sliders.get(kind).position());
            Ok(&self.curve)
        }
    }

    /// Apply the slider gains and regenerate the curve.
    pub fn apply(&mut self) -> crate::Result<&ResponseCurve> {
        let gains = self.sliders.gains();

        debug!("Applying gains: {}", self.sliders);

        self.simulator.set_gains(gains);
        self.curve = ResponseCurve::smooth(self.simulator.run(&self.params), self.resolution)?;

        trace!(
            "Response final value: {:?}, overshoot: {:.2}%",
            self.curve.response().final_value(),
            self.curve.response().overshoot()
        );

        Ok(&self.curve)
    }

    #[inline]
    pub fn curve(&self) -> &ResponseCurve {
        &self.curve
    }

    #[inline]
    pub fn sliders(&self) -> &SliderBank {
        &self.sliders
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.simulator.gains()
    }

    #[inline]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_curve() {
        let session = TuningSession::new(&Config::default()).unwrap();
        let curve = session.curve();

        assert_eq!(session.gains(), Gains::new(1.0, 10.0, 0.001));
        assert_eq!(curve.response().len(), 30);
        assert_eq!(curve.response().samples()[1], 1.005);
        assert_eq!(curve.setpoint(), 1.0);
        assert_eq!(curve.time().len(), 300);
        assert_eq!(curve.values().len(), 300);
        assert_eq!(curve.time()[299], 29.0);
    }

    #[test]
    fn curve_passes_through_samples() {
        let session = TuningSession::new(&Config::default()).unwrap();
        let curve = session.curve();

        assert!(curve.values()[0].abs() < 1e-9);
        assert!((curve.values()[299] - curve.response().final_value().unwrap()).abs() < 1e-9);
    }

    #[test]
    fn slider_change_resimulates() {
        let mut session = TuningSession::new(&Config::default()).unwrap();
        let before = session.curve().clone();

        let after = session.set_slider(GainKind::Proportional, 20).unwrap().clone();

        assert_eq!(session.gains().kp, 2.0);
        assert_ne!(before.response(), after.response());
    }

    #[test]
    fn slider_roundtrip_restores_curve() {
        let mut session = TuningSession::new(&Config::default()).unwrap();
        let before = session.curve().clone();

        session.set_slider(GainKind::Integral, 150).unwrap();
        session.set_slider(GainKind::Derivative, 80).unwrap();
        session.set_slider(GainKind::Integral, 100).unwrap();
        session.set_slider(GainKind::Derivative, 1).unwrap();

        assert_eq!(session.curve(), &before);
    }

    #[test]
    fn unchanged_slider_keeps_curve() {
        let mut session = TuningSession::new(&Config::default()).unwrap();
        let before = session.curve().clone();

        session.set_slider(GainKind::Proportional, 10).unwrap();

        assert_eq!(session.curve(), &before);
    }

    #[test]
    fn zero_gains_flat_curve() {
        let mut session = TuningSession::new(&Config::default()).unwrap();

        for kind in GainKind::ALL {
            session.set_slider(kind, 0).unwrap();
        }

        assert_eq!(session.gains(), Gains::default());
        assert!(session.curve().values().iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn reject_invalid_config() {
        let mut config = Config::default();
        config.controller.dt = 0.0;

        assert!(TuningSession::new(&config).is_err());
    }
}
