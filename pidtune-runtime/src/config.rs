use pidtune_core::{algorithm::CubicSpline, FeedbackPath, SimulationParams};

use crate::consts::*;

/// Controller configuration.
#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    /// Target value.
    pub setpoint: f64,
    /// Simulation time step.
    pub dt: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            setpoint: DEFAULT_SETPOINT,
            dt: DEFAULT_TIME_STEP,
        }
    }
}

/// Simulation configuration.
#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of controller steps after the seed.
    pub steps: usize,
    /// Initial feedback value.
    pub seed: f64,
    /// Low-pass coefficient.
    pub beta: f64,
    /// Number of points on the smoothed curve.
    pub resolution: usize,
    /// Feedback convention.
    pub feedback: FeedbackPath,
}

impl SimulationConfig {
    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            steps: self.steps,
            seed: self.seed,
            beta: self.beta,
            feedback: self.feedback,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            seed: 0.0,
            beta: DEFAULT_LOWPASS_BETA,
            resolution: DEFAULT_RESOLUTION,
            feedback: FeedbackPath::Filtered,
        }
    }
}

/// Gain slider configuration.
///
/// The gain is the slider position divided by the scale.
#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct SliderConfig {
    /// Lowest slider position.
    pub min: i32,
    /// Highest slider position.
    pub max: i32,
    /// Slider position at startup.
    pub initial: i32,
    /// Position to gain divisor.
    pub scale: f64,
    /// Number of decimals shown, derived from the scale if omitted.
    #[serde(default)]
    pub precision: Option<usize>,
}

impl SliderConfig {
    const fn new(min: i32, max: i32, initial: i32, scale: f64) -> Self {
        Self {
            min,
            max,
            initial,
            scale,
            precision: None,
        }
    }
}

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct SlidersConfig {
    pub kp: SliderConfig,
    pub ki: SliderConfig,
    pub kd: SliderConfig,
}

impl Default for SlidersConfig {
    fn default() -> Self {
        Self {
            kp: SliderConfig::new(0, 30, 10, 10.0),
            ki: SliderConfig::new(0, 200, 100, 10.0),
            kd: SliderConfig::new(0, 100, 1, 1000.0),
        }
    }
}

/// Tuning configuration.
#[derive(Clone, Debug, Default, serde_derive::Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Controller configuration.
    pub controller: ControllerConfig,
    /// Simulation configuration.
    pub simulation: SimulationConfig,
    /// Gain slider configuration.
    pub sliders: SlidersConfig,
}

impl Config {
    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> crate::Result {
        let dt = self.controller.dt;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(invalid(format!(
                "controller.dt must be positive and finite, got {}",
                dt
            )));
        }
        if !self.controller.setpoint.is_finite() {
            return Err(invalid("controller.setpoint must be finite"));
        }

        if self.simulation.steps + 1 < CubicSpline::MIN_KNOTS {
            return Err(invalid(format!(
                "simulation.steps must be at least {}, got {}",
                CubicSpline::MIN_KNOTS - 1,
                self.simulation.steps
            )));
        }
        if self.simulation.resolution < 2 {
            return Err(invalid(format!(
                "simulation.resolution must be at least 2, got {}",
                self.simulation.resolution
            )));
        }
        if !self.simulation.beta.is_finite() {
            return Err(invalid("simulation.beta must be finite"));
        }
        if !(0.0..=1.0).contains(&self.simulation.beta) {
            log::warn!(
                "Low-pass coefficient {} outside [0, 1] will not damp the response",
                self.simulation.beta
            );
        }

        for (name, slider) in [
            ("kp", &self.sliders.kp),
            ("ki", &self.sliders.ki),
            ("kd", &self.sliders.kd),
        ] {
            if slider.min > slider.max {
                return Err(invalid(format!(
                    "sliders.{}: min ({}) exceeds max ({})",
                    name, slider.min, slider.max
                )));
            }
            if !(slider.scale.is_finite() && slider.scale > 0.0) {
                return Err(invalid(format!(
                    "sliders.{}: scale must be positive and finite, got {}",
                    name, slider.scale
                )));
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Setpoint: {}; Time step: {}; Steps: {}; Seed: {}; Beta: {}; Resolution: {}; Feedback: {}",
            self.controller.setpoint,
            self.controller.dt,
            self.simulation.steps,
            self.simulation.seed,
            self.simulation.beta,
            self.simulation.resolution,
            self.simulation.feedback,
        )
    }
}

fn invalid(msg: impl ToString) -> crate::Error {
    crate::Error::Invalid(msg.to_string())
}
