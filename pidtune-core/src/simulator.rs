use crate::{
    algorithm::LowPassFilter,
    controller::{Gains, PidController},
    Error,
};

/// Which value is fed back into the controller on the next step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackPath {
    /// The filtered sample is passed back to the controller explicitly.
    #[default]
    Filtered,
    /// The controller chains onto its own raw output.
    Raw,
}

impl std::fmt::Display for FeedbackPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackPath::Filtered => write!(f, "filtered"),
            FeedbackPath::Raw => write!(f, "raw"),
        }
    }
}

/// Parameters of a single simulation run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationParams {
    /// Number of controller steps after the seed.
    pub steps: usize,
    /// Initial feedback value, also the first sample.
    pub seed: f64,
    /// Low-pass coefficient applied to every controller output.
    pub beta: f64,
    /// Feedback convention.
    pub feedback: FeedbackPath,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            steps: 29,
            seed: 0.0,
            beta: 0.5,
            feedback: FeedbackPath::Filtered,
        }
    }
}

/// Sampled step response.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResponse {
    samples: Vec<f64>,
    setpoint: f64,
}

impl StepResponse {
    /// Response samples, seed first.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    #[inline]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Last sample of the response.
    pub fn final_value(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    /// Extreme sample in the direction of travel from the seed.
    ///
    /// The seed itself is not considered. For a response falling towards the
    /// setpoint this is the smallest sample.
    pub fn peak(&self) -> Option<f64> {
        let (_, response) = self.samples.split_first()?;

        if self.travel() < 0.0 {
            response.iter().copied().reduce(f64::min)
        } else {
            response.iter().copied().reduce(f64::max)
        }
    }

    /// Peak excursion past the setpoint in percentage of the step size.
    ///
    /// The step size is the distance from the seed to the setpoint. Returns
    /// zero if the response never passes the setpoint or the seed already
    /// equals the setpoint.
    pub fn overshoot(&self) -> f64 {
        let travel = self.travel();

        match self.peak() {
            Some(peak) if travel != 0.0 => {
                let excursion = (peak - self.setpoint) * travel.signum();
                if excursion > 0.0 {
                    (excursion / travel.abs()) * 100.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// Signed distance from the seed to the setpoint.
    fn travel(&self) -> f64 {
        self.samples
            .first()
            .map_or(0.0, |seed| self.setpoint - seed)
    }

    /// Difference between setpoint and last sample.
    pub fn steady_state_error(&self) -> Option<f64> {
        self.final_value().map(|value| self.setpoint - value)
    }
}

impl IntoIterator for StepResponse {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

/// Step response generator.
///
/// Couples a PID controller with a low-pass filter and treats the
/// controller's own output as the next process measurement, i.e. a unit-gain
/// plant. This is a response generator, not a closed loop around an external
/// process.
#[derive(Clone, Debug)]
pub struct StepResponseSimulator {
    controller: PidController,
    filter: LowPassFilter,
}

impl StepResponseSimulator {
    pub fn new(gains: Gains, setpoint: f64, dt: f64) -> Result<Self, Error> {
        Ok(Self {
            controller: PidController::new(gains, setpoint, dt)?,
            filter: LowPassFilter::new(),
        })
    }

    /// Reset controller and filter state.
    pub fn clear(&mut self) {
        self.controller.clear();
        self.filter.reset();
    }

    /// Run one controller step, see [`PidController::compute`].
    #[inline]
    pub fn compute(&mut self, feedback_value: Option<f64>) -> f64 {
        self.controller.compute(feedback_value)
    }

    /// Run one filter step, see [`LowPassFilter::filter`].
    #[inline]
    pub fn lowpass_filter(&mut self, x: f64, beta: f64) -> f64 {
        self.filter.filter(x, beta)
    }

    /// Clear all state, then generate a step response.
    ///
    /// The response holds the seed followed by one filtered sample per step.
    pub fn run(&mut self, params: &SimulationParams) -> StepResponse {
        self.clear();

        let mut samples = Vec::with_capacity(params.steps + 1);
        samples.push(params.seed);

        let mut x = params.seed;
        for step in 0..params.steps {
            let output = match params.feedback {
                FeedbackPath::Filtered => self.compute(Some(x)),
                FeedbackPath::Raw if step == 0 => self.compute(Some(params.seed)),
                FeedbackPath::Raw => self.compute(None),
            };

            x = self.lowpass_filter(output, params.beta);
            samples.push(x);
        }

        StepResponse {
            samples,
            setpoint: self.controller.setpoint(),
        }
    }

    #[inline]
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut PidController {
        &mut self.controller
    }

    #[inline]
    pub fn filter(&self) -> &LowPassFilter {
        &self.filter
    }

    #[inline]
    pub fn set_gains(&mut self, gains: Gains) {
        self.controller.set_gains(gains);
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.controller.gains()
    }

    #[inline]
    pub fn setpoint(&self) -> f64 {
        self.controller.setpoint()
    }
}
