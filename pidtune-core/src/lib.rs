pub mod algorithm;
pub mod controller;
pub mod simulator;

mod error;

pub use self::controller::{Gains, PidController};
pub use self::error::Error;
pub use self::simulator::{FeedbackPath, SimulationParams, StepResponse, StepResponseSimulator};

pub use nalgebra;
