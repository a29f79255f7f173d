// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

//! The `pidtune` library provides the runtime around the PID engine.
//!
//! The engine itself lives in `pidtune-core` and is re-exported as `core`.
//! This library adds the gain sliders, the tuning session which re-runs the
//! step response on every slider change, curve smoothing, CSV export and
//! configuration loading.
//!
//! The `TuningSession` struct owns one simulator for its whole lifetime. On
//! every slider change it applies the new gains, clears the engine state,
//! runs a fixed number of steps and smooths the samples onto a dense time
//! axis. The resulting `ResponseCurve` carries the setpoint for the
//! reference line.

#[macro_use]
extern crate log;

mod config;
mod error;

pub mod export;
pub mod session;
pub mod slider;

pub use self::config::*;
pub use self::error::Error;
pub use self::session::{ResponseCurve, TuningSession};
pub use self::slider::{GainKind, GainSlider, SliderBank};

pub use pidtune_core as core;

pub type Result<T = ()> = std::result::Result<T, error::Error>;

/// Load and decode a TOML configuration file.
pub fn from_file<T, P>(path: P) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<std::path::Path>,
{
    let contents = std::fs::read_to_string(path.as_ref())?;

    debug!("Loaded configuration from {}", path.as_ref().display());

    Ok(toml::from_str(&contents)?)
}

/// Runtime module containing various constants.
pub mod consts {
    /// Runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use pidtune::consts::VERSION;
    ///
    /// println!("Runtime version: {}", VERSION);
    /// ```
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Default configuration file name.
    ///
    /// # Remarks
    ///
    /// Looked up in the current directory when no configuration file is
    /// given on the command line.
    pub const DEFAULT_CONFIG_FILE: &str = "pidtune.toml";

    /// Default controller setpoint.
    pub const DEFAULT_SETPOINT: f64 = 1.0;

    /// Default simulation time step.
    ///
    /// # Example
    ///
    /// ```
    /// use pidtune::consts::DEFAULT_TIME_STEP;
    ///
    /// assert!(DEFAULT_TIME_STEP > 0.0);
    /// ```
    ///
    /// # Remarks
    ///
    /// The time step must never be zero, the derivative term divides by it.
    pub const DEFAULT_TIME_STEP: f64 = 0.1;

    /// Default number of simulation steps after the seed.
    ///
    /// # Remarks
    ///
    /// Together with the seed this yields 30 samples per run.
    pub const DEFAULT_STEPS: usize = 29;

    /// Default low-pass coefficient.
    pub const DEFAULT_LOWPASS_BETA: f64 = 0.5;

    /// Default number of points on the smoothed curve.
    pub const DEFAULT_RESOLUTION: usize = 300;
}
