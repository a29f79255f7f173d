// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

mod report;
mod shell;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "PID controller tuning workbench", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(
        short = 'c',
        long = "config",
        alias = "conf",
        value_name = "FILE",
        value_hint = ValueHint::FilePath
    )]
    config: Option<PathBuf>,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Commands.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a single step response simulation.
    Simulate {
        /// Proportional gain slider position.
        #[arg(long)]
        kp: Option<i32>,
        /// Integral gain slider position.
        #[arg(long)]
        ki: Option<i32>,
        /// Derivative gain slider position.
        #[arg(long)]
        kd: Option<i32>,
        /// Write the smoothed curve to a CSV file.
        #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Chain the controller onto its own raw output.
        #[arg(long)]
        raw_feedback: bool,
    },
    /// Adjust the gain sliders from standard input.
    Interactive,
}

fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(LevelFilter::Off);
    log_config.set_thread_level(LevelFilter::Off);
    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);

    let log_level = match args.verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let config = load_config(args.config.as_ref())?;

    log::trace!("{}", config);

    run(config, args.command)
}

/// Load the configuration file if given, then try the local directory.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<pidtune::Config> {
    use pidtune::consts::DEFAULT_CONFIG_FILE;

    if let Some(path) = path {
        return Ok(pidtune::from_file(path)?);
    }

    let local_config = std::env::current_dir()?.join(DEFAULT_CONFIG_FILE);
    if local_config.exists() {
        return Ok(pidtune::from_file(local_config)?);
    }

    log::debug!("No configuration file, using defaults");

    Ok(pidtune::Config::default())
}

fn run(mut config: pidtune::Config, command: Command) -> anyhow::Result<()> {
    use pidtune::consts::VERSION;
    use pidtune::GainKind;

    let bin_name = env!("CARGO_BIN_NAME");

    log::info!("Starting {}", bin_name);
    log::debug!("Runtime version: {}", VERSION);

    match command {
        Command::Simulate {
            kp,
            ki,
            kd,
            output,
            raw_feedback,
        } => {
            if raw_feedback {
                config.simulation.feedback = pidtune::core::FeedbackPath::Raw;
            }

            let mut session = pidtune::TuningSession::new(&config)?;

            for (kind, position) in [
                (GainKind::Proportional, kp),
                (GainKind::Integral, ki),
                (GainKind::Derivative, kd),
            ] {
                if let Some(position) = position {
                    session.set_slider(kind, position)?;
                }
            }

            let mut stdout = std::io::stdout().lock();

            report::write_sliders(&mut stdout, session.sliders())?;
            report::write_trace(&mut stdout, session.curve().response())?;
            report::write_summary(&mut stdout, session.curve())?;

            if let Some(path) = output {
                pidtune::export::export_curve(session.curve(), &path)?;

                log::info!("Curve written to {}", path.display());
            }
        }
        Command::Interactive => {
            let mut session = pidtune::TuningSession::new(&config)?;

            shell::run(&mut session, std::io::stdin().lock(), std::io::stdout())?;
        }
    }

    Ok(())
}
