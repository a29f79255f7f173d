use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use pidtune::{GainKind, TuningSession};

use crate::report;

const HELP: &str = "\
Commands:
  kp <position>    Move the proportional gain slider
  ki <position>    Move the integral gain slider
  kd <position>    Move the derivative gain slider
  show             Show gains and response figures
  trace            Show the raw response samples
  export <file>    Write the smoothed curve as CSV
  help             Show this help
  quit             Leave the shell";

#[derive(Debug, PartialEq)]
pub enum Input {
    /// Move a gain slider.
    Slider(GainKind, i32),
    Show,
    Trace,
    Export(PathBuf),
    Help,
    Quit,
    Empty,
}

/// Parse a single shell line.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();

    let Some(command) = parts.next() else {
        return Ok(Input::Empty);
    };

    if let Ok(kind) = command.parse::<GainKind>() {
        let position = parts
            .next()
            .ok_or_else(|| format!("Missing position for {}", kind))?;

        return position
            .parse::<i32>()
            .map(|position| Input::Slider(kind, position))
            .map_err(|_| format!("Invalid position '{}'", position));
    }

    match command.to_lowercase().as_str() {
        "show" => Ok(Input::Show),
        "trace" => Ok(Input::Trace),
        "export" => parts
            .next()
            .map(|path| Input::Export(PathBuf::from(path)))
            .ok_or_else(|| "Missing export file".to_string()),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        _ => Err(format!("Unknown command '{}'", command)),
    }
}

/// Run the interactive shell until the input ends or the user quits.
pub fn run<R: BufRead, W: Write>(
    session: &mut TuningSession,
    reader: R,
    mut out: W,
) -> anyhow::Result<()> {
    report::write_sliders(&mut out, session.sliders())?;
    report::write_summary(&mut out, session.curve())?;
    prompt(&mut out)?;

    for line in reader.lines() {
        let line = line?;

        match parse_input(&line) {
            Ok(Input::Slider(kind, position)) => {
                session.set_slider(kind, position)?;

                log::info!("{} set to {}", kind, session.sliders().get(kind).label_text());

                report::write_sliders(&mut out, session.sliders())?;
                report::write_summary(&mut out, session.curve())?;
            }
            Ok(Input::Show) => {
                report::write_sliders(&mut out, session.sliders())?;
                report::write_summary(&mut out, session.curve())?;
            }
            Ok(Input::Trace) => report::write_trace(&mut out, session.curve().response())?,
            Ok(Input::Export(path)) => match pidtune::export::export_curve(session.curve(), &path)
            {
                Ok(()) => writeln!(out, "Curve written to {}", path.display())?,
                Err(e) => {
                    log::error!("{}", e);
                    writeln!(out, "Export failed: {}", e)?;
                }
            },
            Ok(Input::Help) => writeln!(out, "{}", HELP)?,
            Ok(Input::Quit) => break,
            Ok(Input::Empty) => {}
            Err(msg) => writeln!(out, "{}; type 'help' for commands", msg)?,
        }

        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
