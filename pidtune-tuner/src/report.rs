use std::io::{self, Write};

use pidtune::{core::StepResponse, ResponseCurve, SliderBank};

/// Write one line per gain slider.
pub fn write_sliders<W: Write>(out: &mut W, sliders: &SliderBank) -> io::Result<()> {
    for slider in sliders.iter() {
        let range = slider.range();

        writeln!(
            out,
            "{}: {:>8}  (position {} of {}..={})",
            slider.kind(),
            slider.label_text(),
            slider.position(),
            range.start(),
            range.end()
        )?;
    }

    Ok(())
}

/// Write the response figures of a curve.
pub fn write_summary<W: Write>(out: &mut W, curve: &ResponseCurve) -> io::Result<()> {
    let response = curve.response();

    writeln!(
        out,
        "Setpoint: {}  Final: {:.6}  Peak: {:.6}  Overshoot: {:.2}%",
        curve.setpoint(),
        response.final_value().unwrap_or_default(),
        response.peak().unwrap_or_default(),
        response.overshoot()
    )
}

/// Write the raw samples as a table.
pub fn write_trace<W: Write>(out: &mut W, response: &StepResponse) -> io::Result<()> {
    writeln!(out, "{:>4}  {:>14}", "step", "value")?;

    for (step, value) in response.samples().iter().enumerate() {
        writeln!(out, "{:>4}  {:>14.9}", step, value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pidtune::{Config, TuningSession};

    #[test]
    fn sliders_table() {
        let session = TuningSession::new(&Config::default()).unwrap();

        let mut out = Vec::new();
        write_sliders(&mut out, session.sliders()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("Kp:      1.0  (position 10 of 0..=30)"));
        assert!(text.contains("Kd:    0.001"));
    }

    #[test]
    fn summary_line() {
        let session = TuningSession::new(&Config::default()).unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, session.curve()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Setpoint: 1  Final: 1.000000  Peak: 1.005000"));
        assert!(text.trim_end().ends_with("Overshoot: 0.50%"));
    }

    #[test]
    fn trace_table() {
        let session = TuningSession::new(&Config::default()).unwrap();

        let mut out = Vec::new();
        write_trace(&mut out, session.curve().response()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 31);
        assert_eq!(lines[2], "   1     1.005000000");
    }
}
