use std::{io::Write, path::Path};

use pidtune_core::StepResponse;

use crate::session::ResponseCurve;

#[derive(Debug, serde_derive::Serialize)]
struct CurveRecord {
    time: f64,
    response: f64,
    setpoint: f64,
}

#[derive(Debug, serde_derive::Serialize)]
struct TraceRecord {
    step: usize,
    value: f64,
}

/// Write the smoothed curve as CSV.
///
/// Columns are `time`, `response` and `setpoint`, one row per curve point.
pub fn write_curve<W: Write>(curve: &ResponseCurve, writer: W) -> crate::Result {
    let mut wtr = csv::Writer::from_writer(writer);

    for (time, response) in curve.points() {
        wtr.serialize(CurveRecord {
            time,
            response,
            setpoint: curve.setpoint(),
        })?;
    }

    wtr.flush()?;

    Ok(())
}

/// Write the raw simulation samples as CSV.
pub fn write_trace<W: Write>(response: &StepResponse, writer: W) -> crate::Result {
    let mut wtr = csv::Writer::from_writer(writer);

    for (step, value) in response.samples().iter().enumerate() {
        wtr.serialize(TraceRecord {
            step,
            value: *value,
        })?;
    }

    wtr.flush()?;

    Ok(())
}

/// Write the smoothed curve to a CSV file.
pub fn export_curve<P: AsRef<Path>>(curve: &ResponseCurve, path: P) -> crate::Result {
    let file = std::fs::File::create(path.as_ref())?;

    write_curve(curve, file)?;

    debug!(
        "Exported {} curve points to {}",
        curve.time().len(),
        path.as_ref().display()
    );

    Ok(())
}
