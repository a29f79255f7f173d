use std::{error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Time step is zero, negative or not finite.
    InvalidTimeStep(f64),
    /// Not enough knots to fit a cubic spline.
    InsufficientKnots { required: usize, actual: usize },
    /// Number of knots and values differ.
    KnotMismatch { knots: usize, values: usize },
    /// Knots are not strictly increasing.
    UnorderedKnots,
    /// Spline moment system has no unique solution.
    SingularSystem,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTimeStep(dt) => {
                write!(f, "time step must be positive and finite, got {}", dt)
            }
            Error::InsufficientKnots { required, actual } => write!(
                f,
                "spline requires at least {} knots, got {}",
                required, actual
            ),
            Error::KnotMismatch { knots, values } => write!(
                f,
                "spline knot count ({}) does not match value count ({})",
                knots, values
            ),
            Error::UnorderedKnots => write!(f, "spline knots must be strictly increasing"),
            Error::SingularSystem => write!(f, "spline system is singular"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
