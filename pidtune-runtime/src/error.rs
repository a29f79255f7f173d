use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io(io::Error),
    /// Configuration file could not be decoded.
    Config(toml::de::Error),
    /// Configuration value out of range.
    Invalid(String),
    /// Controller engine rejected its input.
    Engine(pidtune_core::Error),
    /// Curve could not be exported.
    Export(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Engine(e) => write!(f, "{}", e),
            Error::Export(e) => write!(f, "export failed: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Invalid(_) => None,
            Error::Engine(e) => Some(e),
            Error::Export(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e)
    }
}

impl From<pidtune_core::Error> for Error {
    fn from(e: pidtune_core::Error) -> Self {
        Error::Engine(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Export(e)
    }
}
