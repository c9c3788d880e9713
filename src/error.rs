//! Error types for parameter parsing and configuration.

use std::fmt;

/// Errors surfaced by setters and configuration operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Textual parameter input was not a valid number.
    Parse {
        parameter: &'static str,
        input: String,
    },
    /// A configuration value was outside its valid range.
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { parameter, input } => {
                write!(f, "failed to parse {parameter} from {input:?}")
            }
            Error::InvalidConfiguration(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
