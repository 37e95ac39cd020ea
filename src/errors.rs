use std::num::ParseIntError;
use thiserror::Error;

/// An error from configuring, building, or evaluating a counting run.
#[derive(Debug, Error)]
pub enum CountingError {
    /// A token of the comma separated input was not an integer.
    #[error("could not parse {token:?} as an index: {source}")]
    Parse {
        /// The offending token, untrimmed.
        token: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The marked set is empty so the relative error divides by zero.
    #[error("no marked elements, relative error is undefined")]
    EmptyMarkedSet,
    /// A marked index does not address a basis state of the target register.
    #[error("index {index} is outside of the search space of {size} elements")]
    IndexOutOfRange {
        /// The offending index.
        index: i64,
        /// Size of the search space.
        size: usize,
    },
    /// A marked index appears more than once.
    #[error("index {0} is marked more than once")]
    DuplicateIndex(i64),
    /// The register layout cannot be simulated.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An operator which should be unitary is not.
    #[error("operator is not unitary (deviation {deviation:e} exceeds {tolerance:e})")]
    NonUnitary {
        /// Largest absolute entry of `U^dagger U - I`.
        deviation: f64,
        /// Allowed deviation.
        tolerance: f64,
    },
    /// A generic error.
    #[error("{0}")]
    Generic(String),
}

impl CountingError {
    /// Construct a new generic error.
    pub fn new<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Generic(msg.into())
    }
}

/// A result which may contain a counting error.
pub type CountingResult<T> = Result<T, CountingError>;

#[cfg(test)]
mod errors_tests {
    use super::*;

    #[test]
    fn test_generic_message() {
        let err = CountingError::new("bad shape");
        assert_eq!(err.to_string(), "bad shape");
    }

    #[test]
    fn test_parse_message_names_token() {
        let source = "x".parse::<i64>().unwrap_err();
        let err = CountingError::Parse {
            token: "x".to_string(),
            source,
        };
        assert!(err.to_string().contains("\"x\""));
    }
}
