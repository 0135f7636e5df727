//! Error types for the donation matcher.
//!
//! Malformed input fails fast: the whole run is aborted and no partial
//! results are produced. Pool and cap arithmetic has no error path; every
//! draw is clamped to the available balance.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A money string could not be parsed.
    #[error("invalid money amount: {0}")]
    InvalidMoney(String),

    /// A date or time string could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The round-policy file is malformed.
    #[error("invalid matching criteria file (line {line}): {message}")]
    Policy { line: usize, message: String },

    /// A donation record is missing a field or has an unparsable cell.
    #[error("invalid donation record (row {row}): {message}")]
    Donation { row: usize, message: String },

    /// CSV reader/writer failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// SSZ encoding failed while computing a receipt root.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl MatchError {
    pub(crate) fn policy(line: usize, message: impl Into<String>) -> Self {
        MatchError::Policy {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn donation(row: usize, message: impl Into<String>) -> Self {
        MatchError::Donation {
            row,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_error_display() {
        let err = MatchError::policy(7, "BEGIN CRITERION inside an open block");
        assert_eq!(
            err.to_string(),
            "invalid matching criteria file (line 7): BEGIN CRITERION inside an open block"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: MatchError = io.into();
        assert!(matches!(err, MatchError::Io(_)));
    }
}
