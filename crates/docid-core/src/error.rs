//! Error types for the docid-core library.

use std::fmt;

use thiserror::Error;

/// Main error type for the docid library.
#[derive(Error, Debug)]
pub enum DocidError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input or configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Hard failures of the extraction engine.
///
/// Missing optional fields are not errors; they surface as `None` values and
/// a `fail` status on the result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No qualifying anchor or pattern was located.
    #[error("{0} not found")]
    NotFound(Missing),

    /// Candidate date text was present but matched none of the accepted formats.
    #[error("invalid date format: {value}")]
    InvalidDate { value: String },

    /// A field required to build a downstream request is absent.
    #[error("missing required field: {0}")]
    MissingField(String),
}

impl ExtractionError {
    /// HTTP status class a calling layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ExtractionError::NotFound(_) => 404,
            ExtractionError::InvalidDate { .. } | ExtractionError::MissingField(_) => 400,
        }
    }
}

/// What an extractor failed to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Missing {
    /// The 17-digit birth registration number.
    RegistrationNumber,
    /// The MRZ code line of a passport.
    MrzCode,
}

impl Missing {
    /// Message returned to API clients.
    pub fn message(&self) -> &'static str {
        match self {
            Missing::RegistrationNumber => "Birth Registration Number not found.",
            Missing::MrzCode => "MRZ code not found.",
        }
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::RegistrationNumber => f.write_str("birth registration number"),
            Missing::MrzCode => f.write_str("MRZ code"),
        }
    }
}

/// Returned by the date normalizer when no format matches the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' matches none of the accepted date formats")]
pub struct DateParseError {
    /// The text that failed to parse, after cleanup.
    pub input: String,
}

impl From<DateParseError> for ExtractionError {
    fn from(err: DateParseError) -> Self {
        ExtractionError::InvalidDate { value: err.input }
    }
}

/// Result type for the docid library.
pub type Result<T> = std::result::Result<T, DocidError>;
