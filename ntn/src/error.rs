//! Error types for the NTN library.

use thiserror::Error;

/// Errors raised while loading configuration or reading NTN data.
///
/// These never reach API clients directly: the data fetchers log them and
/// fall back to an empty result.
#[derive(Error, Debug)]
pub enum NtnError {
    /// IO error when reading the sample file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Network or client error talking to the site feed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site feed answered with something other than `200 OK`.
    #[error("Site feed returned HTTP {status}")]
    FeedStatus { status: u16 },

    /// A header column the parser depends on is absent.
    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    /// A matching row ends before one of its key columns.
    #[error("Row {line} has no value for column {column}")]
    MissingField { line: u64, column: String },

    /// A unix timestamp that cannot be represented as a calendar date.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias using [`NtnError`].
pub type Result<T> = std::result::Result<T, NtnError>;
