//! Error-code registry for API responses.
//!
//! Every client-facing failure is reported as a short code of the form
//! `NNxNNN` mapped to a human-readable message. Messages are templates with
//! named placeholders (`{key}`, `{minimum}`, `{maximum}`) filled in by the
//! caller.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Key used for failures of whole-request (cross-field) checks.
pub const SCHEMA_VALIDATION_KEY: &str = "schema_validation";

/// Known client-facing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// `01x001` - API version segment is not supported.
    InvalidVersion,
    /// `01x002` - numeric value missing or outside its range.
    OutOfRange,
    /// `01x004` - site id missing, malformed or unknown.
    InvalidSiteId,
    /// `01x005` - boolean flag not `True`/`False`.
    InvalidBoolean,
    /// `01x006` - location is not a `(lat,lon)` pair.
    InvalidLocation,
    /// `01x999` - anything that does not fit the categories above.
    Unknown,
}

impl ErrorCode {
    /// The wire representation of the code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVersion => "01x001",
            ErrorCode::OutOfRange => "01x002",
            ErrorCode::InvalidSiteId => "01x004",
            ErrorCode::InvalidBoolean => "01x005",
            ErrorCode::InvalidLocation => "01x006",
            ErrorCode::Unknown => "01x999",
        }
    }

    /// The unformatted message template.
    pub const fn template(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVersion => "Invalid version.",
            ErrorCode::OutOfRange => {
                "Invalid or missing {key}. Value must be an integer value greater than {minimum} and less than {maximum}."
            }
            ErrorCode::InvalidSiteId => {
                "Invalid site_id. Value must be a valid 4 character id found in http://nadp.slh.wisc.edu/data/sites/CSV/?net=NTN."
            }
            ErrorCode::InvalidBoolean => {
                "Invalid include_inactive. Value must be a boolean value (True or False)."
            }
            ErrorCode::InvalidLocation => "Invalid location. Value must be a tuple of floats values.",
            ErrorCode::Unknown => "Unknown error occurred.",
        }
    }

    /// Build an entry whose message is the bare template.
    pub fn entry(self) -> ErrorEntry {
        ErrorEntry {
            code: self,
            message: self.template().to_string(),
        }
    }

    /// Build an entry with the `{key}`, `{minimum}` and `{maximum}`
    /// placeholders substituted.
    ///
    /// Whole floats render without a fractional part (`0`, not `0.0`).
    pub fn entry_for(
        self,
        key: &str,
        minimum: impl fmt::Display,
        maximum: impl fmt::Display,
    ) -> ErrorEntry {
        let message = self
            .template()
            .replace("{key}", key)
            .replace("{minimum}", &minimum.to_string())
            .replace("{maximum}", &maximum.to_string());

        ErrorEntry {
            code: self,
            message,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved error: code plus formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: ErrorCode,
    pub message: String,
}

/// The `errors` member of a response envelope, `code -> message`.
///
/// Codes are unique; when the same code is reported twice the first
/// message is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a registry error.
    pub fn push(&mut self, entry: ErrorEntry) {
        self.insert_first(entry.code.as_str(), entry.message);
    }

    /// Record a cross-field failure under [`SCHEMA_VALIDATION_KEY`].
    pub fn push_schema(&mut self, message: impl Into<String>) {
        self.insert_first(SCHEMA_VALIDATION_KEY, message.into());
    }

    fn insert_first(&mut self, key: &str, message: String) {
        self.0.entry(key.to_string()).or_insert(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the given code (or raw key) is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over `(code, message)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<ErrorEntry> for ErrorMap {
    fn from(entry: ErrorEntry) -> Self {
        let mut errors = ErrorMap::new();
        errors.push(entry);
        errors
    }
}

impl From<ErrorCode> for ErrorMap {
    fn from(code: ErrorCode) -> Self {
        code.entry().into()
    }
}
