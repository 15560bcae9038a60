//! The `{data, errors}` wrapper every response uses.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::codes::{ErrorCode, ErrorMap};

/// Response body shared by every endpoint.
///
/// Exactly one side is populated: `data` on success (possibly empty),
/// `errors` on failure, in which case `data` is `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub data: Value,
    pub errors: ErrorMap,
}

impl Envelope {
    /// Wrap a successful result.
    pub fn success<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                data,
                errors: ErrorMap::new(),
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response data");
                Self::failure(ErrorCode::Unknown)
            }
        }
    }

    /// Wrap a rejection.
    pub fn failure(errors: impl Into<ErrorMap>) -> Self {
        Self {
            data: Value::Object(Map::new()),
            errors: errors.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
