//! Records served by the API.
//!
//! Both data sources are pass-through: every column except the ones used as
//! keys is forwarded as the exact string found in the source, so the types
//! here wrap string maps and only parse what the filters need.

use std::collections::BTreeMap;

use csv::StringRecord;
use serde::Serialize;

use crate::geo::Location;

/// One delimited row, `column -> value`.
pub type Record = BTreeMap<String, String>;

/// Sites keyed by site id.
pub type SiteMap = BTreeMap<String, Site>;

/// Samples keyed by site id, then lab number.
pub type SampleMap = BTreeMap<String, BTreeMap<String, Record>>;

/// Operating status of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    /// `A`
    Active,
    /// `I`
    Inactive,
    /// Anything else, including a missing column.
    Unknown,
}

impl SiteStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "A" => SiteStatus::Active,
            "I" => SiteStatus::Inactive,
            _ => SiteStatus::Unknown,
        }
    }
}

/// Metadata for one monitoring site, minus its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Site {
    fields: Record,
}

impl Site {
    pub fn new(fields: Record) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Record {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.get("latitude")?.trim().parse().ok()
    }

    pub fn longitude(&self) -> Option<f64> {
        self.get("longitude")?.trim().parse().ok()
    }

    /// The site's coordinates, if both parse.
    pub fn location(&self) -> Option<Location> {
        Some(Location::new(self.latitude()?, self.longitude()?))
    }

    pub fn status(&self) -> SiteStatus {
        self.get("status")
            .map(SiteStatus::from_code)
            .unwrap_or(SiteStatus::Unknown)
    }
}

/// Zip a data row with the header row.
///
/// Columns missing from a short row map to an empty string; values past the
/// last header are dropped.
pub(crate) fn to_record(headers: &StringRecord, row: &StringRecord) -> Record {
    headers
        .iter()
        .zip(row.iter().chain(std::iter::repeat("")))
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect()
}
