//! Query-parameter validation and normalization.
//!
//! Each endpoint declares its parameters as a list of [`FieldRule`]s. Every
//! rule is evaluated, so a request with several bad parameters reports all
//! of them. Whole-request checks (such as `start_date <= end_date`) only run
//! once every field is valid and are reported under their own key.
//!
//! Unknown parameters are ignored.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::codes::{ErrorCode, ErrorEntry, ErrorMap};
use crate::error::{NtnError, Result};
use crate::geo::{Location, MAX_RADIUS_MILES};

/// The only API version served.
pub const API_VERSION: &str = "v1.0";

/// Raw query-string parameters.
pub type RawParams = HashMap<String, String>;

/// Normalized samples-by-id query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplesQuery {
    /// Upper-cased 4-character site id.
    pub site_id: String,
    /// Inclusive lower bound, `YYYYMM`.
    pub start: String,
    /// Inclusive upper bound, `YYYYMM`.
    pub end: String,
}

/// Normalized site-info query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteQuery {
    /// Upper-cased 4-character site id.
    pub site_id: String,
}

/// Normalized site-info-by-radius query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    pub location: Location,
    /// Miles, `0..=MAX_RADIUS_MILES`.
    pub radius: f64,
    pub include_inactive: bool,
}

/// A parameter that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub entry: ErrorEntry,
}

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// One or more parameters failed their own checks.
    Fields(Vec<FieldError>),
    /// Every parameter was valid on its own but the combination is not.
    Schema(String),
}

impl From<Rejection> for ErrorMap {
    fn from(rejection: Rejection) -> Self {
        let mut errors = ErrorMap::new();
        match rejection {
            Rejection::Fields(fields) => {
                for field in fields {
                    errors.push(field.entry);
                }
            }
            Rejection::Schema(message) => errors.push_schema(message),
        }
        errors
    }
}

/// Declarative description of one query parameter.
///
/// `coerce` turns the raw string into a typed value, `accept` checks it.
/// Failing either, or omitting a parameter without a default, reports
/// `code` for the field.
pub struct FieldRule<'a, T> {
    name: &'static str,
    code: ErrorCode,
    bounds: Option<(String, String)>,
    default: Option<T>,
    coerce: fn(&str) -> Option<T>,
    accept: Box<dyn Fn(&T) -> bool + 'a>,
}

impl<'a, T> FieldRule<'a, T> {
    /// A parameter that must be present.
    pub fn required(name: &'static str, code: ErrorCode, coerce: fn(&str) -> Option<T>) -> Self {
        Self {
            name,
            code,
            bounds: None,
            default: None,
            coerce,
            accept: Box::new(|_| true),
        }
    }

    /// A parameter that falls back to `default` when absent.
    pub fn optional(
        name: &'static str,
        code: ErrorCode,
        coerce: fn(&str) -> Option<T>,
        default: T,
    ) -> Self {
        Self {
            default: Some(default),
            ..Self::required(name, code, coerce)
        }
    }

    /// Add a predicate the coerced value must satisfy.
    pub fn accept(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.accept = Box::new(predicate);
        self
    }

    /// Evaluate the rule, recording a [`FieldError`] on failure.
    pub fn evaluate(self, params: &RawParams, errors: &mut Vec<FieldError>) -> Option<T> {
        let value = match params.get(self.name) {
            Some(raw) => (self.coerce)(raw).filter(|v| (self.accept)(v)),
            None => self.default,
        };

        if value.is_none() {
            let entry = match &self.bounds {
                Some((minimum, maximum)) => self.code.entry_for(self.name, minimum, maximum),
                None => self.code.entry(),
            };
            errors.push(FieldError {
                field: self.name,
                entry,
            });
        }

        value
    }
}

impl<'a, T> FieldRule<'a, T>
where
    T: PartialOrd + fmt::Display + Copy + 'a,
{
    /// Require `minimum <= value <= maximum`; the bounds also fill the
    /// error message.
    pub fn within(mut self, minimum: T, maximum: T) -> Self {
        self.bounds = Some((minimum.to_string(), maximum.to_string()));
        self.accept(move |v| minimum <= *v && *v <= maximum)
    }
}

/// Surrounding whitespace is ignored for numbers.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

fn parse_text(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

/// Only the exact strings `True` and `False` are booleans.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "True" => Some(true),
        "False" => Some(false),
        _ => None,
    }
}

/// Site ids are exactly four characters.
fn site_id_rule<'a>() -> FieldRule<'a, String> {
    FieldRule::required("site_id", ErrorCode::InvalidSiteId, parse_text)
        .accept(|id| id.chars().count() == 4)
}

/// Reject any version other than [`API_VERSION`].
pub fn check_version(version: &str) -> std::result::Result<(), ErrorEntry> {
    if version == API_VERSION {
        Ok(())
    } else {
        Err(ErrorCode::InvalidVersion.entry())
    }
}

/// Convert a unix timestamp to a `YYYYMM` string (UTC).
///
/// # Examples
///
/// ```
/// assert_eq!(ntn::validate::to_yrmonth(1472688000).unwrap(), "201609");
/// ```
pub fn to_yrmonth(timestamp: i64) -> Result<String> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y%m").to_string())
        .ok_or(NtnError::InvalidTimestamp(timestamp))
}

/// Validate `start_date`, `end_date` and `site_id`.
///
/// Dates are unix seconds in `0..=now`; on success they are returned as
/// `YYYYMM` bounds.
pub fn validate_samples_query(
    params: &RawParams,
    now: DateTime<Utc>,
) -> std::result::Result<SamplesQuery, Rejection> {
    let now = now.timestamp();
    let mut errors = Vec::new();

    let start = FieldRule::required("start_date", ErrorCode::OutOfRange, parse_integer)
        .within(0, now)
        .evaluate(params, &mut errors);
    let end = FieldRule::required("end_date", ErrorCode::OutOfRange, parse_integer)
        .within(0, now)
        .evaluate(params, &mut errors);
    let site_id = site_id_rule().evaluate(params, &mut errors);

    let (Some(start), Some(end), Some(site_id)) = (start, end, site_id) else {
        return Err(Rejection::Fields(errors));
    };

    if start > end {
        return Err(Rejection::Schema(
            "start_date must be less than or equal to end_date.".to_string(),
        ));
    }

    let yrmonth = |field: &'static str, timestamp: i64| {
        to_yrmonth(timestamp).map_err(|_| {
            Rejection::Fields(vec![FieldError {
                field,
                entry: ErrorCode::OutOfRange.entry_for(field, 0, now),
            }])
        })
    };

    Ok(SamplesQuery {
        site_id: site_id.to_uppercase(),
        start: yrmonth("start_date", start)?,
        end: yrmonth("end_date", end)?,
    })
}

/// Validate `site_id`.
pub fn validate_site_query(params: &RawParams) -> std::result::Result<SiteQuery, Rejection> {
    let mut errors = Vec::new();

    match site_id_rule().evaluate(params, &mut errors) {
        Some(site_id) => Ok(SiteQuery {
            site_id: site_id.to_uppercase(),
        }),
        None => Err(Rejection::Fields(errors)),
    }
}

/// Validate `include_inactive`, `location` and `radius`.
pub fn validate_radius_query(params: &RawParams) -> std::result::Result<RadiusQuery, Rejection> {
    let mut errors = Vec::new();

    let include_inactive =
        FieldRule::optional("include_inactive", ErrorCode::InvalidBoolean, parse_flag, true)
            .evaluate(params, &mut errors);
    let location = FieldRule::required("location", ErrorCode::InvalidLocation, Location::parse)
        .evaluate(params, &mut errors);
    let radius = FieldRule::required("radius", ErrorCode::OutOfRange, parse_float)
        .within(0.0, MAX_RADIUS_MILES)
        .evaluate(params, &mut errors);

    match (include_inactive, location, radius) {
        (Some(include_inactive), Some(location), Some(radius)) => Ok(RadiusQuery {
            location,
            radius,
            include_inactive,
        }),
        _ => Err(Rejection::Fields(errors)),
    }
}
