//! # NTN - Deposition Data Access
//!
//! Core logic behind a read-only API over National Atmospheric Deposition
//! Program / National Trends Network (NTN) data:
//!
//! - **Validation**: per-endpoint parameter rules producing normalized
//!   queries or coded errors ([`validate`], [`codes`])
//! - **Geo filtering**: `(lat,lon)` parsing and geodesic radius checks ([`geo`])
//! - **Data access**: the remote site-metadata feed ([`sites`]) and the local
//!   weekly sample file ([`samples`])
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::Utc;
//! use ntn::{validate, NtnConfig, SampleStore};
//!
//! let config = NtnConfig::builder().samples_path("NTN-All-w.csv").build()?;
//! let store = SampleStore::from_config(&config);
//!
//! let params = [("site_id", "AB32"), ("start_date", "1472688000"), ("end_date", "1475193600")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let query = validate::validate_samples_query(&params, Utc::now())?;
//! let samples = store.load(&query);
//! ```
//!
//! ## Failure Model
//!
//! Invalid parameters are reported to clients as `NNxNNN` codes. Data source
//! failures are not: the `load` methods log them and return empty results.

pub mod codes;
pub mod config;
pub mod envelope;
pub mod error;
pub mod geo;
pub mod model;
pub mod samples;
pub mod sites;
pub mod validate;

// Re-export main types at crate root for convenience
pub use codes::{ErrorCode, ErrorEntry, ErrorMap};
pub use config::{NtnConfig, NtnConfigBuilder};
pub use envelope::Envelope;
pub use error::{NtnError, Result};
pub use geo::{Location, MAX_RADIUS_MILES};
pub use model::{Record, SampleMap, Site, SiteMap, SiteStatus};
pub use samples::SampleStore;
pub use sites::SiteFeed;
