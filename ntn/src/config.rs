//! Process-wide configuration.
//!
//! Built once at startup and handed to the data fetchers explicitly.
//!
//! ```ignore
//! use ntn::NtnConfig;
//!
//! let config = NtnConfig::builder()
//!     .samples_path("/data/NTN-All-w.csv")
//!     .feed_timeout_secs(10)
//!     .build()?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{NtnError, Result};

/// Default remote site-metadata feed.
pub const DEFAULT_SITES_URL: &str = "http://nadp.slh.wisc.edu/data/sites/CSV/?net=NTN";

/// Default location of the weekly sample file.
pub const DEFAULT_SAMPLES_PATH: &str = "NTN-All-w.csv";

/// Default timeout for the site feed request in seconds.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Immutable service configuration.
#[derive(Debug, Clone)]
pub struct NtnConfig {
    sites_url: String,
    samples_path: PathBuf,
    feed_timeout: Duration,
}

impl NtnConfig {
    pub fn builder() -> NtnConfigBuilder {
        NtnConfigBuilder::new()
    }

    /// URL of the delimited site-metadata feed.
    pub fn sites_url(&self) -> &str {
        &self.sites_url
    }

    /// Path of the delimited weekly sample file.
    pub fn samples_path(&self) -> &Path {
        &self.samples_path
    }

    /// Timeout applied to each site feed request.
    pub fn feed_timeout(&self) -> Duration {
        self.feed_timeout
    }
}

impl Default for NtnConfig {
    fn default() -> Self {
        Self {
            sites_url: DEFAULT_SITES_URL.to_string(),
            samples_path: PathBuf::from(DEFAULT_SAMPLES_PATH),
            feed_timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
        }
    }
}

/// Builder for [`NtnConfig`].
#[derive(Debug, Clone)]
pub struct NtnConfigBuilder {
    sites_url: String,
    samples_path: PathBuf,
    feed_timeout_secs: u64,
}

impl Default for NtnConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NtnConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self {
            sites_url: DEFAULT_SITES_URL.to_string(),
            samples_path: PathBuf::from(DEFAULT_SAMPLES_PATH),
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `NTN_SITES_URL` | Remote site-metadata feed | [`DEFAULT_SITES_URL`] |
    /// | `NTN_SAMPLES_PATH` | Weekly sample file | `NTN-All-w.csv` |
    /// | `NTN_FEED_TIMEOUT_SECS` | Site feed timeout | 30 |
    ///
    /// Unset variables keep their defaults; an unparseable timeout is
    /// ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::new();

        if let Some(url) = lookup("NTN_SITES_URL") {
            builder = builder.sites_url(url);
        }

        if let Some(path) = lookup("NTN_SAMPLES_PATH") {
            builder = builder.samples_path(path);
        }

        if let Some(raw) = lookup("NTN_FEED_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => builder = builder.feed_timeout_secs(secs),
                Err(_) => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_FEED_TIMEOUT_SECS,
                    "Ignoring invalid NTN_FEED_TIMEOUT_SECS"
                ),
            }
        }

        builder
    }

    pub fn sites_url(mut self, url: impl Into<String>) -> Self {
        self.sites_url = url.into();
        self
    }

    pub fn samples_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.samples_path = path.as_ref().to_path_buf();
        self
    }

    pub fn feed_timeout_secs(mut self, secs: u64) -> Self {
        self.feed_timeout_secs = secs;
        self
    }

    /// Build the [`NtnConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the feed URL is empty or the timeout is zero.
    pub fn build(self) -> Result<NtnConfig> {
        if self.sites_url.trim().is_empty() {
            return Err(NtnError::Config("sites URL must not be empty".to_string()));
        }
        if self.feed_timeout_secs == 0 {
            return Err(NtnError::Config(
                "feed timeout must be at least one second".to_string(),
            ));
        }

        Ok(NtnConfig {
            sites_url: self.sites_url,
            samples_path: self.samples_path,
            feed_timeout: Duration::from_secs(self.feed_timeout_secs),
        })
    }
}
