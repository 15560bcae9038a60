//! Remote site-metadata feed.
//!
//! The feed is a delimited document with a header row and one row per
//! site. It is fetched fresh for every request; nothing is cached.
//!
//! [`SiteFeed::fetch`] reports failures, [`SiteFeed::load`] logs them and
//! degrades to an empty mapping, which is what the API exposes.

use reqwest::{Client, StatusCode};

use crate::config::NtnConfig;
use crate::error::{NtnError, Result};
use crate::geo::point_within_radius;
use crate::model::{to_record, Site, SiteMap, SiteStatus};
use crate::validate::RadiusQuery;

/// Header of the column holding the site id.
pub const SITE_ID_COLUMN: &str = "siteid";

/// Parse a delimited site feed into a mapping keyed by site id.
///
/// The id column is removed from each record. Short rows keep their
/// missing columns as empty strings; a row without an id is skipped.
pub fn parse_site_feed(body: &str) -> Result<SiteMap> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();

    if !headers.iter().any(|h| h == SITE_ID_COLUMN) {
        return Err(NtnError::MissingColumn {
            column: SITE_ID_COLUMN.to_string(),
        });
    }

    let mut sites = SiteMap::new();
    for row in reader.records() {
        let row = row?;
        let mut record = to_record(&headers, &row);
        match record.remove(SITE_ID_COLUMN) {
            Some(id) if !id.is_empty() => {
                sites.insert(id, Site::new(record));
            }
            _ => {
                tracing::warn!(
                    line = row.position().map_or(0, |p| p.line()),
                    "Skipping site row without an id"
                );
            }
        }
    }

    Ok(sites)
}

/// Keep the sites that answer a radius query.
///
/// Active sites within the radius are always kept; inactive ones only when
/// the query asks for them. Sites without usable coordinates are skipped.
pub fn select_within_radius(sites: SiteMap, query: &RadiusQuery) -> SiteMap {
    sites
        .into_iter()
        .filter(|(id, site)| {
            let wanted = match site.status() {
                SiteStatus::Active => true,
                SiteStatus::Inactive => query.include_inactive,
                SiteStatus::Unknown => false,
            };
            if !wanted {
                return false;
            }

            match site.location() {
                Some(location) => point_within_radius(query.location, location, query.radius),
                None => {
                    tracing::warn!(site_id = %id, "Skipping site without valid coordinates");
                    false
                }
            }
        })
        .collect()
}

/// Client for the remote site feed.
#[derive(Debug, Clone)]
pub struct SiteFeed {
    client: Client,
    url: String,
}

impl SiteFeed {
    /// Create a feed client using the configured URL and timeout.
    pub fn new(config: &NtnConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.feed_timeout()).build()?;

        Ok(Self {
            client,
            url: config.sites_url().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the feed.
    ///
    /// # Errors
    ///
    /// Network failures, any status other than `200 OK`, and bodies that do
    /// not parse as a site feed.
    pub async fn fetch(&self) -> Result<SiteMap> {
        let response = self.client.get(&self.url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(NtnError::FeedStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        parse_site_feed(&body)
    }

    /// Fetch the feed, logging any failure and returning an empty mapping
    /// in its place.
    pub async fn load(&self) -> SiteMap {
        match self.fetch().await {
            Ok(sites) => {
                tracing::debug!(url = %self.url, sites = sites.len(), "Site feed loaded");
                sites
            }
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Site feed unavailable");
                SiteMap::new()
            }
        }
    }
}
