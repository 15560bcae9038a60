use anyhow::{Context, Result};
use ntn::{validate::validate_site_query, Envelope, ErrorCode, NtnConfig, SiteFeed};

use super::{emit, params};

pub async fn run(config: NtnConfig, site_id: String) -> Result<()> {
    let query = match validate_site_query(&params([("site_id", Some(site_id))])) {
        Ok(query) => query,
        Err(rejection) => return emit(&Envelope::failure(rejection)),
    };

    let feed = SiteFeed::new(&config).context("Failed to create site feed client")?;
    let mut sites = feed
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch site feed from {}", feed.url()))?;

    let envelope = match sites.remove(&query.site_id) {
        Some(site) => Envelope::success(&site),
        None => Envelope::failure(ErrorCode::InvalidSiteId),
    };

    emit(&envelope)
}
