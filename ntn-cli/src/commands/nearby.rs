use anyhow::{Context, Result};
use ntn::{
    sites::select_within_radius, validate::validate_radius_query, Envelope, NtnConfig, SiteFeed,
};

use super::{emit, params};

pub async fn run(
    config: NtnConfig,
    location: String,
    radius: String,
    include_inactive: Option<String>,
) -> Result<()> {
    let params = params([
        ("location", Some(location)),
        ("radius", Some(radius)),
        ("include_inactive", include_inactive),
    ]);

    let query = match validate_radius_query(&params) {
        Ok(query) => query,
        Err(rejection) => return emit(&Envelope::failure(rejection)),
    };

    let feed = SiteFeed::new(&config).context("Failed to create site feed client")?;
    let sites = feed
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch site feed from {}", feed.url()))?;

    emit(&Envelope::success(&select_within_radius(sites, &query)))
}
