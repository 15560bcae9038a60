use anyhow::{Context, Result};
use chrono::Utc;
use ntn::{validate::validate_samples_query, Envelope, NtnConfig, SampleStore};

use super::{emit, params};

pub async fn run(
    config: NtnConfig,
    site_id: String,
    start_date: String,
    end_date: String,
) -> Result<()> {
    let params = params([
        ("site_id", Some(site_id)),
        ("start_date", Some(start_date)),
        ("end_date", Some(end_date)),
    ]);

    let query = match validate_samples_query(&params, Utc::now()) {
        Ok(query) => query,
        Err(rejection) => return emit(&Envelope::failure(rejection)),
    };

    let store = SampleStore::from_config(&config);
    let samples = tokio::task::spawn_blocking(move || store.scan(&query))
        .await
        .context("Sample scan task failed")?
        .with_context(|| format!("Failed to read {}", config.samples_path().display()))?;

    emit(&Envelope::success(&samples))
}
