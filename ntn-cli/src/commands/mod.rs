pub mod nearby;
pub mod samples;
pub mod site;

use anyhow::{bail, Context, Result};
use ntn::{validate::RawParams, Envelope, NtnConfig};
use std::path::PathBuf;

/// Build the configuration from command-line flags.
///
/// Flags already fall back to their `NTN_*` environment variables, so
/// anything still unset takes the library default.
pub fn build_config(
    samples_path: Option<PathBuf>,
    sites_url: Option<String>,
    timeout: Option<u64>,
) -> Result<NtnConfig> {
    let mut builder = NtnConfig::builder();

    if let Some(path) = samples_path {
        builder = builder.samples_path(path);
    }
    if let Some(url) = sites_url {
        builder = builder.sites_url(url);
    }
    if let Some(secs) = timeout {
        builder = builder.feed_timeout_secs(secs);
    }

    builder.build().context("Invalid configuration")
}

/// Collect flag values into the same shape as a query string.
pub fn params<'a>(pairs: impl IntoIterator<Item = (&'a str, Option<String>)>) -> RawParams {
    pairs
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

/// Print the envelope, failing if it carries errors.
pub fn emit(envelope: &Envelope) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);

    if !envelope.is_success() {
        let codes: Vec<_> = envelope.errors.iter().map(|(code, _)| code).collect();
        bail!("Request rejected: {}", codes.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntn::ErrorCode;

    #[test]
    fn test_params_skips_unset_flags() {
        let params = params([
            ("location", Some("(42.4944,-108.8320)".to_string())),
            ("include_inactive", None),
        ]);
        assert_eq!(params.len(), 1);
        assert_eq!(params["location"], "(42.4944,-108.8320)");
    }

    #[test]
    fn test_build_config_overrides() {
        let config = build_config(
            Some(PathBuf::from("/tmp/samples.csv")),
            Some("http://localhost/sites".to_string()),
            Some(5),
        )
        .unwrap();
        assert_eq!(config.samples_path(), PathBuf::from("/tmp/samples.csv"));
        assert_eq!(config.sites_url(), "http://localhost/sites");
        assert_eq!(config.feed_timeout().as_secs(), 5);

        assert!(build_config(None, None, Some(0)).is_err());
    }

    #[test]
    fn test_emit_fails_on_rejection() {
        let err = emit(&Envelope::failure(ErrorCode::InvalidSiteId)).unwrap_err();
        assert!(err.to_string().contains("01x004"));
    }
}
