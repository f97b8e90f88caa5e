//! Run configuration.
//!
//! Everything arrives through the CLI (flags or interactive prompts); nothing
//! is read from environment variables or config files.

use url::Url;

use crate::error::ConfigError;

/// Default ceiling on offline assets per library before cleanup is withheld.
///
/// Sized so that a genuinely stale handful of files gets cleaned, while a
/// library whose storage dropped out (flagging everything offline at once)
/// trips the brake.
pub const DEFAULT_OFFLINE_THRESHOLD: usize = 50;

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Normalized API base, always of the form `{scheme}://{host[:port]}/api`.
    pub api_url: String,
    pub api_key: String,
    pub offline_threshold: usize,
}

impl Config {
    pub fn new(
        api_url: &str,
        api_key: impl Into<String>,
        offline_threshold: usize,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            api_key,
            offline_threshold,
        })
    }
}

/// Reduces whatever address the user supplied to the server's API base.
///
/// Scheme, host and explicit port are kept; any path, query or trailing slash
/// is dropped and `/api` appended. `https://photos.example.net:2283/gallery`
/// becomes `https://photos.example.net:2283/api`.
pub fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw.trim()).map_err(|error| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: error.to_string(),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {scheme:?}, expected http or https"),
        });
    }

    let host = parsed.host_str().ok_or_else(|| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: "missing host".to_string(),
    })?;

    Ok(match parsed.port() {
        Some(port) => format!("{scheme}://{host}:{port}/api"),
        None => format!("{scheme}://{host}/api"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_normalize_keeps_scheme_host_and_port() {
        assert_eq!(
            normalize_api_url("https://immich.example.net:2283").unwrap(),
            "https://immich.example.net:2283/api"
        );
    }

    #[test]
    fn test_normalize_drops_path_and_trailing_slash() {
        assert_eq!(
            normalize_api_url("http://immich.local/photos/gallery?x=1").unwrap(),
            "http://immich.local/api"
        );
        assert_eq!(
            normalize_api_url("http://immich.local/").unwrap(),
            "http://immich.local/api"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_api_url("  http://immich.local:2283  ").unwrap(),
            "http://immich.local:2283/api"
        );
    }

    #[test]
    fn test_normalize_rejects_missing_scheme() {
        // Without a scheme the host would be misparsed, so this is refused
        // rather than guessed at.
        let error = normalize_api_url("immich.local:2283").unwrap_err();
        assert_matches!(error, ConfigError::InvalidApiUrl { .. });
    }

    #[test]
    fn test_normalize_rejects_non_http_scheme() {
        let error = normalize_api_url("ftp://immich.local").unwrap_err();
        assert_matches!(
            error,
            ConfigError::InvalidApiUrl { ref reason, .. } if reason.contains("ftp")
        );
    }

    #[test]
    fn test_config_rejects_blank_api_key() {
        let error = Config::new("http://immich.local", "   ", 50).unwrap_err();
        assert_matches!(error, ConfigError::MissingApiKey);
    }

    #[test]
    fn test_config_normalizes_url_on_construction() {
        let config = Config::new("http://immich.local:2283/x", "key", 25).unwrap();
        assert_eq!(config.api_url, "http://immich.local:2283/api");
        assert_eq!(config.offline_threshold, 25);
    }
}
