//! Command-line interface and credential resolution.
//!
//! Flags cover everything; whatever is missing is asked for interactively,
//! but only when stdin is a terminal so scheduled runs fail fast instead of
//! hanging on a prompt.

use std::io::{self, IsTerminal, Write};

use clap::Parser;

use crate::config::{Config, DEFAULT_OFFLINE_THRESHOLD};
use crate::error::ConfigError;

/// Removes offline asset records from Immich external libraries, unless too
/// many assets are offline at once for removal to be safe.
#[derive(Debug, Parser)]
#[command(name = "immich-custodian", version, about)]
pub struct Cli {
    /// Immich admin API key. Prompted for when omitted.
    #[arg(long, alias = "api_key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Full Immich address including protocol and port,
    /// e.g. https://immich.example.net:2283. Prompted for when omitted.
    #[arg(long, alias = "api_url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Offline assets per library at or above which cleanup is skipped.
    #[arg(
        long,
        alias = "offline_threshold",
        value_name = "COUNT",
        default_value_t = DEFAULT_OFFLINE_THRESHOLD
    )]
    pub offline_threshold: usize,
}

impl Cli {
    /// Resolves the run configuration, prompting for missing credentials.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        self.into_config_with(prompt_line)
    }

    fn into_config_with<P>(self, prompt: P) -> Result<Config, ConfigError>
    where
        P: Fn(&str) -> Option<String>,
    {
        let api_key = non_blank(self.api_key)
            .or_else(|| prompt("Enter the Immich API key: "))
            .ok_or(ConfigError::MissingApiKey)?;

        let api_url = non_blank(self.api_url)
            .or_else(|| {
                prompt("Enter the full web address for Immich, including protocol and port: ")
            })
            .ok_or(ConfigError::MissingApiUrl)?;

        Config::new(&api_url, api_key, self.offline_threshold)
    }
}

/// Blank flag values count as absent, so they fall through to the prompt.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn prompt_line(prompt: &str) -> Option<String> {
    if !io::stdin().is_terminal() {
        return None;
    }

    print!("{prompt}");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).ok()?;

    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn no_prompt(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_kebab_case_flags_parse() {
        let cli = Cli::try_parse_from([
            "immich-custodian",
            "--api-key",
            "k",
            "--api-url",
            "http://immich.local:2283",
            "--offline-threshold",
            "10",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.offline_threshold, 10);
    }

    #[test]
    fn test_snake_case_aliases_parse() {
        let cli = Cli::try_parse_from([
            "immich-custodian",
            "--api_key",
            "k",
            "--api_url",
            "http://immich.local",
            "--offline_threshold",
            "75",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://immich.local"));
        assert_eq!(cli.offline_threshold, 75);
    }

    #[test]
    fn test_threshold_defaults_when_omitted() {
        let cli = Cli::try_parse_from(["immich-custodian"]).unwrap();
        assert_eq!(cli.offline_threshold, DEFAULT_OFFLINE_THRESHOLD);
    }

    #[test]
    fn test_missing_api_key_without_prompt_answer_fails() {
        let cli = Cli::try_parse_from(["immich-custodian"]).unwrap();
        let error = cli.into_config_with(no_prompt).unwrap_err();
        assert_matches!(error, ConfigError::MissingApiKey);
    }

    #[test]
    fn test_blank_flag_falls_through_to_prompt() {
        let cli = Cli::try_parse_from([
            "immich-custodian",
            "--api-key",
            "   ",
            "--api-url",
            "http://immich.local",
        ])
        .unwrap();

        let config = cli
            .into_config_with(|prompt| {
                assert!(prompt.contains("API key"));
                Some("prompted-key".to_string())
            })
            .unwrap();

        assert_eq!(config.api_key, "prompted-key");
        assert_eq!(config.api_url, "http://immich.local/api");
    }

    #[test]
    fn test_missing_url_after_key_resolves_fails_with_url_error() {
        let cli = Cli::try_parse_from(["immich-custodian", "--api-key", "k"]).unwrap();
        let error = cli.into_config_with(no_prompt).unwrap_err();
        assert_matches!(error, ConfigError::MissingApiUrl);
    }

    #[test]
    fn test_flags_resolve_without_prompting() {
        let cli = Cli::try_parse_from([
            "immich-custodian",
            "--api-key",
            "k",
            "--api-url",
            "https://immich.example.net:2283/extra",
        ])
        .unwrap();

        let config = cli
            .into_config_with(|prompt| panic!("unexpected prompt: {prompt}"))
            .unwrap();

        assert_eq!(config.api_url, "https://immich.example.net:2283/api");
        assert_eq!(config.offline_threshold, DEFAULT_OFFLINE_THRESHOLD);
    }
}
