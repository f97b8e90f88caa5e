//! Error taxonomy for custodian runs.
//!
//! Each top-level variant maps to a distinct process exit code so that
//! schedulers and wrapper scripts can tell a misconfiguration from a fetch
//! failure from a partially failed cleanup.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors resolving run configuration.
///
/// All of these are fatal before any network activity happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key on the command line and none entered at the prompt.
    #[error("an API key is required (pass --api-key or enter one at the prompt)")]
    MissingApiKey,

    /// No server address on the command line and none entered at the prompt.
    #[error("a server address is required (pass --api-url or enter one at the prompt)")]
    MissingApiUrl,

    /// The supplied server address could not be reduced to a usable API base.
    #[error("invalid server address {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Errors from a single Immich API call.
#[derive(Debug, Error)]
pub enum ImmichError {
    /// Transport-level failure with the retry budget exhausted. Covers both
    /// connection failures and decode failures on the response body.
    #[error("{operation}: transport failure: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status. Never retried; the
    /// status and body are carried for the operator to diagnose.
    #[error("{operation}: server responded {status}: {body}")]
    Api {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// Errors that abort a sweep run outright.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Inventory fetching failed. Acting on a partial inventory could make a
    /// truncated snapshot look safely below threshold, so the run stops
    /// before any removal call is issued.
    #[error("inventory fetch aborted: {0}")]
    Fetch(#[from] ImmichError),
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum CustodianError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// The run completed but at least one library's removal call failed.
    #[error("removal failed for {failed} of {attempted} eligible libraries")]
    Cleanup { failed: usize, attempted: usize },
}

impl CustodianError {
    /// Process exit code: 1 configuration, 2 fetch failure, 3 cleanup failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CustodianError::Config(_) => 1,
            CustodianError::Sweep(_) => 2,
            CustodianError::Cleanup { .. } => 3,
        }
    }
}
