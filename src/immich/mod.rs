//! Immich HTTP API client.
//!
//! Covers the three endpoints a cleanup run needs: listing libraries, paging
//! through the asset inventory, and triggering offline-asset removal for one
//! library. Authentication is a per-request `x-api-key` header.
//!
//! Connection failures are retried with exponential backoff; HTTP error
//! statuses are never retried, since a server that answered has already made
//! up its mind.

pub mod types;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info};

use crate::error::ImmichError;
use crate::retry::{RetryConfig, retry_connect};
use types::{Asset, Library, SearchMetadataRequest, SearchMetadataResponse};

/// Assets requested per search page.
pub const PAGE_SIZE: usize = 1000;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one Immich server.
pub struct ImmichClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry_config: RetryConfig,
}

impl ImmichClient {
    /// Creates a client for the given API base, e.g. `https://host:2283/api`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            retry_config: RetryConfig::default(),
        }
    }

    /// Replaces the retry policy. Mostly useful for tests that want short
    /// backoff delays.
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    fn authenticated(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
    }

    /// Sends a request, retrying connection failures, and rejects non-success
    /// statuses. `build` is called once per attempt to get a fresh request.
    async fn execute<F>(&self, build: F, operation: &'static str) -> Result<Response, ImmichError>
    where
        F: Fn() -> RequestBuilder,
    {
        let response = retry_connect(|| async { build().send().await }, &self.retry_config, operation)
            .await
            .map_err(|source| ImmichError::Transport { operation, source })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ImmichError::Api {
            operation,
            status,
            body,
        })
    }

    /// Lists every library defined on the server.
    pub async fn fetch_libraries(&self) -> Result<Vec<Library>, ImmichError> {
        let operation = "fetch_libraries";
        let url = format!("{}/libraries", self.base_url);

        info!("Fetching libraries");

        let libraries: Vec<Library> = self
            .execute(|| self.authenticated(self.client.get(&url)), operation)
            .await?
            .json()
            .await
            .map_err(|source| ImmichError::Transport { operation, source })?;

        debug!(count = libraries.len(), "Library list fetched");
        Ok(libraries)
    }

    /// Pages through the full asset inventory.
    ///
    /// Fetching stops when a page comes back shorter than the requested size.
    /// The server's own next page marker is ignored; it has been unreliable
    /// across versions. A failure on any page discards the partial inventory
    /// and surfaces the error, so a caller never acts on a truncated
    /// snapshot.
    pub async fn fetch_assets(&self) -> Result<Vec<Asset>, ImmichError> {
        self.fetch_assets_paged(PAGE_SIZE).await
    }

    async fn fetch_assets_paged(&self, page_size: usize) -> Result<Vec<Asset>, ImmichError> {
        let operation = "search_assets";
        let url = format!("{}/search/metadata", self.base_url);
        let page_size = page_size.max(1);

        info!("Fetching asset inventory");

        let mut assets = Vec::new();
        let mut page = 1usize;

        loop {
            let request = SearchMetadataRequest {
                size: page_size,
                page,
                with_stacked: true,
            };

            let body: SearchMetadataResponse = self
                .execute(
                    || self.authenticated(self.client.post(&url)).json(&request),
                    operation,
                )
                .await?
                .json()
                .await
                .map_err(|source| ImmichError::Transport { operation, source })?;

            let page_assets = body.into_assets();
            let fetched = page_assets.len();
            debug!(page, fetched, "Asset page fetched");
            assets.extend(page_assets);

            if fetched < page_size {
                break;
            }
            page += 1;
        }

        info!(count = assets.len(), "Asset inventory fetched");
        Ok(assets)
    }

    /// Asks the server to delete every offline asset record in one library.
    pub async fn remove_offline_assets(&self, library_id: &str) -> Result<(), ImmichError> {
        let operation = "remove_offline_assets";
        let url = format!("{}/libraries/{}/removeOffline", self.base_url, library_id);

        let response = self
            .execute(|| self.authenticated(self.client.post(&url)), operation)
            .await?;

        debug!(library_id, status = %response.status(), "Removal accepted");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
