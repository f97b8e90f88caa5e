//! Wire types for the Immich HTTP API.
//!
//! Field names follow the server's camelCase JSON. Response shapes are kept
//! permissive where server versions have differed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Library kind as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryType {
    /// Backed by storage outside the server's own upload area. Only these can
    /// have assets go offline at the filesystem level.
    External,
    /// The server's own managed uploads.
    Internal,
    /// Forward compatibility with kinds this tool does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryType::External => write!(f, "external"),
            LibraryType::Internal => write!(f, "internal"),
            LibraryType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A library definition from `GET /api/libraries`.
#[derive(Debug, Clone, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub library_type: LibraryType,
}

impl Library {
    pub fn is_external(&self) -> bool {
        self.library_type == LibraryType::External
    }
}

/// One asset record from the metadata search.
///
/// Everything except `id` is optional on the wire; older servers omit fields
/// newer ones populate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub original_path: Option<String>,
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub is_offline: bool,
    #[serde(default)]
    pub library_id: Option<String>,
}

impl Asset {
    /// Best display label for where the asset lived, for log lines only.
    pub fn display_path(&self) -> &str {
        self.original_path
            .as_deref()
            .or(self.original_file_name.as_deref())
            .unwrap_or("<unknown path>")
    }
}

/// Request body for `POST /api/search/metadata`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadataRequest {
    pub size: usize,
    pub page: usize,
    pub with_stacked: bool,
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPage {
    pub items: Vec<Asset>,
    /// Present on the wire but not trusted for pagination: servers have been
    /// observed returning a next page marker on the final page. Short pages
    /// decide when fetching stops.
    #[serde(default)]
    pub next_page: Option<serde_json::Value>,
}

/// Response envelope for the metadata search. Current servers nest the page
/// under an `assets` object; some versions returned a bare asset array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SearchMetadataResponse {
    Paged { assets: AssetPage },
    Flat(Vec<Asset>),
}

impl SearchMetadataResponse {
    pub fn into_assets(self) -> Vec<Asset> {
        match self {
            SearchMetadataResponse::Paged { assets } => assets.items,
            SearchMetadataResponse::Flat(assets) => assets,
        }
    }
}
