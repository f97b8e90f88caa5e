//! Offline-asset cleanup client for Immich.
//!
//! Immich marks an asset "offline" when the file behind it disappears from an
//! external library's storage. This crate fetches the full library and asset
//! inventory, groups offline assets per external library, and asks the server
//! to drop their records, unless a library has so many offline assets at once
//! that the storage itself probably went away, in which case that library is
//! left alone.

pub mod cli;
pub mod config;
pub mod error;
pub mod immich;
pub mod retry;
pub mod sweep;

pub use config::Config;
pub use error::CustodianError;
pub use immich::ImmichClient;
