//! One-way dataset sync with a file hosted in a GitHub repository.
//!
//! The remote file is a replica, not a source of truth: `publish` replaces
//! it wholesale with the current snapshot, `load` reads it back through the
//! public raw endpoint with a local-store/defaults fallback chain.

mod client;
mod error;
mod loader;

pub use client::RemoteSyncClient;
pub use error::SyncError;
pub use loader::{resolve_dataset, DatasetSource};
