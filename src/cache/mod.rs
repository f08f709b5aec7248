//! Release caching.
//!
//! Extracted binaries are stored in the platform cache directory, one file
//! per version, so repeated builds of the same version skip the download.

pub mod store;

pub use store::{CacheStore, CachedArtifact};
