//! Release fetching.
//!
//! This module provides the HTTP fetcher and zip extraction used to turn a
//! release archive into a single executable.

pub mod archive;
pub mod http;

pub use archive::extract_entry;
pub use http::HttpFetcher;
