//! vault-buildpack - Install a pinned HashiCorp Vault into an application build.
//!
//! The build platform runs the compile step with three directories: the
//! application build directory, a cache directory that survives between
//! builds, and a directory of config var files. The installer reads
//! `VAULT_VERSION`, downloads the matching release unless it is cached,
//! copies the binary to `.vault-buildpack/vault` and appends a
//! `.profile.d/vault.sh` line that puts it on the runtime PATH.
//!
//! # Modules
//!
//! - [`cache`] - Version-keyed storage of extracted release binaries
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compile`] - The compile pipeline
//! - [`config`] - Config var reading and installer settings
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Release download and zip extraction
//! - [`install`] - Placement of the binary in the build directory
//! - [`profile`] - Runtime PATH wiring
//! - [`ui`] - Build output
//!
//! # Example
//!
//! ```
//! use vault_buildpack::config::ReleaseSource;
//!
//! let source = ReleaseSource::default();
//! assert!(source.archive_url("1.2.3").ends_with("/1.2.3/vault_1.2.3_linux_amd64.zip"));
//! ```

pub mod cache;
pub mod cli;
pub mod compile;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod profile;
pub mod ui;

pub use error::{BuildpackError, Result};
