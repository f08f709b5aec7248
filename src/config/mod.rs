//! Configuration reading and resolution.
//!
//! This module handles:
//! - Reading config vars from the platform's env directory
//! - Resolving installer settings from options, config vars and defaults

pub mod env_dir;
pub mod settings;

pub use env_dir::EnvDir;
pub use settings::{
    InstallerSettings, ReleaseSource, DEFAULT_RELEASE_HOST, DEFAULT_TIMEOUT_SECS,
    RELEASE_HOST_VAR, VERSION_VAR,
};
