//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::compile::CompileDirs;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{BuildpackError, Result};

/// Number of positional arguments in the compile contract.
pub const EXPECTED_ARGS: usize = 3;

/// Install a pinned HashiCorp Vault binary into an application build.
#[derive(Debug, Parser)]
#[command(name = "vault-buildpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application build directory
    pub build_dir: PathBuf,

    /// Cache directory persisted between builds
    pub cache_dir: PathBuf,

    /// Directory containing one file per config var
    pub env_dir: PathBuf,

    /// Unexpected extra positional arguments
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,

    /// Base URL of the Vault release archives
    #[arg(long, env = "VAULT_BUILDPACK_RELEASE_HOST")]
    pub release_host: Option<String>,

    /// Download timeout in seconds
    #[arg(long, env = "VAULT_BUILDPACK_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Total number of positional arguments received.
    pub fn positional_count(&self) -> usize {
        EXPECTED_ARGS + self.extra.len()
    }

    /// Reject invocations with more positional arguments than the contract.
    pub fn check_protocol(&self) -> Result<()> {
        if self.extra.is_empty() {
            Ok(())
        } else {
            Err(BuildpackError::ArgumentProtocolViolation {
                count: self.positional_count(),
            })
        }
    }

    /// The three platform directories.
    pub fn dirs(&self) -> CompileDirs {
        CompileDirs {
            build: self.build_dir.clone(),
            cache: self.cache_dir.clone(),
            env: self.env_dir.clone(),
        }
    }
}
