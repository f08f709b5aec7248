//! Command-line interface for the buildpack.
//!
//! The build platform invokes the binary with the build, cache and env
//! directories as positional arguments.

pub mod args;

pub use args::{Cli, EXPECTED_ARGS};
