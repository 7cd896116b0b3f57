//! # fmtool
//!
//! Command implementations for the `fmtool` binary. Each subcommand lives in
//! its own module under [`commands`] with a clap `Args` struct and a `run`
//! function, so the binary is only argument parsing and dispatch.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Installs the global `tracing` subscriber on stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// with `verbose`.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
