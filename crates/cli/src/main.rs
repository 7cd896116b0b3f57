#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! `fmtool`: unpack, repack and audit fiscal memory dumps.

use anyhow::Result;
use clap::{Parser, Subcommand};
use fiscal_memory_cli::commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "fmtool",
    version,
    about = "Fiscal memory dump tool.",
    long_about = "Decodes fiscal cash-register memory images to JSON, rebuilds images from JSON, and audits slot checksums."
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a dump image to pretty-printed JSON.
    Unpack(unpack::UnpackArgs),

    /// Encode a JSON dump back into an image.
    Pack(pack::PackArgs),

    /// Check every populated slot's checksum. Exits non-zero on mismatch.
    Verify(verify::VerifyArgs),

    /// Print table counts and the Z-report range.
    Info(info::InfoArgs),

    /// Decode and re-encode an image and compare the bytes.
    Roundtrip(roundtrip::RoundtripArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    fiscal_memory_cli::init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Unpack(args) => unpack::run(args),
        Commands::Pack(args) => pack::run(args),
        Commands::Verify(args) => verify::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Roundtrip(args) => roundtrip::run(args),
    }
}
