use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fiscal_memory::io;

#[derive(Parser, Debug)]
pub struct PackArgs {
    /// JSON dump produced by `unpack` (possibly edited).
    pub json: PathBuf,
    /// Image file to write.
    #[clap(short, long)]
    pub output: PathBuf,
    /// Drop the test-mode log before encoding.
    #[clap(long)]
    pub clear_test_records: bool,
}

pub fn run(args: PackArgs) -> Result<()> {
    let mut dump = io::load_json(&args.json)
        .with_context(|| format!("failed to read {}", args.json.display()))?;
    if args.clear_test_records {
        tracing::info!(cleared = dump.test_records.len(), "clearing test-mode log");
        dump.clear_test_records();
    }
    let written = io::save_file(&args.output, &dump)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("wrote {} bytes to {}", written, args.output.display());
    Ok(())
}
