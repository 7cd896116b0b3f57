use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fiscal_memory::layout::{Content, HEADER_REGIONS};
use fiscal_memory::records::Record;
use fiscal_memory::{io, verify_checksums, ChecksumMismatch, ZReport};
use fiscal_memory_buffers::hex_slot;

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Dump image to audit.
    pub dump: PathBuf,
    /// Also print the raw bytes of each bad slot.
    #[clap(long)]
    pub hex: bool,
}

fn slot_len(mismatch: &ChecksumMismatch) -> usize {
    HEADER_REGIONS
        .iter()
        .find(|r| r.name == mismatch.region)
        .and_then(|r| match r.content {
            Content::Table(table) => Some(table.slot_size()),
            _ => None,
        })
        .unwrap_or(ZReport::SIZE)
}

pub fn run(args: VerifyArgs) -> Result<()> {
    let bytes = io::load_image(&args.dump)
        .with_context(|| format!("failed to read {}", args.dump.display()))?;
    let mismatches = verify_checksums(&bytes)?;

    if mismatches.is_empty() {
        println!("{}: all checksums valid", args.dump.display());
        return Ok(());
    }
    for mismatch in &mismatches {
        println!("{mismatch}");
        if args.hex {
            let end = (mismatch.offset + slot_len(mismatch)).min(bytes.len());
            println!("  {}", hex_slot(mismatch.offset, &bytes[mismatch.offset..end]));
        }
    }
    bail!(
        "{}: {} checksum mismatch(es)",
        args.dump.display(),
        mismatches.len()
    )
}
