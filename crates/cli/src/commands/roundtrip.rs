use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fiscal_memory::{decode, encode, io};

#[derive(Parser, Debug)]
pub struct RoundtripArgs {
    /// Dump image to decode and re-encode.
    pub dump: PathBuf,
    /// Keep the re-encoded image here.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// Offset of the first differing byte, or the shorter length when one image
/// is a prefix of the other.
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

pub fn run(args: RoundtripArgs) -> Result<()> {
    let original = io::load_image(&args.dump)
        .with_context(|| format!("failed to read {}", args.dump.display()))?;
    let rebuilt = encode(&decode(&original)?);

    if let Some(path) = &args.output {
        std::fs::write(path, &rebuilt)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match first_difference(&original, &rebuilt) {
        None => {
            println!("{}: identical ({} bytes)", args.dump.display(), original.len());
            Ok(())
        }
        Some(offset) => bail!(
            "{}: re-encoded image differs at {:#06x} ({} bytes in, {} bytes out)",
            args.dump.display(),
            offset,
            original.len(),
            rebuilt.len()
        ),
    }
}
