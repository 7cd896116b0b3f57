use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fiscal_memory::{io, DecodeOptions};

#[derive(Parser, Debug)]
pub struct UnpackArgs {
    /// Dump image to decode.
    pub dump: PathBuf,
    /// Write the JSON here instead of stdout.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Refuse images with a bad slot checksum.
    #[clap(long)]
    pub strict: bool,
}

pub fn run(args: UnpackArgs) -> Result<()> {
    let options = DecodeOptions {
        verify_checksums: args.strict,
    };
    let dump = io::load_file_with(&args.dump, &options)
        .with_context(|| format!("failed to decode {}", args.dump.display()))?;

    match &args.output {
        Some(path) => {
            io::save_json(path, &dump)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(output = %path.display(), z_reports = dump.z_reports.len(), "unpacked");
        }
        None => println!("{}", dump.to_json()?),
    }
    Ok(())
}
