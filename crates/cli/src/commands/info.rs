use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fiscal_memory::datetime::format_iso;
use fiscal_memory::layout::z_report_slots;
use fiscal_memory::{decode, io};

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Dump image to summarise.
    pub dump: PathBuf,
    /// Print the summary as JSON.
    #[clap(long)]
    pub json: bool,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let bytes = io::load_image(&args.dump)
        .with_context(|| format!("failed to read {}", args.dump.display()))?;
    let dump = decode(&bytes)?;
    let summary = dump.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("file:          {}", args.dump.display());
    println!(
        "size:          {} bytes ({} Z-report slots)",
        bytes.len(),
        z_report_slots(bytes.len())
    );
    println!("id:            {}", dump.meta.id_string);
    match &dump.serial_record {
        Some(serial) => println!(
            "serial:        {} (country {})",
            serial.serial_number, serial.country_number
        ),
        None => println!("serial:        -"),
    }
    println!("fm numbers:    {}", summary.fm_numbers);
    println!("vat rates:     {}", summary.vat_rates);
    println!("ram resets:    {}", summary.ram_resets);
    println!("tax records:   {}", summary.tax_records);
    println!("test records:  {}", summary.test_records);
    println!("z-reports:     {}", summary.z_reports);
    if let (Some(first), Some(last)) = (summary.first_z_number, summary.last_z_number) {
        println!(
            "  range:       #{} {} .. #{} {}",
            first,
            summary.first_z_date.as_ref().map(format_iso).unwrap_or_default(),
            last,
            summary.last_z_date.as_ref().map(format_iso).unwrap_or_default()
        );
    }
    Ok(())
}
