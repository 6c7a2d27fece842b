//! Convert 7-segment pattern rows into one-hot digit rows.
//!
//! Rows that do not match any digit are reported and skipped; the run
//! continues and prints a summary at the end.

use clap::Parser;
use sevenseg::cli::{fail, parse_args};
use sevenseg::data::convert_patterns_file;
use sevenseg::telemetry::init_tracing;
use sevenseg::DatasetFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sevenseg-convert",
    about = "Convert 7-segment LED patterns to one-hot digit representations"
)]
struct Args {
    /// Input file with one 7-segment pattern per line
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for the one-hot digit rows
    #[arg(short, long)]
    output: PathBuf,

    /// Output layout
    #[arg(long, value_enum, default_value_t = DatasetFormat::Comma)]
    format: DatasetFormat,

    /// Treat values >= THRESHOLD as lit instead of requiring exact 0/1 bits
    #[arg(long)]
    threshold: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();
    init_tracing(args.verbose);

    match convert_patterns_file(&args.input, &args.output, args.format, args.threshold) {
        Ok(summary) => {
            println!(
                "Converted '{}' into '{}': {summary}",
                args.input.display(),
                args.output.display()
            );
        }
        Err(e) => fail(e),
    }
}
