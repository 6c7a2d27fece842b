//! Decode network output rows into arg-max labels.
//!
//! Each input line holds 10 values; the output line flags every index equal
//! to the row maximum. Tied maxima produce multi-hot rows, which are counted
//! as ambiguous in the summary.

use clap::Parser;
use sevenseg::cli::{fail, parse_args};
use sevenseg::data::decode_outputs_file;
use sevenseg::telemetry::init_tracing;
use sevenseg::DatasetFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sevenseg-decode",
    about = "Turn 10-value network outputs into arg-max one-hot rows"
)]
struct Args {
    /// File with one 10-value output vector per line
    #[arg(short, long)]
    input: PathBuf,

    /// File the decoded rows are appended to
    #[arg(short, long)]
    output: PathBuf,

    /// Output layout
    #[arg(long, value_enum, default_value_t = DatasetFormat::Comma)]
    format: DatasetFormat,

    /// Replace the output file instead of appending to it
    #[arg(long)]
    overwrite: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();
    init_tracing(args.verbose);

    match decode_outputs_file(&args.input, &args.output, args.format, !args.overwrite) {
        Ok(summary) => {
            let verb = if args.overwrite { "wrote" } else { "appended" };
            println!(
                "Processed '{}' and {verb} results to '{}': {summary}",
                args.input.display(),
                args.output.display()
            );
            if summary.ambiguous > 0 {
                println!(
                    "Warning: {} rows had tied maxima and are not one-hot",
                    summary.ambiguous
                );
            }
        }
        Err(e) => fail(e),
    }
}
