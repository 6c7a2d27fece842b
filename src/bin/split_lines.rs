//! Split a file into its first N lines and the remainder.

use clap::Parser;
use sevenseg::cli::{fail, parse_args, positive_count};
use sevenseg::lines::{split_lines, LineTake};
use sevenseg::telemetry::init_tracing;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sevenseg-split-lines",
    about = "Split a file into two files: the first N lines and the remaining lines"
)]
struct Args {
    /// Path to the input text file
    #[arg(short, long)]
    input: PathBuf,

    /// File receiving the first N lines
    #[arg(long)]
    output1: PathBuf,

    /// File receiving the remaining lines
    #[arg(long)]
    output2: PathBuf,

    /// Number of lines to move to the first file
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    lines: i64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();
    init_tracing(args.verbose);

    let n = positive_count(args.lines, "Number of lines").unwrap_or_else(|msg| fail(msg));
    match split_lines(&args.input, &args.output1, &args.output2, n) {
        Ok(outcome) => match outcome.head {
            LineTake::Complete => println!(
                "Successfully split '{}' into '{}' (first {n} lines) and '{}' ({} remaining lines).",
                args.input.display(),
                args.output1.display(),
                args.output2.display(),
                outcome.rest
            ),
            LineTake::Truncated { .. } => println!(
                "Warning: The file '{}' has fewer than {n} lines. All available lines were written to '{}'.",
                args.input.display(),
                args.output1.display()
            ),
        },
        Err(e) => fail(e),
    }
}
