//! Copy the first N lines of a file.

use clap::Parser;
use sevenseg::cli::{fail, parse_args, positive_count};
use sevenseg::lines::{copy_lines, LineTake};
use sevenseg::telemetry::init_tracing;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sevenseg-copy-lines",
    about = "Copy the first N lines from one file to another"
)]
struct Args {
    /// Path to the input text file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output text file
    #[arg(short, long)]
    output: PathBuf,

    /// Number of lines to copy
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
    match copy_lines(&args.input, &args.output, n) {
        Ok(LineTake::Complete) => println!(
            "Successfully copied {n} lines from '{}' to '{}'.",
            args.input.display(),
            args.output.display()
        ),
        Ok(LineTake::Truncated { available, .. }) => println!(
            "Warning: The file '{}' has fewer than {n} lines. Copied all {available} available lines.",
            args.input.display()
        ),
        Err(e) => fail(e),
    }
}
