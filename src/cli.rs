//! Argument parsing helpers for the binaries.
//!
//! Usage errors go to stdout and exit with status 1; `--help` and `--version`
//! keep clap's normal behavior.

use clap::Parser;
use std::fmt::Display;
use std::process;

/// Parse command-line arguments, reporting usage errors on stdout.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            println!("{e}");
            process::exit(1);
        }
        Err(e) => e.exit(),
    }
}

/// Print `Error: {msg}` on stdout and exit with status 1.
pub fn fail(msg: impl Display) -> ! {
    println!("Error: {msg}");
    process::exit(1);
}

/// Convert a signed count from the command line into a positive `usize`.
///
/// # Errors
///
/// Returns a message naming `what` if `value <= 0`.
pub fn positive_count(value: i64, what: &str) -> Result<usize, String> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| format!("{what} must be a positive integer, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_count() {
        assert_eq!(positive_count(5, "Dataset size"), Ok(5));
        assert!(positive_count(0, "Dataset size").is_err());
        let err = positive_count(-3, "Line count").unwrap_err();
        assert_eq!(err, "Line count must be a positive integer, got -3");
    }
}
