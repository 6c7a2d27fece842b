//! Interactive prompts with defaults.
//!
//! An empty answer (or end of input) accepts the default. Answers that fail to
//! parse or validate are reported and asked again.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Ask for a value on `output`, reading the answer from `input`.
///
/// `validate` may reject a parsed value with a message shown to the user.
///
/// # Errors
///
/// Propagates read/write failures.
pub fn prompt_value<T, R, W, V>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: T,
    validate: V,
) -> io::Result<T>
where
    T: FromStr + Display,
    R: BufRead,
    W: Write,
    V: Fn(&T) -> Result<(), String>,
{
    loop {
        write!(output, "{label} [{default}]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(default);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(default);
        }

        match answer.parse::<T>() {
            Ok(value) => match validate(&value) {
                Ok(()) => return Ok(value),
                Err(msg) => writeln!(output, "Error: {msg}")?,
            },
            Err(_) => writeln!(output, "Error: '{answer}' is not a valid value")?,
        }
    }
}
