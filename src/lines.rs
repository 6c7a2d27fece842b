//! Line-oriented copy and split helpers.
//!
//! Reading fewer lines than requested is not an error: the available lines
//! are used and the shortfall is reported as [`LineTake::Truncated`]. Lines
//! are handled as raw bytes, so any text encoding is copied unchanged.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::core::{DatasetError, DatasetResult};
use crate::data::reader::open_input;

/// Outcome of taking a fixed number of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTake {
    /// All requested lines were available.
    Complete,
    /// The source ended early.
    Truncated { requested: usize, available: usize },
}

/// Lines read from a source, terminators included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakenLines {
    pub lines: Vec<Vec<u8>>,
    pub outcome: LineTake,
}

/// Read up to `n` lines from `reader`, keeping their line terminators.
///
/// # Errors
///
/// Propagates read failures.
pub fn take_lines<R: BufRead>(reader: &mut R, n: usize) -> io::Result<TakenLines> {
    let mut lines = Vec::with_capacity(n);
    while lines.len() < n {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        lines.push(line);
    }
    let outcome = if lines.len() < n {
        LineTake::Truncated {
            requested: n,
            available: lines.len(),
        }
    } else {
        LineTake::Complete
    };
    Ok(TakenLines { lines, outcome })
}

/// Result of [`split_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    /// How the first part was filled.
    pub head: LineTake,
    /// Lines written to the second file.
    pub rest: usize,
}

/// Copy the first `n` lines of `input` into `output`.
///
/// # Errors
///
/// - [`DatasetError::InvalidArgument`] if `n == 0`
/// - [`DatasetError::MissingFile`] if `input` does not exist
/// - I/O errors, which abort the copy
pub fn copy_lines(input: &Path, output: &Path, n: usize) -> DatasetResult<LineTake> {
    check_count(n)?;
    let mut reader = open_input(input)?;
    let taken = take_lines(&mut reader, n)?;
    write_lines(output, &taken.lines)?;

    match taken.outcome {
        LineTake::Complete => {
            info!(lines = n, input = %input.display(), output = %output.display(), "lines copied");
        }
        LineTake::Truncated { available, .. } => warn!(
            requested = n,
            available,
            input = %input.display(),
            "input has fewer lines than requested, copied all available lines"
        ),
    }
    Ok(taken.outcome)
}

/// Write the first `n` lines of `input` to `first` and the remainder to `rest`.
///
/// If the input has fewer than `n` lines, all of them go to `first` and
/// `rest` is created empty.
///
/// # Errors
///
/// - [`DatasetError::InvalidArgument`] if `n == 0`
/// - [`DatasetError::MissingFile`] if `input` does not exist
/// - I/O errors, which abort the split
pub fn split_lines(input: &Path, first: &Path, rest: &Path, n: usize) -> DatasetResult<SplitOutcome> {
    check_count(n)?;
    let mut reader = open_input(input)?;
    let taken = take_lines(&mut reader, n)?;

    let mut remainder = Vec::new();
    reader.read_to_end(&mut remainder)?;
    let rest_lines = remainder.split_inclusive(|&b| b == b'\n').count();

    write_lines(first, &taken.lines)?;
    let mut out = BufWriter::new(File::create(rest)?);
    out.write_all(&remainder)?;
    out.flush()?;

    if let LineTake::Truncated { available, .. } = taken.outcome {
        warn!(
            requested = n,
            available,
            input = %input.display(),
            "input has fewer lines than requested, all lines went to the first file"
        );
    }
    info!(
        head = taken.lines.len(),
        rest = rest_lines,
        first = %first.display(),
        second = %rest.display(),
        "file split"
    );
    Ok(SplitOutcome {
        head: taken.outcome,
        rest: rest_lines,
    })
}

fn check_count(n: usize) -> DatasetResult<()> {
    if n == 0 {
        return Err(DatasetError::InvalidArgument(
            "line count must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn write_lines(path: &Path, lines: &[Vec<u8>]) -> DatasetResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        out.write_all(line)?;
    }
    out.flush()?;
    Ok(())
}
