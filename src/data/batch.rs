//! Best-effort file conversions.
//!
//! Both tools process every row they can: a bad row is logged with its line
//! number and skipped, and the totals are returned in a [`BatchSummary`].
//! Only I/O failures abort a run.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use super::reader::{open_input, RowReader};
use super::DatasetFormat;
use crate::core::decode::{decode, hot_count};
use crate::core::patterns::{binarize, digit_for, one_hot, SegmentPattern};
use crate::core::DatasetResult;

/// Row totals of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Data rows seen (comments and blank lines excluded).
    pub processed: usize,
    /// Rows written to the output.
    pub written: usize,
    /// Rows skipped because they were malformed or unmatched.
    pub skipped: usize,
    /// Written rows whose decoded label has more than one hot index.
    pub ambiguous: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rows written, {} skipped, {} ambiguous",
            self.written, self.processed, self.skipped, self.ambiguous
        )
    }
}

/// Convert rows of segment bits into one-hot digit labels.
///
/// Without a threshold every value must be exactly `0` or `1`. With
/// `Some(t)`, values `>= t` count as lit, which recovers the clean pattern of
/// any row generated with epsilon below 0.5 when `t = 0.5`.
///
/// The output file is replaced.
///
/// # Errors
///
/// Returns [`crate::DatasetError::MissingFile`] if `input` is absent, or an I/O error.
pub fn convert_patterns_file(
    input: &Path,
    output: &Path,
    format: DatasetFormat,
    threshold: Option<f64>,
) -> DatasetResult<BatchSummary> {
    let rows = RowReader::new(open_input(input)?);
    let mut out = BufWriter::new(File::create(output)?);
    let mut summary = BatchSummary::default();

    for row in rows {
        let row = row?;
        summary.processed += 1;

        let values = match row.values {
            Ok(values) => values,
            Err(reason) => {
                warn!(line = row.line, %reason, "skipping malformed row");
                summary.skipped += 1;
                continue;
            }
        };

        let pattern = match threshold {
            Some(t) => binarize(&values, t),
            None => exact_pattern(&values),
        };
        let Some(pattern) = pattern else {
            warn!(
                line = row.line,
                values = values.len(),
                "skipping row that is not a 7-segment pattern"
            );
            summary.skipped += 1;
            continue;
        };

        let Some(digit) = digit_for(&pattern) else {
            warn!(line = row.line, ?pattern, "pattern doesn't match any digit");
            summary.skipped += 1;
            continue;
        };

        let label = one_hot(digit)?;
        writeln!(out, "{}", format.format_label(&label.to_vec()))?;
        summary.written += 1;
    }
    out.flush()?;

    info!(input = %input.display(), output = %output.display(), %summary, "patterns converted");
    Ok(summary)
}

/// Decode rows of 10 network outputs into arg-max labels.
///
/// Results are appended to `output` unless `append` is false, in which case
/// the file is replaced. Rows with tied maxima are written multi-hot and
/// counted as ambiguous.
///
/// # Errors
///
/// Returns [`crate::DatasetError::MissingFile`] if `input` is absent, or an I/O error.
pub fn decode_outputs_file(
    input: &Path,
    output: &Path,
    format: DatasetFormat,
    append: bool,
) -> DatasetResult<BatchSummary> {
    let rows = RowReader::new(open_input(input)?);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(output)?;
    let mut out = BufWriter::new(file);
    let mut summary = BatchSummary::default();

    for row in rows {
        let row = row?;
        summary.processed += 1;

        let decoded = row
            .values
            .and_then(|values| decode(&values).map_err(|e| e.to_string()));
        let label = match decoded {
            Ok(label) => label,
            Err(reason) => {
                warn!(line = row.line, %reason, "skipping malformed row");
                summary.skipped += 1;
                continue;
            }
        };

        if hot_count(&label) > 1 {
            warn!(line = row.line, "tied maxima, decoded label is not one-hot");
            summary.ambiguous += 1;
        }
        writeln!(out, "{}", format.format_label(&label.to_vec()))?;
        summary.written += 1;
    }
    out.flush()?;

    info!(input = %input.display(), output = %output.display(), %summary, "outputs decoded");
    Ok(summary)
}

fn exact_pattern(values: &[f64]) -> Option<SegmentPattern> {
    if values.iter().any(|&v| v != 0.0 && v != 1.0) {
        return None;
    }
    binarize(values, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_exact_pattern_requires_bits() {
        assert_eq!(
            exact_pattern(&[1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]),
            Some([1, 1, 0, 1, 1, 0, 1])
        );
        assert_eq!(exact_pattern(&[1.0, 0.9, 0.0, 1.0, 1.0, 0.0, 1.0]), None);
        assert_eq!(exact_pattern(&[1.0, 1.0]), None);
    }

    #[test]
    fn test_convert_skips_unmatched_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("patterns.csv");
        let output = dir.path().join("digits.csv");
        fs::write(
            &input,
            "0,1,1,0,0,0,0\n0,0,0,0,0,0,0\n1,1,1\n1,1,1,1,0,1,1\n",
        )
        .unwrap();

        let summary =
            convert_patterns_file(&input, &output, DatasetFormat::Comma, None).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                processed: 4,
                written: 2,
                skipped: 2,
                ambiguous: 0
            }
        );
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "0, 1, 0, 0, 0, 0, 0, 0, 0, 0\n0, 0, 0, 0, 0, 0, 0, 0, 0, 1\n"
        );
    }

    #[test]
    fn test_convert_with_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("noisy.set");
        let output = dir.path().join("labels.set");
        fs::write(&input, "0.8123, 0.6, 0.0312, 0.7, 0.55, 0.2, 0.99\n").unwrap();

        let summary =
            convert_patterns_file(&input, &output, DatasetFormat::Legacy, Some(0.5)).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "0 0 1 0 0 0 0 0 0 0\n"
        );
    }

    #[test]
    fn test_decode_appends_and_counts_ties() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("outputs.out");
        let output = dir.path().join("decoded.set");
        fs::write(&output, "# previous run\n").unwrap();
        fs::write(
            &input,
            "0.1,0.9,0.05,0,0,0,0,0,0,0\n0.5,0.5,0,0,0,0,0,0,0,0\n0.1,0.2\n",
        )
        .unwrap();

        let summary = decode_outputs_file(&input, &output, DatasetFormat::Comma, true).unwrap();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.ambiguous, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "# previous run\n\
             0, 1, 0, 0, 0, 0, 0, 0, 0, 0\n\
             1, 1, 0, 0, 0, 0, 0, 0, 0, 0\n"
        );
    }

    #[test]
    fn test_decode_truncates_without_append() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("outputs.out");
        let output = dir.path().join("decoded.set");
        fs::write(&output, "stale\nstale\nstale\n").unwrap();
        fs::write(&input, "0,0,0,0,0,0,0,0,0,1\n").unwrap();

        decode_outputs_file(&input, &output, DatasetFormat::Legacy, false).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "0 0 0 0 0 0 0 0 0 1\n"
        );
    }

    #[test]
    fn test_decode_continues_past_invalid_utf8_row() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("outputs.out");
        let output = dir.path().join("decoded.set");
        let mut bytes = b"0,0,0,1,0,0,0,0,0,0\n".to_vec();
        bytes.extend_from_slice(b"\xff\xfe,0,0\n");
        bytes.extend_from_slice(b"0,0,0,0,0,0,0,0,0.7,0.2\n");
        fs::write(&input, bytes).unwrap();

        let summary = decode_outputs_file(&input, &output, DatasetFormat::Comma, false).unwrap();
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "0, 0, 0, 1, 0, 0, 0, 0, 0, 0\n0, 0, 0, 0, 0, 0, 0, 0, 1, 0\n"
        );
    }

    #[test]
    fn test_convert_continues_past_invalid_utf8_row() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("patterns.csv");
        let output = dir.path().join("digits.csv");
        let mut bytes = b"0,1,1,0,0,0,0\n".to_vec();
        bytes.extend_from_slice(b"1,\xff,1\n");
        bytes.extend_from_slice(b"1,1,1,0,0,0,0\n");
        fs::write(&input, bytes).unwrap();

        let summary = convert_patterns_file(&input, &output, DatasetFormat::Legacy, None).unwrap();
        assert_eq!(summary.written, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "0 1 0 0 0 0 0 0 0 0\n0 0 0 0 0 0 0 1 0 0\n"
        );
    }

    #[test]
    fn test_decode_distinguishes_values_closer_than_f32() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("outputs.out");
        let output = dir.path().join("decoded.set");
        fs::write(&input, "0.30000001,0.3,0,0,0,0,0,0,0,0\n").unwrap();

        let summary = decode_outputs_file(&input, &output, DatasetFormat::Comma, false).unwrap();
        assert_eq!(summary.ambiguous, 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "1, 0, 0, 0, 0, 0, 0, 0, 0, 0\n"
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode_outputs_file(
            &dir.path().join("absent"),
            &dir.path().join("out"),
            DatasetFormat::Comma,
            true,
        );
        assert!(matches!(result, Err(crate::DatasetError::MissingFile(_))));
    }
}
