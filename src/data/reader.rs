//! Delimited numeric row reading.
//!
//! Rows may separate values with commas, whitespace, or both, so both dataset
//! layouts read back through the same code. Blank lines and lines starting
//! with `#` are skipped. Values are parsed as `f64`.

use ndarray::Array1;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

use super::generator::DatasetRecord;
use crate::core::decode::label_digit;
use crate::core::patterns::{DIGITS, SEGMENTS};
use crate::core::{DatasetError, DatasetResult};

/// Parse one line of delimited numbers.
///
/// # Errors
///
/// Returns a description of the first token that is not a number.
pub fn parse_values(line: &str) -> Result<Vec<f64>, String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| format!("invalid number '{token}'"))
        })
        .collect()
}

/// A data line and its parse result.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line number in the source.
    pub line: usize,
    pub values: Result<Vec<f64>, String>,
}

/// Iterator over the data rows of a reader.
///
/// Parse failures, including lines that are not valid UTF-8, are yielded as
/// rows so callers can decide whether to skip them or stop; only I/O failures
/// end iteration with an error.
pub struct RowReader<R: BufRead> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = io::Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e)),
            }
            let Ok(text) = std::str::from_utf8(&self.buf) else {
                return Some(Ok(Row {
                    line: self.line,
                    values: Err("invalid UTF-8".to_string()),
                }));
            };
            let text = text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return Some(Ok(Row {
                line: self.line,
                values: parse_values(text),
            }));
        }
    }
}

/// Open `path` for buffered reading, reporting a missing file distinctly.
///
/// # Errors
///
/// - [`DatasetError::MissingFile`] if the path does not exist
/// - [`DatasetError::Io`] for any other open failure
pub fn open_input(path: &Path) -> DatasetResult<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(DatasetError::MissingFile(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Read an inputs/outputs file pair back into records.
///
/// Strict: the first malformed row aborts the read.
///
/// # Errors
///
/// - [`DatasetError::MissingFile`] if either file is absent
/// - [`DatasetError::MalformedRecord`] for a bad row, a non one-hot label, or
///   files with different row counts
pub fn read_dataset(inputs_path: &Path, outputs_path: &Path) -> DatasetResult<Vec<DatasetRecord>> {
    let mut inputs = RowReader::new(open_input(inputs_path)?);
    let mut outputs = RowReader::new(open_input(outputs_path)?);

    let mut records = Vec::new();
    loop {
        match (inputs.next().transpose()?, outputs.next().transpose()?) {
            (None, None) => break,
            (Some(input), Some(output)) => records.push(record_from_rows(input, output)?),
            (Some(row), None) | (None, Some(row)) => {
                return Err(DatasetError::MalformedRecord {
                    line: row.line,
                    reason: "inputs and outputs have different numbers of rows".to_string(),
                })
            }
        }
    }
    Ok(records)
}

fn row_values(row: Row, expected: usize) -> DatasetResult<Vec<f32>> {
    let line = row.line;
    let values = row
        .values
        .map_err(|reason| DatasetError::MalformedRecord { line, reason })?;
    if values.len() != expected {
        return Err(DatasetError::MalformedRecord {
            line,
            reason: format!("expected {expected} values, got {}", values.len()),
        });
    }
    Ok(values.into_iter().map(|v| v as f32).collect())
}

fn record_from_rows(input: Row, output: Row) -> DatasetResult<DatasetRecord> {
    let line = output.line;
    let input = Array1::from(row_values(input, SEGMENTS)?);
    let label = Array1::from(row_values(output, DIGITS)?);

    let binary = label.iter().all(|&v| v == 0.0 || v == 1.0);
    let digit = label_digit(&label)
        .filter(|_| binary)
        .ok_or_else(|| DatasetError::MalformedRecord {
            line,
            reason: "label is not one-hot".to_string(),
        })?;

    Ok(DatasetRecord {
        digit,
        input,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_values_mixed_separators() {
        assert_eq!(
            parse_values("1.0000, 0.5 ,0.25\t-1e-2").unwrap(),
            vec![1.0, 0.5, 0.25, -0.01]
        );
        assert_eq!(parse_values("0 1 0").unwrap(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_parse_values_rejects_garbage() {
        let err = parse_values("1, x, 3").unwrap_err();
        assert!(err.contains("'x'"));
    }

    #[test]
    fn test_row_reader_skips_comments_and_blanks() {
        let text = "# header\n1, 2\n\n   \n# more\n3 4\nbad\n";
        let rows: Vec<Row> = RowReader::new(Cursor::new(text))
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].values, Ok(vec![1.0, 2.0]));
        assert_eq!(rows[1].line, 6);
        assert_eq!(rows[2].line, 7);
        assert!(rows[2].values.is_err());
    }

    #[test]
    fn test_row_reader_last_line_without_newline() {
        let rows: Vec<Row> = RowReader::new(Cursor::new("1\n2"))
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].values, Ok(vec![2.0]));
    }

    #[test]
    fn test_row_reader_yields_invalid_utf8_as_bad_row() {
        let bytes = b"1, 2\n\xff\xfe,0\n3, 4\n".to_vec();
        let rows: Vec<Row> = RowReader::new(Cursor::new(bytes))
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[1].values, Err("invalid UTF-8".to_string()));
        assert_eq!(rows[2].line, 3);
        assert_eq!(rows[2].values, Ok(vec![3.0, 4.0]));
    }

    #[test]
    fn test_parse_values_keeps_f64_precision() {
        let values = parse_values("0.30000001,0.3").unwrap();
        assert!(values[0] > values[1]);
    }

    #[test]
    fn test_open_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(&dir.path().join("nope.set")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingFile(_)));
    }

    #[test]
    fn test_read_dataset_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = dir.path().join("in.set");
        let outputs = dir.path().join("out.set");
        std::fs::write(&inputs, "1, 1, 1, 1, 1, 1, 0\n0, 1, 1, 0, 0, 0, 0\n").unwrap();
        std::fs::write(&outputs, "1, 0, 0, 0, 0, 0, 0, 0, 0, 0\n").unwrap();
        let err = read_dataset(&inputs, &outputs).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_read_dataset_rejects_multi_hot_label() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = dir.path().join("in.set");
        let outputs = dir.path().join("out.set");
        std::fs::write(&inputs, "1, 1, 1, 1, 1, 1, 0\n").unwrap();
        std::fs::write(&outputs, "1, 1, 0, 0, 0, 0, 0, 0, 0, 0\n").unwrap();
        assert!(read_dataset(&inputs, &outputs).is_err());
    }
}
