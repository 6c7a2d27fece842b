//! Aligned inputs/outputs serialization.
//!
//! Line `i` of the inputs stream always describes the same record as line `i`
//! of the outputs stream. Writes are not transactional: an I/O failure midway
//! can leave the two files with different lengths.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::generator::DatasetRecord;
use super::DatasetFormat;
use crate::core::DatasetResult;

/// Streaming writer over a pair of output sinks.
pub struct DatasetWriter<W: Write> {
    inputs: W,
    outputs: W,
    format: DatasetFormat,
    written: usize,
}

impl<W: Write> DatasetWriter<W> {
    pub fn new(inputs: W, outputs: W, format: DatasetFormat) -> Self {
        Self {
            inputs,
            outputs,
            format,
            written: 0,
        }
    }

    /// Append one record to both streams.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from the underlying writers.
    pub fn write_record(&mut self, record: &DatasetRecord) -> DatasetResult<()> {
        writeln!(
            self.inputs,
            "{}",
            self.format.format_inputs(&record.input.to_vec())
        )?;
        writeln!(
            self.outputs,
            "{}",
            self.format.format_label(&record.label.to_vec())
        )?;
        self.written += 1;
        Ok(())
    }

    /// Records written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush both streams and hand them back.
    ///
    /// # Errors
    ///
    /// Propagates flush failures.
    pub fn finish(mut self) -> DatasetResult<(W, W)> {
        self.inputs.flush()?;
        self.outputs.flush()?;
        Ok((self.inputs, self.outputs))
    }
}

/// Write `records` to `inputs_path` and `outputs_path`, replacing existing files.
///
/// Parent directories are created as needed. Name collisions are the caller's
/// concern (see [`crate::naming::FilenameResolver`]).
///
/// # Errors
///
/// Returns an error if a directory or file cannot be created or written.
pub fn write_dataset(
    records: &[DatasetRecord],
    inputs_path: &Path,
    outputs_path: &Path,
    format: DatasetFormat,
) -> DatasetResult<()> {
    for path in [inputs_path, outputs_path] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    let inputs = BufWriter::new(File::create(inputs_path)?);
    let outputs = BufWriter::new(File::create(outputs_path)?);
    let mut writer = DatasetWriter::new(inputs, outputs, format);
    for record in records {
        writer.write_record(record)?;
    }
    let written = writer.written();
    writer.finish()?;

    info!(
        records = written,
        inputs = %inputs_path.display(),
        outputs = %outputs_path.display(),
        "dataset written"
    );
    Ok(())
}
