//! Dataset generation, serialization, and batch conversion.
//!
//! ## Submodules
//!
//! - [`generator`]: random (noisy input, one-hot label) records
//! - [`writer`]: aligned inputs/outputs text files
//! - [`reader`]: delimited numeric rows and dataset read-back
//! - [`batch`]: best-effort pattern conversion and output decoding over files

pub mod batch;
pub mod generator;
pub mod reader;
pub mod writer;

pub use batch::{convert_patterns_file, decode_outputs_file, BatchSummary};
pub use generator::{digit_histogram, generate, records_to_matrices, seeded_rng, DatasetRecord};
pub use reader::{parse_values, read_dataset, RowReader};
pub use writer::{write_dataset, DatasetWriter};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk layout of a dataset file pair.
///
/// The two layouts are never mixed: a run writes exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// `", "`-separated values in `.set` files.
    #[default]
    Comma,
    /// Space-separated values in `.txt` files.
    Legacy,
}

impl DatasetFormat {
    /// Value separator written between fields.
    #[must_use]
    pub fn separator(self) -> &'static str {
        match self {
            Self::Comma => ", ",
            Self::Legacy => " ",
        }
    }

    /// File extension, without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Comma => "set",
            Self::Legacy => "txt",
        }
    }

    /// Default path of the network inputs file.
    #[must_use]
    pub fn default_inputs(self) -> PathBuf {
        match self {
            Self::Comma => PathBuf::from("fnn_dataset.set"),
            Self::Legacy => PathBuf::from("network_inputs.txt"),
        }
    }

    /// Default path of the expected outputs file.
    #[must_use]
    pub fn default_outputs(self) -> PathBuf {
        match self {
            Self::Comma => PathBuf::from("fnn_outputs.set"),
            Self::Legacy => PathBuf::from("actual_outputs.txt"),
        }
    }

    /// Format an input row: every value with exactly four fractional digits.
    #[must_use]
    pub fn format_inputs(self, values: &[f32]) -> String {
        values
            .iter()
            .map(|v| format!("{v:.4}"))
            .collect::<Vec<_>>()
            .join(self.separator())
    }

    /// Format a label row as integers.
    #[must_use]
    pub fn format_label(self, values: &[f32]) -> String {
        values
            .iter()
            .map(|&v| if v != 0.0 { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(self.separator())
    }
}
