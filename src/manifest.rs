//! Generation manifests.
//!
//! A manifest records everything needed to regenerate a dataset bit-for-bit:
//! the seed, size, noise magnitude and format, plus where the files went and
//! how the digits were distributed. Stored as pretty-printed JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::DatasetResult;
use crate::data::DatasetFormat;
use crate::GeneratorConfig;

/// Serializable description of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Number of records generated.
    pub size: usize,
    /// Noise magnitude.
    pub epsilon: f32,
    /// RNG seed actually used.
    pub seed: u64,
    pub format: DatasetFormat,
    /// Inputs file written.
    pub inputs: PathBuf,
    /// Outputs file written.
    pub outputs: PathBuf,
    /// Occurrences of each digit 0-9.
    #[serde(default)]
    pub digit_counts: Vec<usize>,
}

impl DatasetManifest {
    /// Configuration that reproduces this run.
    #[must_use]
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            size: self.size,
            epsilon: self.epsilon,
            format: self.format,
            seed: Some(self.seed),
        }
    }
}

/// Save a manifest as JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the manifest cannot be serialized or written.
pub fn save_manifest(manifest: &DatasetManifest, path: &Path) -> DatasetResult<()> {
    let json = serde_json::to_string_pretty(manifest)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, json)?;
    Ok(())
}

/// Load a manifest from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_manifest(path: &Path) -> DatasetResult<DatasetManifest> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
