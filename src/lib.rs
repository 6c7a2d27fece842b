//! # sevenseg
//!
//! Synthetic datasets for 7-segment LED digit recognition.
//!
//! ## Overview
//!
//! Every digit 0-9 has a canonical pattern of lit segments A-G. A training
//! example is that pattern with bounded uniform noise added to each segment
//! (the network input) paired with a one-hot label of the digit (the expected
//! output). Network outputs are turned back into labels by arg-max decoding.
//!
//! ## Structure
//!
//! - [`core`]: Pattern table, noise injection, arg-max decoding, errors
//! - [`data`]: Dataset generation, file formats, batch conversions
//! - [`naming`]: Collision-free output file names
//! - [`lines`]: Line copy/split helpers
//! - [`manifest`]: Reproducible run records
//! - [`prompt`], [`telemetry`], [`cli`]: Plumbing for the binaries

pub mod cli;
pub mod core;
pub mod data;
pub mod lines;
pub mod manifest;
pub mod naming;
pub mod prompt;
pub mod telemetry;

pub use crate::core::decode::{decode, hot_count, label_digit};
pub use crate::core::noise::{NoiseInjector, MAX_EPSILON};
pub use crate::core::patterns::{digit_for, one_hot, pattern_for, SegmentPattern, DIGITS, SEGMENTS};
pub use crate::core::{DatasetError, DatasetResult};
pub use data::{generate, write_dataset, DatasetFormat, DatasetRecord};
pub use naming::FilenameResolver;

/// Dataset generation parameters.
///
/// Validated with [`GeneratorConfig::validate`] before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of records to generate.
    pub size: usize,
    /// Maximum noise magnitude, in `[0.0, 0.5)`.
    pub epsilon: f32,
    pub format: DatasetFormat,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Reject configurations that [`generate`] would refuse.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::InvalidSize`] if `size == 0`
    /// - [`DatasetError::InvalidArgument`] if `epsilon` is out of range
    pub fn validate(&self) -> DatasetResult<()> {
        if self.size == 0 {
            return Err(DatasetError::InvalidSize(self.size));
        }
        crate::core::noise::validate_epsilon(self.epsilon)?;
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 100,
            epsilon: 0.1,
            format: DatasetFormat::Comma,
            seed: None,
        }
    }
}
