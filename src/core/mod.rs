//! Core dataset model: segment patterns, noise injection, arg-max decoding.
//!
//! - [`patterns`]: canonical digit → segment table and one-hot labels
//! - [`noise`]: bounded uniform perturbation of segment bits
//! - [`decode`]: arg-max decoding of 10-value output vectors
//!
//! All fallible operations report [`DatasetError`].

pub mod decode;
pub mod noise;
pub mod patterns;

use std::path::PathBuf;

use thiserror::Error;

/// Error type for dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Digit outside 0-9.
    #[error("invalid digit {0}: expected 0-9")]
    InvalidDigit(usize),
    /// Non-positive dataset size.
    #[error("invalid dataset size {0}: must be a positive integer")]
    InvalidSize(usize),
    /// Out-of-range numeric parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Vector with the wrong number of values.
    #[error("expected {expected} values, got {found}")]
    MalformedVector { expected: usize, found: usize },
    /// Row that cannot be parsed or does not fit the expected shape.
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    /// Input file that does not exist.
    #[error("the file '{}' does not exist", .0.display())]
    MissingFile(PathBuf),
    /// No free file name within the attempt bound.
    #[error("no free file name derived from '{}' after {attempts} attempts", .path.display())]
    ExhaustedNameSpace { path: PathBuf, attempts: usize },
    /// Manifest (de)serialization failure.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DatasetResult<T> = Result<T, DatasetError>;
