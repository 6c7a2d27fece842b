//! Canonical 7-segment patterns for the digits 0-9.
//!
//! Segment order is fixed as A-G:
//!
//! ```text
//!    ▄▄▄        A
//!   █   █     F   B
//!   ▀▄▄▄▀       G
//!   █   █     E   C
//!   ▀▄▄▄▀       D
//! ```

use ndarray::Array1;

use super::{DatasetError, DatasetResult};

/// Number of LED segments per digit.
pub const SEGMENTS: usize = 7;
/// Number of digit classes.
pub const DIGITS: usize = 10;

/// One bit per segment, A through G.
pub type SegmentPattern = [u8; SEGMENTS];

const PATTERNS: [SegmentPattern; DIGITS] = [
    //A  B  C  D  E  F  G
    [1, 1, 1, 1, 1, 1, 0], // 0
    [0, 1, 1, 0, 0, 0, 0], // 1
    [1, 1, 0, 1, 1, 0, 1], // 2
    [1, 1, 1, 1, 0, 0, 1], // 3
    [0, 1, 1, 0, 0, 1, 1], // 4
    [1, 0, 1, 1, 0, 1, 1], // 5
    [1, 0, 1, 1, 1, 1, 1], // 6
    [1, 1, 1, 0, 0, 0, 0], // 7
    [1, 1, 1, 1, 1, 1, 1], // 8
    [1, 1, 1, 1, 0, 1, 1], // 9
];

/// Canonical pattern for `digit`.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidDigit`] if `digit > 9`.
pub fn pattern_for(digit: usize) -> DatasetResult<SegmentPattern> {
    PATTERNS
        .get(digit)
        .copied()
        .ok_or(DatasetError::InvalidDigit(digit))
}

/// Reverse lookup by exact equality. No partial matching.
#[must_use]
pub fn digit_for(pattern: &[u8]) -> Option<usize> {
    PATTERNS.iter().position(|p| p.as_slice() == pattern)
}

/// One-hot label of length [`DIGITS`] with a single `1.0` at `digit`.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidDigit`] if `digit > 9`.
pub fn one_hot(digit: usize) -> DatasetResult<Array1<f32>> {
    if digit >= DIGITS {
        return Err(DatasetError::InvalidDigit(digit));
    }
    let mut label = Array1::zeros(DIGITS);
    label[digit] = 1.0;
    Ok(label)
}

/// Segment bits as exact `0.0` / `1.0` floats.
#[must_use]
pub fn pattern_as_floats(pattern: &SegmentPattern) -> Array1<f32> {
    pattern.iter().map(|&bit| f32::from(bit)).collect()
}

/// Map a real-valued row onto segment bits: `value >= threshold` lights the segment.
///
/// Returns `None` if the row does not have exactly [`SEGMENTS`] values.
#[must_use]
pub fn binarize<T: Copy + Into<f64>>(values: &[T], threshold: f64) -> Option<SegmentPattern> {
    if values.len() != SEGMENTS {
        return None;
    }
    let mut pattern = [0u8; SEGMENTS];
    for (bit, &v) in pattern.iter_mut().zip(values) {
        let v: f64 = v.into();
        *bit = u8::from(v >= threshold);
    }
    Some(pattern)
}
