//! Arg-max decoding of network outputs back to class labels.

use ndarray::Array1;

use super::patterns::DIGITS;
use super::{DatasetError, DatasetResult};

/// Decode a 10-value output vector into a (usually one-hot) label.
///
/// Values are compared as `f64`, so `f32` and `f64` rows decode the same way
/// and distinct `f64` values never collapse into a tie. Every index whose value
/// equals the maximum is set to `1.0`. Ties are not broken:
/// `[0.5, 0.5, 0, ...]` decodes to `[1, 1, 0, ...]`, which is not a strict
/// one-hot label. Use [`hot_count`] or [`label_digit`] to detect it.
///
/// # Errors
///
/// - [`DatasetError::MalformedVector`] unless `values.len() == 10`
/// - [`DatasetError::InvalidArgument`] if any value is NaN
pub fn decode<T: Copy + Into<f64>>(values: &[T]) -> DatasetResult<Array1<f32>> {
    if values.len() != DIGITS {
        return Err(DatasetError::MalformedVector {
            expected: DIGITS,
            found: values.len(),
        });
    }
    let wide: Vec<f64> = values.iter().map(|&v| Into::<f64>::into(v)).collect();
    if wide.iter().any(|v| v.is_nan()) {
        return Err(DatasetError::InvalidArgument(
            "output vector contains NaN".to_string(),
        ));
    }

    let max = wide.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let label = wide
        .iter()
        .map(|&v| if v == max { 1.0 } else { 0.0 })
        .collect();
    Ok(label)
}

/// Number of indices set in a decoded label.
#[must_use]
pub fn hot_count(label: &Array1<f32>) -> usize {
    label.iter().filter(|&&v| v != 0.0).count()
}

/// Digit encoded by a strict one-hot label, or `None` for multi-hot / empty labels.
#[must_use]
pub fn label_digit(label: &Array1<f32>) -> Option<usize> {
    if hot_count(label) != 1 {
        return None;
    }
    label.iter().position(|&v| v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patterns::one_hot;

    #[test]
    fn test_decode_clear_winner() {
        let v = [0.1, 0.9, 0.05, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let label = decode(&v).unwrap();
        assert_eq!(
            label.to_vec(),
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(label_digit(&label), Some(1));
    }

    #[test]
    fn test_decode_ties_flag_all_maxima() {
        let v = [0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let label = decode(&v).unwrap();
        assert_eq!(
            label.to_vec(),
            vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(hot_count(&label), 2);
        assert_eq!(label_digit(&label), None);
    }

    #[test]
    fn test_decode_is_idempotent_on_one_hot() {
        for d in 0..DIGITS {
            let label = one_hot(d).unwrap();
            let decoded = decode(label.as_slice().unwrap()).unwrap();
            assert_eq!(decoded, label);
        }
    }

    #[test]
    fn test_decode_negative_values() {
        let mut v = [-3.0f32; DIGITS];
        v[7] = -0.25;
        assert_eq!(label_digit(&decode(&v).unwrap()), Some(7));
    }

    #[test]
    fn test_decode_wrong_length() {
        let err = decode(&[0.1, 0.2]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MalformedVector {
                expected: 10,
                found: 2
            }
        ));
    }

    #[test]
    fn test_decode_close_f64_values_are_not_tied() {
        // Both round to the same f32.
        let v = [0.300_000_01, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let label = decode(&v).unwrap();
        assert_eq!(hot_count(&label), 1);
        assert_eq!(label_digit(&label), Some(0));
    }

    #[test]
    fn test_decode_rejects_nan() {
        let mut v = [0.0f32; DIGITS];
        v[4] = f32::NAN;
        assert!(decode(&v).is_err());
    }
}
