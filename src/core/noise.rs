//! Bounded uniform noise on top of canonical segment patterns.
//!
//! Each segment bit `b` becomes `clamp(b + u, 0, 1)` with `u ~ U[-ε, ε]`.
//! Because ε stays below 0.5, a noisy segment never crosses the midpoint.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::Rng;

use super::patterns::{pattern_as_floats, SegmentPattern, SEGMENTS};
use super::{DatasetError, DatasetResult};

/// Exclusive upper bound for the noise magnitude.
pub const MAX_EPSILON: f32 = 0.5;

/// Check that `epsilon` lies in `[0.0, MAX_EPSILON)`.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidArgument`] for values outside the range or NaN.
pub fn validate_epsilon(epsilon: f32) -> DatasetResult<f32> {
    if (0.0..MAX_EPSILON).contains(&epsilon) {
        Ok(epsilon)
    } else {
        Err(DatasetError::InvalidArgument(format!(
            "epsilon must lie in [0.0, {MAX_EPSILON}), got {epsilon}"
        )))
    }
}

/// Symmetric uniform noise source with a fixed maximum magnitude.
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    epsilon: f32,
    /// `None` when epsilon is zero: injection is then an exact passthrough.
    dist: Option<Uniform<f32>>,
}

impl NoiseInjector {
    /// Build an injector for noise in `[-epsilon, epsilon]`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidArgument`] unless `0.0 <= epsilon < 0.5`.
    pub fn new(epsilon: f32) -> DatasetResult<Self> {
        let epsilon = validate_epsilon(epsilon)?;
        let dist = (epsilon > 0.0).then(|| Uniform::new_inclusive(-epsilon, epsilon));
        Ok(Self { epsilon, dist })
    }

    /// Noise magnitude this injector was built with.
    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Perturb `pattern` and clamp every segment to `[0.0, 1.0]`.
    pub fn inject<R: Rng + ?Sized>(&self, pattern: &SegmentPattern, rng: &mut R) -> Array1<f32> {
        let clean = pattern_as_floats(pattern);
        match &self.dist {
            None => clean,
            Some(dist) => {
                let noise = Array1::random_using(SEGMENTS, dist, rng);
                (clean + noise).mapv(|v| v.clamp(0.0, 1.0))
            }
        }
    }
}
