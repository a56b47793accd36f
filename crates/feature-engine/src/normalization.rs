//! Z-score normalization for model inputs
//!
//! The trained network expects every feature standardized with the mean and
//! standard deviation computed over its training set.

use crate::features::FEATURE_COUNT;
use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Standard deviations below this are treated as this value
const MIN_STD_DEV: f64 = 0.0001;

/// Per-feature mean/std in [`crate::FEATURE_NAMES`] order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureNormalization {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Default for FeatureNormalization {
    /// Identity transform
    fn default() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            std: vec![1.0; FEATURE_COUNT],
        }
    }
}

impl FeatureNormalization {
    /// Check that both vectors cover the full feature layout
    pub fn validate(&self) -> Result<(), FeatureError> {
        for len in [self.mean.len(), self.std.len()] {
            if len != FEATURE_COUNT {
                return Err(FeatureError::NormalizationShape {
                    expected: FEATURE_COUNT,
                    actual: len,
                });
            }
        }
        Ok(())
    }

    /// Standardize one feature row
    pub fn apply(&self, values: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in values.iter().enumerate() {
            let mean = self.mean.get(i).copied().unwrap_or(0.0);
            let std = self.std.get(i).copied().unwrap_or(1.0).max(MIN_STD_DEV);
            out[i] = (value - mean) / std;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_identity() {
        let norm = FeatureNormalization::default();
        let row = [3.5; FEATURE_COUNT];
        assert_eq!(norm.apply(&row), row);
        assert!(norm.validate().is_ok());
    }

    #[test]
    fn test_apply_standardizes() {
        let mut norm = FeatureNormalization::default();
        norm.mean[0] = 90.0;
        norm.std[0] = 10.0;
        norm.std[1] = 0.0;

        let mut row = [0.0; FEATURE_COUNT];
        row[0] = 100.0;
        let z = norm.apply(&row);
        assert!((z[0] - 1.0).abs() < 1e-9);
        // Zero std floors instead of dividing by zero
        assert_eq!(z[1], 0.0);
    }

    #[test]
    fn test_validate_rejects_short_vectors() {
        let norm = FeatureNormalization {
            mean: vec![0.0; 5],
            std: vec![1.0; FEATURE_COUNT],
        };
        assert_eq!(
            norm.validate(),
            Err(FeatureError::NormalizationShape { expected: FEATURE_COUNT, actual: 5 })
        );
    }

    proptest! {
        #[test]
        fn prop_apply_is_finite(value in -1000.0f64..1000.0, std in 0.0f64..10.0) {
            let norm = FeatureNormalization {
                mean: vec![1.0; FEATURE_COUNT],
                std: vec![std; FEATURE_COUNT],
            };
            let out = norm.apply(&[value; FEATURE_COUNT]);
            prop_assert!(out.iter().all(|v| v.is_finite()));
        }
    }
}
