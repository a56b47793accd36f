//! Shaping functions mapping a measurement onto a 0-100 sub-score

/// Sub-score at or above which a checkpoint passes
pub const PASS_THRESHOLD: f64 = 60.0;

/// 100 inside `[min, max]`, falling linearly to 0 at `tolerance` outside
pub fn range_score(value: f64, min: f64, max: f64, tolerance: f64) -> f64 {
    if (min..=max).contains(&value) {
        return 100.0;
    }
    let overshoot = if value < min { min - value } else { value - max };
    decay(overshoot, tolerance)
}

/// 100 at or under `threshold`, falling linearly to 0 at `threshold + tolerance`
pub fn below_score(value: f64, threshold: f64, tolerance: f64) -> f64 {
    if value <= threshold {
        return 100.0;
    }
    decay(value - threshold, tolerance)
}

/// 100 at or over `threshold`, falling linearly to 0 at `threshold - tolerance`
pub fn above_score(value: f64, threshold: f64, tolerance: f64) -> f64 {
    if value >= threshold {
        return 100.0;
    }
    decay(threshold - value, tolerance)
}

fn decay(overshoot: f64, tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return 0.0;
    }
    // NaN measurements land here and score 0
    (100.0 * (1.0 - overshoot / tolerance)).max(0.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_range_score() {
        assert_eq!(range_score(90.0, 70.0, 130.0, 40.0), 100.0);
        assert_eq!(range_score(70.0, 70.0, 130.0, 40.0), 100.0);
        assert!((range_score(150.0, 70.0, 130.0, 40.0) - 50.0).abs() < 1e-9);
        assert!((range_score(50.0, 70.0, 130.0, 40.0) - 50.0).abs() < 1e-9);
        assert_eq!(range_score(200.0, 70.0, 130.0, 40.0), 0.0);
    }

    #[test]
    fn test_below_score() {
        assert_eq!(below_score(10.0, 45.0, 30.0), 100.0);
        assert!((below_score(60.0, 45.0, 30.0) - 50.0).abs() < 1e-9);
        assert_eq!(below_score(90.0, 45.0, 30.0), 0.0);
    }

    #[test]
    fn test_above_score() {
        assert_eq!(above_score(170.0, 165.0, 40.0), 100.0);
        assert!((above_score(0.6, 0.85, 0.5) - 50.0).abs() < 1e-9);
        assert_eq!(above_score(100.0, 165.0, 40.0), 0.0);
    }

    #[test]
    fn test_zero_tolerance_is_a_step() {
        assert_eq!(below_score(1.0, 0.5, 0.0), 0.0);
        assert_eq!(below_score(0.5, 0.5, 0.0), 100.0);
    }

    #[test]
    fn test_nan_scores_zero() {
        assert_eq!(range_score(f64::NAN, 0.0, 1.0, 1.0), 0.0);
        assert_eq!(above_score(f64::NAN, 0.0, 1.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_scores_bounded(
            value in -1000.0f64..1000.0,
            threshold in -200.0f64..200.0,
            tolerance in 0.0f64..100.0,
        ) {
            for score in [
                range_score(value, threshold, threshold + 10.0, tolerance),
                below_score(value, threshold, tolerance),
                above_score(value, threshold, tolerance),
            ] {
                prop_assert!((0.0..=100.0).contains(&score));
            }
        }
    }
}
