//! Range normalization
//!
//! Linear remapping of a value from one range into another, clamping the
//! input first. Used by the projector, the perspective stage, the fade
//! computation and drag-to-duration conversion.

use std::ops::{Add, Div, Mul, Sub};

use thiserror::Error;

/// Full turn in radians
pub const TWO_PI: f32 = std::f32::consts::PI * 2.0;

/// Errors from checked normalization
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    /// Source range has zero width, so every input maps to the same point
    #[error("source range is degenerate (min == max == {0})")]
    Degenerate(f64),
}

/// Numeric types `normalize` works with (`f32` and `f64`)
pub trait Scalar:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    fn as_f64(self) -> f64;
}

impl Scalar for f32 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

/// Clamp `value` into `[from_min, from_max]` and rescale into `[to_min, to_max]`
///
/// The target range may be reversed (`to_min > to_max`). A degenerate source
/// range returns `to_min`.
///
/// # Example
///
/// ```
/// use kitchen_core::normalize;
///
/// assert_eq!(normalize(50.0, 0.0, 100.0, 0.0, 1.0), 0.5);
/// assert_eq!(normalize(150.0, 0.0, 100.0, 0.0, 1.0), 1.0);
/// ```
pub fn normalize<T: Scalar>(value: T, from_min: T, from_max: T, to_min: T, to_max: T) -> T {
    try_normalize(value, from_min, from_max, to_min, to_max).unwrap_or(to_min)
}

/// Checked variant of [`normalize`] that reports a degenerate source range
pub fn try_normalize<T: Scalar>(
    value: T,
    from_min: T,
    from_max: T,
    to_min: T,
    to_max: T,
) -> Result<T, RangeError> {
    if from_min == from_max {
        return Err(RangeError::Degenerate(from_min.as_f64()));
    }

    // Clamp against whichever bound is lower so reversed source ranges work too
    let (lo, hi) = if from_min < from_max {
        (from_min, from_max)
    } else {
        (from_max, from_min)
    };
    let v = if value > hi {
        hi
    } else if value < lo {
        lo
    } else {
        value
    };

    Ok((to_max - to_min) * (v - from_min) / (from_max - from_min) + to_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize(150.0_f32, 0.0, 100.0, 0.0, 1.0), 1.0);
        assert_eq!(normalize(-10.0_f32, 0.0, 100.0, 0.0, 1.0), 0.0);
        assert_eq!(normalize(50.0_f32, 0.0, 100.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_normalize_reversed_target() {
        assert_eq!(normalize(0.0_f32, 0.0, 10.0, 80.0, 0.0), 80.0);
        assert_eq!(normalize(10.0_f32, 0.0, 10.0, 80.0, 0.0), 0.0);
        assert_eq!(normalize(5.0_f32, 0.0, 10.0, 80.0, 0.0), 40.0);
    }

    #[test]
    fn test_normalize_idempotent_in_range() {
        for i in 0..=20 {
            let v = i as f64 * 5.0;
            let once = normalize(v, 0.0, 100.0, 0.0, 100.0);
            let twice = normalize(once, 0.0, 100.0, 0.0, 100.0);
            assert!((once - v).abs() < 1e-9);
            assert!((twice - once).abs() < 1e-9);
        }
    }

    #[test]
    fn test_normalize_monotonic() {
        let mut last = f32::MIN;
        for i in -50..150 {
            let out = normalize(i as f32, 0.0, 100.0, -3.0, 7.0);
            assert!(out >= last, "not monotonic at {}", i);
            last = out;
        }
    }

    #[test]
    fn test_degenerate_range_is_guarded() {
        assert_eq!(normalize(3.0_f32, 5.0, 5.0, 2.0, 9.0), 2.0);
        assert_eq!(
            try_normalize(3.0_f32, 5.0, 5.0, 2.0, 9.0),
            Err(RangeError::Degenerate(5.0))
        );
    }

    #[test]
    fn test_drag_sized_values_in_f64() {
        // 70px of a 420px canvas is one sixth of a minute
        assert_eq!(normalize(70.0_f64, 0.0, 420.0, 0.0, 60_000.0), 10_000.0);
    }
}
