//! Drag-to-duration conversion

use crate::math::normalize;

/// Multiplier applied to every horizontal drag delta
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 1.4;

/// Accumulated horizontal drag for one editing gesture
///
/// Each delta is scaled by the sensitivity and truncated to whole pixels
/// before it is subtracted, so dragging right to left grows the total.
/// A full dial width of accumulated drag equals the full capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAccumulator {
    sensitivity: f32,
    accumulated: i64,
}

impl Default for DragAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_SENSITIVITY)
    }
}

impl DragAccumulator {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            accumulated: 0,
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0;
    }

    pub fn accumulated(&self) -> i64 {
        self.accumulated
    }

    pub fn push(&mut self, dx: f32) {
        self.accumulated -= (dx * self.sensitivity).trunc() as i64;
    }

    /// Duration (ms) covered by the accumulated drag on a dial `width` wide
    pub fn dragged_ms(&self, width: f32, capacity_ms: u64) -> u64 {
        let dragged = normalize(
            self.accumulated.unsigned_abs() as f64,
            0.0,
            width as f64,
            0.0,
            capacity_ms as f64,
        );
        dragged.round() as u64
    }

    /// New remaining time for a gesture that started at `baseline_ms`
    pub fn apply(&self, baseline_ms: u64, width: f32, capacity_ms: u64) -> u64 {
        let dragged = self.dragged_ms(width, capacity_ms);
        let value = if self.accumulated >= 0 {
            baseline_ms.saturating_add(dragged)
        } else {
            baseline_ms.saturating_sub(dragged)
        };
        value.min(capacity_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_scaled_delta() {
        let mut acc = DragAccumulator::default();
        acc.push(-10.0);
        assert_eq!(acc.accumulated(), 14);
        acc.push(0.5);
        // 0.7 truncates to 0
        assert_eq!(acc.accumulated(), 14);
        acc.push(3.0);
        assert_eq!(acc.accumulated(), 10);
    }

    #[test]
    fn test_dragged_ms() {
        let mut acc = DragAccumulator::default();
        for _ in 0..5 {
            acc.push(-10.0);
        }
        assert_eq!(acc.accumulated(), 70);
        assert_eq!(acc.dragged_ms(420.0, 60_000), 10_000);
        assert_eq!(acc.apply(0, 420.0, 60_000), 10_000);
        assert_eq!(acc.apply(55_000, 420.0, 60_000), 60_000);
    }

    #[test]
    fn test_negative_drag_subtracts() {
        let mut acc = DragAccumulator::default();
        acc.push(10.0);
        assert_eq!(acc.accumulated(), -14);
        assert_eq!(acc.apply(1_000, 420.0, 60_000), 0);
        assert_eq!(acc.apply(30_000, 420.0, 60_000), 28_000);
    }

    #[test]
    fn test_drag_beyond_width_clamps() {
        let mut acc = DragAccumulator::new(1.0);
        acc.push(-1_000.0);
        assert_eq!(acc.dragged_ms(420.0, 60_000), 60_000);
    }

    #[test]
    fn test_zero_width_is_harmless() {
        let mut acc = DragAccumulator::default();
        acc.push(-10.0);
        assert_eq!(acc.apply(5_000, 0.0, 60_000), 5_000);
    }
}
