//! Dial geometry
//!
//! The dial is a pseudo-sphere with sixty tick marks on a fixed latitude.
//! Progress rotates the sphere about its vertical axis; every frame the ticks
//! are projected to screen space and then bent by a fake-3D camera so marks
//! near the horizon curl away.
//!
//! ## Pipeline
//!
//! ```text
//! TickMark ──► Projector::project ──► ProjectedPoint
//!                                         │
//!                           stroke_transform / number_transform
//!                                         │
//!                                   compose_scene ──► DialScene
//! ```
//!
//! Everything here is a pure function of its inputs; there is no hidden
//! camera object kept between frames.

mod layout;
mod perspective;
mod projection;
mod scene;

pub use layout::DialLayout;
pub use perspective::{number_transform, stroke_transform, CameraTransform, Homography};
pub use projection::{rotation_for_progress, ProjectedPoint, Projector};
pub use scene::{
    compose_scene, tick_alpha, DialScene, Disk, GuideLine, LabelGlyph, Pointer, SeamArc,
    ShadingOverlay, TickGlyph,
};

use crate::math::{normalize, TWO_PI};

/// Number of tick marks around the dial (one per second or minute)
pub const TICK_COUNT: usize = 60;

/// Polar angle shared by every tick mark (slightly below the equator)
pub const DEFAULT_POLAR_ANGLE: f32 = std::f32::consts::PI / 1.7;

/// A fixed position on the dial sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Position on the dial (0-59)
    pub index: usize,
    /// Polar angle φ in radians
    pub polar_angle: f32,
    /// Azimuth angle θ in radians
    pub azimuth_angle: f32,
}

impl TickMark {
    /// Every 5th mark is drawn taller and thicker
    pub fn is_big(&self) -> bool {
        self.index % 5 == 0
    }

    /// Every 10th mark carries a number
    pub fn is_labeled(&self) -> bool {
        self.index % 10 == 0
    }
}

/// Build the sixty tick marks in index order
pub fn tick_marks() -> [TickMark; TICK_COUNT] {
    std::array::from_fn(|index| TickMark {
        index,
        polar_angle: DEFAULT_POLAR_ANGLE,
        azimuth_angle: normalize(index as f32, 0.0, TICK_COUNT as f32, 0.0, TWO_PI),
    })
}

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_marks_layout() {
        let ticks = tick_marks();
        assert_eq!(ticks.len(), TICK_COUNT);
        for (i, tick) in ticks.iter().enumerate() {
            assert_eq!(tick.index, i);
            assert_eq!(tick.polar_angle, DEFAULT_POLAR_ANGLE);
        }
        assert_eq!(ticks[0].azimuth_angle, 0.0);
        assert!((ticks[15].azimuth_angle - TWO_PI / 4.0).abs() < 1e-5);
        assert!(ticks[59].azimuth_angle < TWO_PI);
    }

    #[test]
    fn test_tick_variants() {
        let ticks = tick_marks();
        assert_eq!(ticks.iter().filter(|t| t.is_big()).count(), 12);
        assert_eq!(ticks.iter().filter(|t| t.is_labeled()).count(), 6);
        assert!(ticks[10].is_big() && ticks[10].is_labeled());
        assert!(ticks[5].is_big() && !ticks[5].is_labeled());
        assert!(!ticks[7].is_big());
    }
}
