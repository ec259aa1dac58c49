//! Spherical projection of tick marks
//!
//! Camera coordinate system used by the projector:
//!
//! ```text
//!      +y
//!       |
//!       |
//!       z ── ── +x
//!     z
//!  +z
//! ```
//!
//! The sphere is shifted back by its radius so the visible cap faces the
//! viewer, rotated about the vertical axis by the countdown progress and then
//! perspective-divided onto the canvas.

use super::{CanvasSize, TickMark};
use crate::math::TWO_PI;

/// Sphere radius relative to the canvas min dimension
pub const GLOBE_RADIUS_FACTOR: f32 = 1.05;
/// Field of view distance relative to the canvas min dimension
pub const FIELD_OF_VIEW_FACTOR: f32 = 0.7;
/// Quarter-turn offset so the zero mark sits under the pointer
pub const START_SHIFT: f32 = 0.25;

/// Smallest `fov - z` accepted before a point counts as singular
const SINGULARITY_EPSILON: f32 = 1e-4;

/// A tick mark projected onto the canvas for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Perspective scale (1.0 at the sphere front, smaller further back)
    pub scale: f32,
}

/// Rotation about the vertical axis for a progress fraction in `[0, 1]`
pub fn rotation_for_progress(progress: f32) -> f32 {
    (START_SHIFT + progress) * TWO_PI
}

/// Projects tick marks for one canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    canvas: CanvasSize,
    radius: f32,
    field_of_view: f32,
}

impl Projector {
    pub fn new(canvas: CanvasSize) -> Self {
        let min_dim = canvas.min_dimension();
        Self {
            canvas,
            radius: min_dim * GLOBE_RADIUS_FACTOR,
            field_of_view: min_dim * FIELD_OF_VIEW_FACTOR,
        }
    }

    /// Project a tick mark after rotating the sphere by `rotation_y` radians
    ///
    /// Returns `None` when the point lands on the perspective singularity or
    /// the result is not finite; such a tick is skipped for the frame.
    pub fn project(&self, tick: &TickMark, rotation_y: f32) -> Option<ProjectedPoint> {
        self.project_angles(tick.polar_angle, tick.azimuth_angle, rotation_y)
    }

    /// Project raw spherical angles (polar `phi`, azimuth `theta`)
    pub fn project_angles(&self, phi: f32, theta: f32, rotation_y: f32) -> Option<ProjectedPoint> {
        let r = self.radius;

        let x = r * phi.sin() * theta.cos();
        let y = r * phi.cos();
        let z = r * phi.sin() * theta.sin() - r;

        // Rotate about the y axis through the sphere centre
        let (sin_r, cos_r) = rotation_y.sin_cos();
        let rotated_x = cos_r * x + sin_r * (z + r);
        let rotated_z = -sin_r * x + cos_r * (z + r) - r;

        let depth = self.field_of_view - rotated_z;
        if depth.abs() < SINGULARITY_EPSILON {
            return None;
        }

        let scale = self.field_of_view / depth;
        let point = ProjectedPoint {
            x: rotated_x * scale + self.canvas.width / 2.0,
            y: y * scale + self.canvas.height / 2.0,
            scale,
        };

        (point.x.is_finite() && point.y.is_finite() && point.scale.is_finite()).then_some(point)
    }
}
