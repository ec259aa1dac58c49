//! Fake-3D perspective stage
//!
//! Tick strokes and labels near the left/right edge of the dial are tilted by
//! a small virtual camera so they appear to curl around the sphere. The
//! camera is an immutable builder; `matrix()` composes it into a 3×3
//! projective matrix that maps canvas points to canvas points.
//!
//! Rotations are applied to a point in the order Z, Y, X and are followed by
//! the translation. The camera sits `CAMERA_DISTANCE` pixels in front of the
//! drawing plane.

use super::CanvasSize;
use crate::math::normalize;

/// Distance from the virtual camera to the drawing plane (8 inches at 72 dpi)
pub const CAMERA_DISTANCE: f32 = 576.0;

/// Width of the edge band where strokes twist (pixels)
pub const STROKE_TRANSFORMATION_OFFSET: f32 = 35.0;
/// Width of the edge band where labels shift and tilt (pixels)
pub const NUMBER_TRANSFORMATION_OFFSET: f32 = 30.0;

const STROKE_MAX_ROTATE_Y: f32 = 80.0;
const STROKE_MAX_ROTATE_Z: f32 = 35.0;
const NUMBER_MAX_ROTATE_Y: f32 = 90.0;
const NUMBER_MAX_ROTATE_X: f32 = 10.0;
const NUMBER_MAX_ROTATE_Z: f32 = 5.0;
const NUMBER_MAX_TRANSLATE: f32 = 10.0;

/// Homogeneous `w` below which a point counts as behind the camera
const MIN_W: f32 = 1e-3;

/// Camera rotation (degrees) and translation (canvas pixels, y down)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraTransform {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub rotate_z: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl CameraTransform {
    pub fn rotated(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            rotate_x: self.rotate_x + x,
            rotate_y: self.rotate_y + y,
            rotate_z: self.rotate_z + z,
            ..self
        }
    }

    pub fn translated(self, x: f32, y: f32) -> Self {
        Self {
            translate_x: self.translate_x + x,
            translate_y: self.translate_y + y,
            ..self
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Compose into a projective matrix acting around the canvas origin
    pub fn matrix(&self) -> Homography {
        let (sx, cx) = self.rotate_x.to_radians().sin_cos();
        let (sy, cy) = self.rotate_y.to_radians().sin_cos();
        let (sz, cz) = self.rotate_z.to_radians().sin_cos();

        let rx = [[1.0, 0.0, 0.0], [0.0, cx, -sx], [0.0, sx, cx]];
        let ry = [[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]];
        let rz = [[cz, -sz, 0.0], [sz, cz, 0.0], [0.0, 0.0, 1.0]];
        let r = mul3(&rx, &mul3(&ry, &rz));

        // Points lie on z = 0, so only the first two rotation columns matter
        Homography([
            [r[0][0], r[0][1], self.translate_x],
            [r[1][0], r[1][1], self.translate_y],
            [r[2][0] / CAMERA_DISTANCE, r[2][1] / CAMERA_DISTANCE, 1.0],
        ])
    }
}

fn mul3(a: &[[f32; 3]; 3], b: &[[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// A 3×3 projective transform on canvas points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography(pub [[f32; 3]; 3]);

impl Homography {
    pub fn translation(x: f32, y: f32) -> Self {
        Homography([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    /// Composition that applies `other` first, then `self`
    pub fn after(&self, other: &Homography) -> Homography {
        Homography(mul3(&self.0, &other.0))
    }

    /// Same transform with `(px, py)` as its fixed origin
    pub fn pivoted(&self, px: f32, py: f32) -> Homography {
        Homography::translation(px, py)
            .after(self)
            .after(&Homography::translation(-px, -py))
    }

    /// Map a point; `None` if it lands at or behind the camera plane
    pub fn map(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let m = &self.0;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        if w < MIN_W {
            return None;
        }
        let px = (m[0][0] * x + m[0][1] * y + m[0][2]) / w;
        let py = (m[1][0] * x + m[1][1] * y + m[1][2]) / w;
        (px.is_finite() && py.is_finite()).then_some((px, py))
    }

    /// Local stretch factors along the x and y axes at `(x, y)`
    ///
    /// Used to thin strokes and shrink labels as they turn edge-on.
    pub fn local_scale(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (dx, dy) = self.jacobian(x, y)?;
        Some((dx.0.hypot(dx.1), dy.0.hypot(dy.1)))
    }

    /// Angle (radians) the local x axis is turned by at `(x, y)`
    pub fn local_rotation(&self, x: f32, y: f32) -> Option<f32> {
        let (dx, _) = self.jacobian(x, y)?;
        Some(dx.1.atan2(dx.0))
    }

    /// Area stretch factor at `(x, y)` (absolute Jacobian determinant)
    pub fn local_area(&self, x: f32, y: f32) -> Option<f32> {
        let (dx, dy) = self.jacobian(x, y)?;
        Some((dx.0 * dy.1 - dx.1 * dy.0).abs())
    }

    /// Partial derivatives of the mapped point along x and along y
    fn jacobian(&self, x: f32, y: f32) -> Option<((f32, f32), (f32, f32))> {
        let m = &self.0;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        if w < MIN_W {
            return None;
        }
        let u = m[0][0] * x + m[0][1] * y + m[0][2];
        let v = m[1][0] * x + m[1][1] * y + m[1][2];
        let w2 = w * w;
        let d_dx = (
            (m[0][0] * w - u * m[2][0]) / w2,
            (m[1][0] * w - v * m[2][0]) / w2,
        );
        let d_dy = (
            (m[0][1] * w - u * m[2][1]) / w2,
            (m[1][1] * w - v * m[2][1]) / w2,
        );
        Some((d_dx, d_dy))
    }
}

/// Horizontal extent of the dial: (start, centre, end)
fn dial_span(canvas: CanvasSize) -> (f32, f32, f32) {
    let center = canvas.center_x();
    let half = canvas.min_dimension() / 2.0;
    (center - half, center, center + half)
}

/// Camera for a tick stroke whose anchor was projected to `projected_x`
pub fn stroke_transform(projected_x: f32, canvas: CanvasSize) -> CameraTransform {
    let (start, center, end) = dial_span(canvas);
    let start_offset = start + STROKE_TRANSFORMATION_OFFSET;
    let end_offset = end - STROKE_TRANSFORMATION_OFFSET;

    if projected_x < center {
        CameraTransform::default().rotated(
            0.0,
            normalize(projected_x, start, center, STROKE_MAX_ROTATE_Y, 0.0),
            normalize(projected_x, start, start_offset, -STROKE_MAX_ROTATE_Z, 0.0),
        )
    } else {
        CameraTransform::default().rotated(
            0.0,
            normalize(projected_x, center, end, 0.0, -STROKE_MAX_ROTATE_Y),
            normalize(projected_x, end_offset, end, 0.0, STROKE_MAX_ROTATE_Z),
        )
    }
}

/// Camera for a tick label whose anchor was projected to `projected_x`
pub fn number_transform(projected_x: f32, canvas: CanvasSize) -> CameraTransform {
    let (start, center, end) = dial_span(canvas);
    let start_offset = start + NUMBER_TRANSFORMATION_OFFSET;
    let end_offset = end - NUMBER_TRANSFORMATION_OFFSET;

    if projected_x < center {
        CameraTransform::default()
            .translated(
                normalize(projected_x, start, start_offset, NUMBER_MAX_TRANSLATE, 0.0),
                normalize(projected_x, start, start_offset, NUMBER_MAX_TRANSLATE, 0.0),
            )
            .rotated(
                normalize(projected_x, start_offset, center, NUMBER_MAX_ROTATE_X, 0.0),
                normalize(projected_x, start, center, -NUMBER_MAX_ROTATE_Y, 0.0),
                normalize(projected_x, start_offset, center, -NUMBER_MAX_ROTATE_Z, 0.0),
            )
    } else {
        CameraTransform::default()
            .translated(
                normalize(projected_x, end_offset, end, 0.0, -NUMBER_MAX_TRANSLATE),
                normalize(projected_x, end_offset, end, 0.0, NUMBER_MAX_TRANSLATE),
            )
            .rotated(
                normalize(projected_x, center, end_offset, 0.0, NUMBER_MAX_ROTATE_X),
                normalize(projected_x, center, end, 0.0, NUMBER_MAX_ROTATE_Y),
                normalize(projected_x, center, end_offset, 0.0, NUMBER_MAX_ROTATE_Z),
            )
    }
}
