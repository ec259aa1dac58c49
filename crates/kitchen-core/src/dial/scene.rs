//! Frame composition
//!
//! `compose_scene` runs the whole render pipeline for one frame and returns a
//! toolkit-independent display list. Draw order is the order of the fields:
//! disk, seams, pointer, ticks (index order), labels, shading, guides.

use super::perspective::{number_transform, stroke_transform, Homography};
use super::projection::{rotation_for_progress, Projector};
use super::{CanvasSize, DialLayout, TickMark};
use crate::color::{Rgba, TimerColors};
use crate::math::normalize;
use crate::TWO_PI;

/// Strength of the foreground shading gradient
const SHADING_ALPHA: f32 = 0.35;
/// Width of debug guide lines
const GUIDE_WIDTH: f32 = 4.0;

pub type Point = (f32, f32);

/// Filled circle behind everything else
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub center: Point,
    pub radius: f32,
    pub color: Rgba,
}

/// Elliptical arc hinting at the seam between two half spheres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamArc {
    pub center: Point,
    pub radii: (f32, f32),
    /// Radians, measured clockwise from +x (screen y points down)
    pub start_angle: f32,
    pub end_angle: f32,
    pub width: f32,
    pub color: Rgba,
}

/// Pointer triangle marking the current time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub points: [Point; 3],
    pub color: Rgba,
}

/// One transformed tick stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickGlyph {
    pub index: usize,
    pub start: Point,
    pub end: Point,
    pub width: f32,
    pub color: Rgba,
}

/// One transformed tick label, anchored at its bottom centre
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGlyph {
    pub index: usize,
    pub text: String,
    pub position: Point,
    pub size: f32,
    /// Radians
    pub rotation: f32,
    pub color: Rgba,
}

/// Linear gradient laid over the disk to fake sphere lighting
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingOverlay {
    pub center: Point,
    pub radius: f32,
    pub from: Point,
    pub to: Point,
    pub stops: Vec<(f32, Rgba)>,
}

/// Debug guide line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub from: Point,
    pub to: Point,
    pub width: f32,
    pub color: Rgba,
}

/// Everything needed to draw one frame of the dial
#[derive(Debug, Clone, PartialEq)]
pub struct DialScene {
    pub size: CanvasSize,
    pub disk: Disk,
    pub seams: [SeamArc; 2],
    pub pointer: Pointer,
    pub ticks: Vec<TickGlyph>,
    pub labels: Vec<LabelGlyph>,
    pub shading: ShadingOverlay,
    pub guides: Vec<GuideLine>,
}

/// Opacity for a tick whose (shifted) screen y is `y`
///
/// Ticks below the threshold line use the layout's full tick alpha; above it
/// they fade linearly to zero across the fade band.
pub fn tick_alpha(y: f32, center_y: f32, layout: &DialLayout) -> f32 {
    let threshold = center_y - layout.alpha_threshold;
    if y < threshold {
        normalize(y, threshold - layout.fade_band, threshold, 0.0, layout.tick_alpha)
    } else {
        layout.tick_alpha
    }
}

/// Compose one frame of the dial for `progress` in `[0, 1]`
pub fn compose_scene(
    size: CanvasSize,
    progress: f32,
    colors: &TimerColors,
    layout: &DialLayout,
    ticks: &[TickMark],
    debug_guides: bool,
) -> DialScene {
    let min_dim = size.min_dimension();
    let (cx, cy) = (size.center_x(), size.center_y());

    let disk = Disk {
        center: (cx, cy),
        radius: min_dim / 2.0,
        color: colors.background,
    };

    let seam = SeamArc {
        center: (cx, cy + layout.seam_offset_y + layout.seam_height / 2.0),
        radii: ((min_dim - 3.0) / 2.0, layout.seam_height / 2.0),
        start_angle: 0.0,
        end_angle: TWO_PI / 2.0,
        width: layout.seam_width,
        color: colors.arc,
    };
    let seams = [
        seam,
        SeamArc {
            center: (seam.center.0, seam.center.1 + layout.seam_gap),
            color: colors.arc.scale_alpha(0.4),
            ..seam
        },
    ];

    let pointer = Pointer {
        points: [
            (cx, cy + layout.pointer_top),
            (cx - layout.pointer_half_width, cy + layout.pointer_bottom),
            (cx + layout.pointer_half_width, cy + layout.pointer_bottom),
        ],
        color: colors.tracker.scale_alpha(layout.pointer_alpha),
    };

    let projector = Projector::new(size);
    let rotation = rotation_for_progress(progress);
    let shift = (min_dim / 9.0).round();

    let mut tick_glyphs = Vec::with_capacity(ticks.len());
    let mut labels = Vec::new();
    for tick in ticks {
        let Some(point) = projector.project(tick, rotation) else {
            continue;
        };
        let (x, y) = (point.x, point.y + shift);
        let alpha = tick_alpha(y, cy, layout);

        let (width, height) = layout.stroke_size(tick.is_big());
        let stroke = stroke_transform(x, size).matrix().pivoted(x, y);
        let stroke_color = colors.stroke.scale_alpha(alpha);
        if let Some(glyph) = stroke_glyph(&stroke, tick.index, (x, y), width, height, stroke_color)
        {
            tick_glyphs.push(glyph);
        }

        if tick.is_labeled() {
            let text_y = y - layout.big_stroke_height - layout.label_gap;
            let number = number_transform(x, size).matrix().pivoted(x, text_y);
            let number_color = colors.number.scale_alpha(alpha);
            if let Some(label) =
                label_glyph(&number, tick.index, (x, text_y), layout.label_size, number_color)
            {
                labels.push(label);
            }
        }
    }

    let shading = ShadingOverlay {
        center: (cx, cy),
        radius: min_dim / 2.0,
        from: (0.0, 0.0),
        to: (size.width, size.height),
        stops: vec![
            (0.0, Rgba::WHITE.scale_alpha(SHADING_ALPHA)),
            (0.25, Rgba::WHITE.scale_alpha(SHADING_ALPHA * 0.5)),
            (0.5, Rgba::BLACK.scale_alpha(SHADING_ALPHA)),
            (0.75, Rgba::BLACK.scale_alpha(SHADING_ALPHA)),
            (1.0, Rgba::BLACK.scale_alpha(SHADING_ALPHA)),
        ],
    };

    let guides = if debug_guides {
        guide_lines(size, layout)
    } else {
        Vec::new()
    };

    DialScene {
        size,
        disk,
        seams,
        pointer,
        ticks: tick_glyphs,
        labels,
        shading,
        guides,
    }
}

/// Vertical stroke from `anchor` upwards, bent by `matrix`
fn stroke_glyph(
    matrix: &Homography,
    index: usize,
    anchor: Point,
    width: f32,
    height: f32,
    color: Rgba,
) -> Option<TickGlyph> {
    let start = matrix.map(anchor.0, anchor.1)?;
    let end = matrix.map(anchor.0, anchor.1 - height)?;

    // Width runs across the stroke: area stretch divided by stretch along it
    let (_, along) = matrix.local_scale(anchor.0, anchor.1)?;
    let area = matrix.local_area(anchor.0, anchor.1)?;
    let across = if along > f32::EPSILON { area / along } else { 0.0 };

    Some(TickGlyph {
        index,
        start,
        end,
        width: width * across,
        color,
    })
}

fn label_glyph(
    matrix: &Homography,
    index: usize,
    anchor: Point,
    size: f32,
    color: Rgba,
) -> Option<LabelGlyph> {
    let position = matrix.map(anchor.0, anchor.1)?;
    let area = matrix.local_area(anchor.0, anchor.1)?;
    let rotation = matrix.local_rotation(anchor.0, anchor.1)?;

    Some(LabelGlyph {
        index,
        text: index.to_string(),
        position,
        size: size * area.sqrt(),
        rotation,
        color,
    })
}

fn guide_lines(size: CanvasSize, layout: &DialLayout) -> Vec<GuideLine> {
    use super::perspective::{NUMBER_TRANSFORMATION_OFFSET, STROKE_TRANSFORMATION_OFFSET};

    let (w, h) = (size.width, size.height);
    let (cx, cy) = (size.center_x(), size.center_y());
    let half = size.min_dimension() / 2.0;

    let green = Rgba::rgb(0.0, 1.0, 0.0);
    let yellow = Rgba::rgb(1.0, 1.0, 0.0);
    let cyan = Rgba::rgb(0.0, 1.0, 1.0);
    let gray = Rgba::from_argb(0xFF888888);
    let light_gray = Rgba::from_argb(0xFFCCCCCC);

    let line = |from: Point, to: Point, color: Rgba| GuideLine {
        from,
        to,
        width: GUIDE_WIDTH,
        color,
    };
    let vertical = |x: f32, color: Rgba| line((x, 0.0), (x, h), color);

    vec![
        // Canvas limits
        line((0.0, 0.0), (0.0, h), green),
        line((0.0, 0.0), (w, 0.0), green),
        line((w, 0.0), (w, h), green),
        line((0.0, h), (w, h), green),
        // Centre cross
        line((0.0, cy), (w, cy), yellow),
        vertical(cx, yellow),
        // Fade threshold
        line((0.0, cy - layout.alpha_threshold), (w, cy - layout.alpha_threshold), cyan),
        // Label and stroke twist bands
        vertical(cx - half + NUMBER_TRANSFORMATION_OFFSET, gray),
        vertical(cx + half - NUMBER_TRANSFORMATION_OFFSET, gray),
        vertical(cx - half + STROKE_TRANSFORMATION_OFFSET, light_gray),
        vertical(cx + half - STROKE_TRANSFORMATION_OFFSET, light_gray),
    ]
}
