//! Fixed layout offsets for the dial
//!
//! The values were tuned against the default polar angle (π/1.7) and a dial
//! roughly 300px across. They are configurable so a skin can nudge the seam
//! or the pointer without touching the drawing code.

use serde::{Deserialize, Serialize};

/// Layout constants used by `compose_scene`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialLayout {
    /// Seam ellipse height in pixels
    pub seam_height: f32,
    /// Seam top edge relative to the canvas centre (negative is up)
    pub seam_offset_y: f32,
    /// Vertical gap between the two seam arcs
    pub seam_gap: f32,
    /// Seam stroke width
    pub seam_width: f32,
    /// Pointer apex below the canvas centre
    pub pointer_top: f32,
    /// Pointer base below the canvas centre
    pub pointer_bottom: f32,
    /// Half the width of the pointer base
    pub pointer_half_width: f32,
    /// Pointer opacity
    pub pointer_alpha: f32,
    /// Ticks above `centre - alpha_threshold` start fading out
    pub alpha_threshold: f32,
    /// Height of the fade band above the threshold
    pub fade_band: f32,
    /// Opacity of fully visible ticks
    pub tick_alpha: f32,
    /// Width and height of every 5th stroke
    pub big_stroke_width: f32,
    pub big_stroke_height: f32,
    /// Width and height of the other strokes
    pub small_stroke_width: f32,
    pub small_stroke_height: f32,
    /// Gap between a big stroke's tip and its label
    pub label_gap: f32,
    /// Label font size
    pub label_size: f32,
}

impl Default for DialLayout {
    fn default() -> Self {
        Self {
            seam_height: 170.0,
            seam_offset_y: -120.0,
            seam_gap: 7.0,
            seam_width: 2.5,
            pointer_top: 70.0,
            pointer_bottom: 115.0,
            pointer_half_width: 25.0,
            pointer_alpha: 0.8,
            alpha_threshold: 30.0,
            fade_band: 20.0,
            tick_alpha: 0.8,
            big_stroke_width: 10.0,
            big_stroke_height: 50.0,
            small_stroke_width: 5.0,
            small_stroke_height: 25.0,
            label_gap: 10.0,
            label_size: 40.0,
        }
    }
}

impl DialLayout {
    /// Stroke (width, height) for a tick
    pub fn stroke_size(&self, big: bool) -> (f32, f32) {
        if big {
            (self.big_stroke_width, self.big_stroke_height)
        } else {
            (self.small_stroke_width, self.small_stroke_height)
        }
    }
}
