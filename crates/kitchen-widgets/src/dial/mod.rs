//! Kitchen timer dial widget
//!
//! - `DialState`: per-widget data (tick set, colors, layout, leaf)
//! - `DialCanvas`: canvas program that rasterizes a `DialScene`
//! - `kitchen_dial`: view function returning an `Element`
//!
//! Pointer input is reduced to [`DialGesture`]s by a [`GestureTracker`] kept
//! as the canvas state, so the application only sees press, drag and release.

mod canvas;
mod view;

pub use canvas::DialCanvas;
pub use view::kitchen_dial;

use kitchen_core::{tick_marks, DialLayout, TickMark, TimerColors, TICK_COUNT};

use crate::theme::{FruitSkin, LeafStyle};

/// Horizontal movement (px) before a press turns into a drag
pub const DRAG_SLOP: f32 = 6.0;

/// Default edge length of the square dial
pub const DIAL_SIZE: f32 = 300.0;

/// Gesture reported by the dial
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialGesture {
    /// Pointer went down on the dial
    Pressed,
    /// Horizontal drag step of `dx` pixels on a dial `width` pixels wide
    Dragged { dx: f32, width: f32 },
    /// Pointer released without dragging
    Released,
    /// Drag finished
    DragEnded,
}

/// Pointer tracking kept between canvas events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureTracker {
    /// X where the pointer went down (None when not pressed)
    origin_x: Option<f32>,
    /// X at the last reported drag step
    last_x: f32,
    dragging: bool,
}

impl GestureTracker {
    pub fn is_pressed(&self) -> bool {
        self.origin_x.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press(&mut self, x: f32) -> DialGesture {
        *self = Self {
            origin_x: Some(x),
            last_x: x,
            dragging: false,
        };
        DialGesture::Pressed
    }

    /// Pointer moved to `x`; reports a drag step once past the slop
    pub fn moved(&mut self, x: f32, width: f32) -> Option<DialGesture> {
        let origin = self.origin_x?;
        if !self.dragging {
            if (x - origin).abs() < DRAG_SLOP {
                return None;
            }
            self.dragging = true;
        }

        let dx = x - self.last_x;
        self.last_x = x;
        (dx != 0.0).then_some(DialGesture::Dragged { dx, width })
    }

    pub fn release(&mut self) -> Option<DialGesture> {
        self.origin_x?;
        let gesture = if self.dragging {
            DialGesture::DragEnded
        } else {
            DialGesture::Released
        };
        *self = Self::default();
        Some(gesture)
    }
}

/// Everything the dial needs besides the countdown progress
#[derive(Debug, Clone)]
pub struct DialState {
    pub ticks: [TickMark; TICK_COUNT],
    pub colors: TimerColors,
    pub layout: DialLayout,
    pub leaf: Option<LeafStyle>,
    pub debug_guides: bool,
    pub size: f32,
}

impl Default for DialState {
    fn default() -> Self {
        Self::for_skin(FruitSkin::default())
    }
}

impl DialState {
    pub fn for_skin(skin: FruitSkin) -> Self {
        Self {
            ticks: tick_marks(),
            colors: skin.colors(),
            layout: DialLayout::default(),
            leaf: Some(skin.leaf()),
            debug_guides: false,
            size: DIAL_SIZE,
        }
    }

    /// Switch colors and leaf, keeping the tick set and layout
    pub fn set_skin(&mut self, skin: FruitSkin) {
        self.colors = skin.colors();
        self.leaf = Some(skin.leaf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_is_press_then_release() {
        let mut t = GestureTracker::default();
        assert_eq!(t.press(100.0), DialGesture::Pressed);
        // Jitter below the slop is ignored
        assert_eq!(t.moved(103.0, 300.0), None);
        assert_eq!(t.release(), Some(DialGesture::Released));
        assert!(!t.is_pressed());
    }

    #[test]
    fn test_drag_reports_incremental_steps() {
        let mut t = GestureTracker::default();
        t.press(200.0);
        assert_eq!(
            t.moved(190.0, 300.0),
            Some(DialGesture::Dragged {
                dx: -10.0,
                width: 300.0
            })
        );
        assert_eq!(
            t.moved(185.0, 300.0),
            Some(DialGesture::Dragged {
                dx: -5.0,
                width: 300.0
            })
        );
        // Once dragging, small moves are reported too
        assert_eq!(
            t.moved(186.0, 300.0),
            Some(DialGesture::Dragged {
                dx: 1.0,
                width: 300.0
            })
        );
        assert_eq!(t.release(), Some(DialGesture::DragEnded));
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut t = GestureTracker::default();
        assert_eq!(t.moved(50.0, 300.0), None);
        assert_eq!(t.release(), None);
    }

    #[test]
    fn test_set_skin_keeps_ticks() {
        let mut state = DialState::default();
        assert_eq!(state.colors, FruitSkin::Tomato.colors());
        state.set_skin(FruitSkin::Lemon);
        assert_eq!(state.colors, FruitSkin::Lemon.colors());
        assert_eq!(state.leaf, Some(FruitSkin::Lemon.leaf()));
        assert_eq!(state.ticks.len(), TICK_COUNT);
    }
}
