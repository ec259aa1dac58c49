//! Kitchen Core - dial geometry and countdown logic for the kitchen timer
//!
//! Everything in this crate is GUI-agnostic:
//!
//! - **math**: range normalization shared by every other module
//! - **color**: RGBA colors and the per-skin `TimerColors` record
//! - **dial**: tick marks, spherical projection, the fake-3D perspective
//!   stage and composition of a frame into a `DialScene` display list
//! - **countdown**: the editing/running state machine, drag accumulation and
//!   the cancellable `CountdownTask` that drives a running timer
//!
//! Widgets (see `kitchen-widgets`) only rasterize a `DialScene` and translate
//! pointer events into calls on `KitchenTimer`.

pub mod color;
pub mod countdown;
pub mod dial;
pub mod math;

pub use color::{ColorParseError, Rgba, TimerColors};
pub use countdown::{
    Callbacks, CountdownTask, DragAccumulator, EventForwarder, KitchenTimer, Phase, RunEvent,
    SharedTimer, TimerEvent, TimerListener, TimerMode, DEFAULT_DRAG_SENSITIVITY,
    DEFAULT_TICK_PERIOD, HOUR_MILLIS, MINUTE_MILLIS,
};
pub use dial::{
    compose_scene, tick_marks, CanvasSize, DialLayout, DialScene, ProjectedPoint, Projector,
    TickMark, TICK_COUNT,
};
pub use math::{normalize, try_normalize, RangeError, TWO_PI};
