//! iced widgets for the kitchen timer
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State structs**: Pure data (`DialState`)
//! - **View functions**: Take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: Rasterize the core `DialScene` and turn pointer
//!   events into `DialGesture`s
//!
//! ## View Functions
//!
//! - `kitchen_dial`: the 3D-styled countdown dial
//!
//! ## Subscriptions
//!
//! - `channel_subscription`: timer events from the countdown task

pub mod dial;
pub mod subscription;
pub mod theme;

pub use dial::{kitchen_dial, DialGesture, DialState, GestureTracker, DIAL_SIZE, DRAG_SLOP};
pub use subscription::{channel_subscription, shared_receiver, SharedReceiver};
pub use theme::{to_color, FruitSkin, LeafStyle};
