//! UI module for the kitchen timer
//!
//! Built with iced. The dial itself lives in `kitchen-widgets`; this module
//! wires it to the countdown state, the cue sink and the preference file.

pub mod app;
pub mod controls;
pub mod cues;
pub mod message;

pub use app::{KitchenApp, StartupOptions};
pub use message::Message;
