//! Application messages for kitchen-timer

use kitchen_core::RunEvent;
use kitchen_widgets::{DialGesture, FruitSkin};

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Periodic redraw while the dial is animating
    Frame,
    /// Pointer gesture on the dial
    Dial(DialGesture),
    /// Event from the countdown task
    Timer(RunEvent),
    /// Switch fruit skin
    SelectFruit(FruitSkin),
    /// Toggle between minute and hour mode
    SetMinuteMode(bool),
}
