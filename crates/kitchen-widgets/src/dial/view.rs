//! Dial view function
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     let dial = kitchen_dial(&self.dial, self.progress, Message::Dial);
//!     column![dial, /* controls */].into()
//! }
//! ```

use iced::widget::Canvas;
use iced::{Element, Length};

use super::{DialCanvas, DialGesture, DialState};

/// Create a square dial element of `state.size` pixels
///
/// * `progress` - fraction of a full turn left, in `[0, 1]`
/// * `on_gesture` - called for every press, drag step and release
pub fn kitchen_dial<'a, Message>(
    state: &'a DialState,
    progress: f32,
    on_gesture: impl Fn(DialGesture) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(DialCanvas {
        state,
        progress: progress.clamp(0.0, 1.0),
        on_gesture,
    })
    .width(Length::Fixed(state.size))
    .height(Length::Fixed(state.size))
    .into()
}
