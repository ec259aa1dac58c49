//! Skin selection, mode checkbox and remaining-time label

use iced::widget::{button, checkbox, row, text};
use iced::{Alignment, Element, Length};
use kitchen_widgets::FruitSkin;

use super::cues::display_seconds;
use super::message::Message;

/// Format a remaining time as `mm:ss` (hours roll into minutes)
pub fn format_remaining(remaining_ms: u64) -> String {
    let seconds = display_seconds(remaining_ms);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Remaining time label shown under the dial
pub fn time_label<'a>(remaining_ms: u64) -> Element<'a, Message> {
    text(format_remaining(remaining_ms)).size(32).into()
}

/// One button per fruit; the selected skin is highlighted
pub fn fruit_buttons<'a>(selected: FruitSkin) -> Element<'a, Message> {
    let buttons: Vec<Element<Message>> = FruitSkin::ALL
        .iter()
        .map(|&skin| {
            button(text(skin.name()).size(20))
                .on_press(Message::SelectFruit(skin))
                .style(if skin == selected {
                    iced::widget::button::primary
                } else {
                    iced::widget::button::secondary
                })
                .width(Length::Shrink)
                .into()
        })
        .collect();

    row(buttons).spacing(10).align_y(Alignment::Center).into()
}

/// "One minute mode" checkbox; unchecked means one turn is an hour
pub fn mode_checkbox<'a>(minute_mode: bool) -> Element<'a, Message> {
    checkbox(minute_mode)
        .label("One minute mode")
        .on_toggle(Message::SetMinuteMode)
        .size(18)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(10_000), "00:10");
        assert_eq!(format_remaining(9_001), "00:10");
        assert_eq!(format_remaining(60_000), "01:00");
        assert_eq!(format_remaining(3_600_000), "60:00");
        assert_eq!(format_remaining(754_500), "12:35");
    }
}
