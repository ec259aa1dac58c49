//! Colors for the timer dial
//!
//! Colors are stored as plain RGBA floats so this crate stays independent of
//! any GUI toolkit. In configuration files they are written as hex strings
//! (e.g. `"#D51E27"` or `"#00000080"`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a hex color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("hex color '{0}' must have 6 or 8 digits")]
    InvalidLength(String),
    #[error("hex color '{0}' contains a non-hex digit")]
    InvalidDigit(String),
}

/// An RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Build from a packed `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
        }
    }

    /// Same color with alpha multiplied by `alpha`
    pub fn scale_alpha(self, alpha: f32) -> Self {
        Self {
            a: (self.a * alpha).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(hex.to_string()));
        }
        // from_str_radix alone would let a sign through
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_string()));
        }

        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .map(|v| v as f32 / 255.0)
                .ok_or_else(|| ColorParseError::InvalidDigit(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.a) == 255 {
            format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Tomato red body
pub const DEFAULT_BACKGROUND: Rgba = Rgba::from_argb(0xFFD51E27);
/// Black seam arcs
pub const DEFAULT_ARC: Rgba = Rgba::from_argb(0xFF000000);
/// White strokes, numbers and pointer
pub const DEFAULT_SECONDS: Rgba = Rgba::from_argb(0xFFFFFFFF);

/// Color set for one timer skin
///
/// Supplied once per widget and never mutated afterwards. When read from
/// config, a missing `number` takes the `stroke` color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialColors")]
pub struct TimerColors {
    /// Body of the fruit
    pub background: Rgba,
    /// Tick strokes
    pub stroke: Rgba,
    /// Tick labels
    pub number: Rgba,
    /// Pointer triangle
    pub tracker: Rgba,
    /// Seam arcs
    pub arc: Rgba,
}

impl TimerColors {
    /// Colors where number, tracker and arc share one detail color
    pub const fn with_detail(background: Rgba, detail: Rgba) -> Self {
        Self {
            background,
            stroke: detail,
            number: detail,
            tracker: detail,
            arc: detail,
        }
    }
}

impl Default for TimerColors {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            stroke: DEFAULT_SECONDS,
            number: DEFAULT_SECONDS,
            tracker: DEFAULT_SECONDS,
            arc: DEFAULT_ARC,
        }
    }
}

/// Config form of [`TimerColors`] where every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialColors {
    background: Option<Rgba>,
    stroke: Option<Rgba>,
    number: Option<Rgba>,
    tracker: Option<Rgba>,
    arc: Option<Rgba>,
}

impl From<PartialColors> for TimerColors {
    fn from(partial: PartialColors) -> Self {
        let defaults = TimerColors::default();
        let stroke = partial.stroke.unwrap_or(defaults.stroke);
        Self {
            background: partial.background.unwrap_or(defaults.background),
            stroke,
            number: partial.number.unwrap_or(stroke),
            tracker: partial.tracker.unwrap_or(defaults.tracker),
            arc: partial.arc.unwrap_or(defaults.arc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let c = Rgba::from_hex("#D51E27").unwrap();
        assert_eq!(c, DEFAULT_BACKGROUND);
        assert_eq!(c.a, 1.0);

        let half = Rgba::from_hex("00000080").unwrap();
        assert!((half.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(
            Rgba::from_hex("#12345"),
            Err(ColorParseError::InvalidLength("#12345".to_string()))
        );
        assert_eq!(
            Rgba::from_hex("#GG0000"),
            Err(ColorParseError::InvalidDigit("#GG0000".to_string()))
        );
        assert_eq!(
            Rgba::from_hex("#+1+2+3"),
            Err(ColorParseError::InvalidDigit("#+1+2+3".to_string()))
        );
        assert!(Rgba::from_hex("-1FFFFFF").is_err());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(DEFAULT_BACKGROUND.to_hex(), "#D51E27");
        assert_eq!(Rgba::BLACK.scale_alpha(0.5).to_hex(), "#00000080");
    }

    #[test]
    fn test_colors_yaml() {
        let yaml = "background: '#FFA500'\nstroke: '#405F17'\n";
        let colors: TimerColors = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(colors.background, Rgba::from_argb(0xFFFFA500));
        assert_eq!(colors.stroke, Rgba::from_argb(0xFF405F17));
        // Missing fields fall back to the tomato defaults
        assert_eq!(colors.arc, DEFAULT_ARC);

        // number follows stroke unless given
        assert_eq!(colors.number, colors.stroke);

        let explicit: TimerColors =
            serde_yaml::from_str("stroke: '#405F17'\nnumber: '#000000'\n").unwrap();
        assert_eq!(explicit.number, Rgba::BLACK);

        let bad: Result<TimerColors, _> = serde_yaml::from_str("background: 'red'\n");
        assert!(bad.is_err());
    }
}
