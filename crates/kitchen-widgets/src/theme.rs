//! Fruit skins and color conversion
//!
//! A skin is just data: the dial colors plus where to draw the leaf.
//! The same dial widget renders every fruit.

use iced::Color;
use kitchen_core::{Rgba, TimerColors};
use serde::{Deserialize, Serialize};

/// Convert a core color into an iced color
pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Leaf shown on top of the fruit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafStyle {
    pub color: Rgba,
    /// Horizontal offset of the leaf centre from the dial centre
    pub offset_x: f32,
    /// Offset of the leaf centre below the top edge of the dial
    pub offset_y: f32,
    /// Leaf length in pixels
    pub length: f32,
}

const TOMATO_LEAF: Rgba = Rgba::from_argb(0xFF2E7D32);
const ORANGE_DETAIL: Rgba = Rgba::from_argb(0xFF405F17);
const LEMON_LEAF: Rgba = Rgba::from_argb(0xFF558B2F);

/// Available fruit skins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitSkin {
    #[default]
    Tomato,
    Orange,
    Lemon,
}

impl FruitSkin {
    pub const ALL: [FruitSkin; 3] = [FruitSkin::Tomato, FruitSkin::Orange, FruitSkin::Lemon];

    pub fn name(self) -> &'static str {
        match self {
            FruitSkin::Tomato => "Tomato",
            FruitSkin::Orange => "Orange",
            FruitSkin::Lemon => "Lemon",
        }
    }

    /// Parse a lowercase skin name (as used on the command line)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tomato" => Some(FruitSkin::Tomato),
            "orange" => Some(FruitSkin::Orange),
            "lemon" => Some(FruitSkin::Lemon),
            _ => None,
        }
    }

    pub fn colors(self) -> TimerColors {
        match self {
            FruitSkin::Tomato => TimerColors::default(),
            FruitSkin::Orange => TimerColors::with_detail(Rgba::from_argb(0xFFFFA500), ORANGE_DETAIL),
            FruitSkin::Lemon => TimerColors::with_detail(Rgba::from_argb(0xFFFFF44F), Rgba::BLACK),
        }
    }

    pub fn leaf(self) -> LeafStyle {
        match self {
            FruitSkin::Tomato => LeafStyle {
                color: TOMATO_LEAF,
                offset_x: 0.0,
                offset_y: 20.0,
                length: 90.0,
            },
            FruitSkin::Orange => LeafStyle {
                color: ORANGE_DETAIL,
                offset_x: 60.0,
                offset_y: 70.0,
                length: 80.0,
            },
            FruitSkin::Lemon => LeafStyle {
                color: LEMON_LEAF,
                offset_x: 20.0,
                offset_y: 70.0,
                length: 80.0,
            },
        }
    }
}

impl std::fmt::Display for FruitSkin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
