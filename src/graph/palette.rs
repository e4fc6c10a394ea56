//! Line colors.
//!
//! Cores 1..=9 always take the fixed palette in order. What happens past the
//! ninth core is a `PalettePolicy` decision.

use crate::graph::GraphError;
use serde::{Serialize, Serializer};
use std::fmt;

/// An RGB color, rendered as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);

    /// HSL to RGB; `hue` in degrees, `saturation`/`lightness` in [0, 1].
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0);
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fixed core colors: purple-grey, pink, brown, luminous green, pink-purple,
/// orange, light blue, dark green, dark blue.
pub const CORE_PALETTE: [Color; 9] = [
    Color::rgb(0xFF, 0x91, 0xC5),
    Color::rgb(0xFC, 0x00, 0xEC),
    Color::rgb(0xA6, 0x52, 0x4C),
    Color::rgb(0x26, 0xFF, 0x00),
    Color::rgb(0xC6, 0x00, 0xFC),
    Color::rgb(0xFF, 0xA6, 0x00),
    Color::rgb(0x78, 0xB7, 0xFA),
    Color::rgb(0x08, 0x80, 0x40),
    Color::rgb(0x43, 0x00, 0xFC),
];

const GOLDEN_ANGLE: f64 = 137.508;
const GENERATED_SATURATION: f64 = 0.65;
const GENERATED_LIGHTNESS: f64 = 0.5;

/// How cores beyond the fixed palette are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PalettePolicy {
    /// Refuse machines with more cores than palette entries.
    #[default]
    Strict,
    /// Wrap around to the first palette entry.
    Cycle,
    /// Derive extra colors by rotating the hue around the color wheel.
    Generated,
}

impl PalettePolicy {
    /// Color for 1-based `core`, checked against the whole machine's `cores`.
    pub fn color_for_core(self, core: usize, cores: usize) -> Result<Color, GraphError> {
        let size = CORE_PALETTE.len();
        if core >= 1 && core <= size {
            return Ok(CORE_PALETTE[core - 1]);
        }

        match self {
            PalettePolicy::Strict => Err(GraphError::PaletteExhausted {
                cores,
                palette_size: size,
            }),
            PalettePolicy::Cycle => Ok(CORE_PALETTE[core.saturating_sub(1) % size]),
            PalettePolicy::Generated => {
                let hue = core.saturating_sub(1) as f64 * GOLDEN_ANGLE;
                Ok(Color::from_hsl(hue, GENERATED_SATURATION, GENERATED_LIGHTNESS))
            }
        }
    }
}
