// File: crates/plot-core/src/style.rs
// Summary: Line styling: color parsing, dash patterns, and point markers.

use std::str::FromStr;

use skia_safe as skia;

use crate::error::StyleError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// On/off intervals in units of the stroke width; `None` for solid.
    pub fn dash_intervals(self, width: f32) -> Option<Vec<f32>> {
        let unit: &[f32] = match self {
            LineStyle::Solid => return None,
            LineStyle::Dashed => &[3.7, 1.6],
            LineStyle::Dotted => &[1.0, 1.65],
            LineStyle::DashDot => &[6.4, 1.6, 1.0, 1.6],
        };
        let w = width.max(0.5);
        Some(unit.iter().map(|v| v * w).collect())
    }
}

impl FromStr for LineStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "solid" | "-" => Ok(LineStyle::Solid),
            "dashed" | "--" => Ok(LineStyle::Dashed),
            "dotted" | ":" => Ok(LineStyle::Dotted),
            "dashdot" | "-." => Ok(LineStyle::DashDot),
            _ => Err(StyleError::LineStyle(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Marker {
    #[default]
    None,
    Circle,
    Square,
    Triangle,
    Cross,
    Plus,
    Point,
}

impl FromStr for Marker {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Marker::None),
            "o" => Ok(Marker::Circle),
            "s" => Ok(Marker::Square),
            "^" => Ok(Marker::Triangle),
            "x" => Ok(Marker::Cross),
            "+" => Ok(Marker::Plus),
            "." => Ok(Marker::Point),
            _ => Err(StyleError::Marker(s.to_string())),
        }
    }
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("k", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("w", (255, 255, 255)),
    ("red", (220, 38, 38)),
    ("r", (220, 38, 38)),
    ("green", (22, 163, 74)),
    ("g", (22, 163, 74)),
    ("blue", (37, 99, 235)),
    ("b", (37, 99, 235)),
    ("cyan", (6, 182, 212)),
    ("c", (6, 182, 212)),
    ("magenta", (192, 38, 211)),
    ("m", (192, 38, 211)),
    ("yellow", (234, 179, 8)),
    ("y", (234, 179, 8)),
    ("orange", (234, 88, 12)),
    ("purple", (124, 58, 237)),
    ("pink", (219, 39, 119)),
    ("brown", (146, 64, 14)),
    ("gray", (107, 114, 128)),
    ("grey", (107, 114, 128)),
    ("navy", (30, 58, 138)),
    ("teal", (13, 148, 136)),
];

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a color name (case-insensitive).
pub fn parse_color(s: &str) -> Result<skia::Color, StyleError> {
    let t = s.trim();
    let err = || StyleError::Color(s.to_string());

    if let Some(hex) = t.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        return match hex.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| err());
                Ok(skia::Color::from_argb(255, nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(err()),
        };
    }

    let lower = t.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, (r, g, b))| skia::Color::from_argb(255, r, g, b))
        .ok_or_else(err)
}
