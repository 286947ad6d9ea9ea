//! Stroke and fill styling for scene objects

use serde::{Deserialize, Serialize};

/// RGB color with components in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        // Near-black default matching the board's initial pen color
        Self::from_rgb8(0x1d, 0x1d, 0x1d)
    }
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color from 8-bit channel values
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255), fully opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// Per-object stroke/fill settings, fixed at creation and replaced
/// wholesale by style propagation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    pub stroke: Color,
    pub stroke_width: f32,
    /// Dash segment/gap lengths, solid when `None`
    pub dash: Option<[f32; 2]>,
    /// Fill color, hollow when `None`
    pub fill: Option<Color>,
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            stroke: Color::default(),
            stroke_width: 4.0,
            dash: None,
            fill: None,
        }
    }
}

/// The currently active drawing settings, adopted by new objects and
/// propagated to the selection while the select tool is active
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveStyle {
    pub color: Color,
    pub stroke_width: f32,
    pub dashed: bool,
}

impl Default for ActiveStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            stroke_width: 4.0,
            dashed: false,
        }
    }
}

impl ActiveStyle {
    /// Dash pattern derived from the stroke width, `None` when solid
    pub fn dash_pattern(&self) -> Option<[f32; 2]> {
        self.dashed
            .then(|| [self.stroke_width * 3.0, self.stroke_width * 2.0])
    }

    /// Style for a hollow shape outline (circle, rect, open path)
    pub fn outline_style(&self) -> ObjectStyle {
        ObjectStyle {
            stroke: self.color,
            stroke_width: self.stroke_width,
            dash: self.dash_pattern(),
            fill: None,
        }
    }

    /// Style for a line segment; lines also carry the color as fill so
    /// a later arrow head grouped with them renders solid
    pub fn line_style(&self) -> ObjectStyle {
        ObjectStyle {
            fill: Some(self.color),
            ..self.outline_style()
        }
    }
}
