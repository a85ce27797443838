use serde::{Deserialize, Serialize};

use crate::geometry::Rgb;

/// Size and background of the drawing surface.
///
/// The surface size is also the extent of every root pane drawn on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    /// Colour the surface is cleared to after each presented frame.
    pub background: Rgb,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            background: Rgb::WHITE,
        }
    }
}

impl SurfaceConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Fill colour and stroke width of a primitive.
///
/// A stroke of 0 means filled with no outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Rgb,
    pub stroke: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Rgb::RED,
            stroke: 0,
        }
    }
}

impl Style {
    pub fn filled(fill: Rgb) -> Self {
        Self { fill, stroke: 0 }
    }

    pub fn stroked(fill: Rgb, stroke: u32) -> Self {
        Self { fill, stroke }
    }
}
