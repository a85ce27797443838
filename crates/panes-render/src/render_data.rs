use serde::{Deserialize, Serialize};

use panes_core::{Point, Rgb};

/// One backend call, in device coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Polygon {
        /// Flat array of vertices: [x0, y0, x1, y1, ...]
        vertices: Vec<f64>,
        fill: Rgb,
        stroke_width: u32,
    },
    Polyline {
        vertices: Vec<f64>,
        color: Rgb,
        width: u32,
    },
}

impl DrawCommand {
    pub fn polygon(points: &[Point], fill: Rgb, stroke_width: u32) -> Self {
        DrawCommand::Polygon {
            vertices: flatten(points),
            fill,
            stroke_width,
        }
    }

    pub fn polyline(points: &[Point], color: Rgb, width: u32) -> Self {
        DrawCommand::Polyline {
            vertices: flatten(points),
            color,
            width,
        }
    }

    pub fn vertices(&self) -> &[f64] {
        match self {
            DrawCommand::Polygon { vertices, .. } | DrawCommand::Polyline { vertices, .. } => {
                vertices
            }
        }
    }

    /// Vertices paired back up into points.
    pub fn points(&self) -> Vec<Point> {
        self.vertices()
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect()
    }
}

fn flatten(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Everything drawn between two presents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderFrame {
    pub index: u64,
    pub width: f64,
    pub height: f64,
    /// Colour the surface held before the first command was drawn.
    pub background: Option<Rgb>,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    pub fn empty(index: u64, width: f64, height: f64) -> Self {
        Self {
            index,
            width,
            height,
            background: None,
            commands: Vec::new(),
        }
    }

    pub fn polygon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
