use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Maps a pane's local coordinates to device coordinates.
///
/// Translation plus independent X/Y scale; no rotation or shear. A
/// `Transform` is built fresh at every traversal step from a pane's local
/// parameters and its parent's already-composed transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Device-space origin of the pane.
    pub dx: f64,
    pub dy: f64,
    /// Cumulative scale factors.
    pub sfx: f64,
    pub sfy: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        dx: 0.0,
        dy: 0.0,
        sfx: 1.0,
        sfy: 1.0,
    };

    pub fn new(dx: f64, dy: f64, sfx: f64, sfy: f64) -> Self {
        Self { dx, dy, sfx, sfy }
    }

    /// Compose local parameters with the parent's accumulated transform.
    ///
    /// Without a parent the local parameters are taken verbatim. Otherwise
    /// the local offset is scaled by the parent's accumulated scale before
    /// being added to the parent's offset.
    pub fn compose(dx: f64, dy: f64, sfx: f64, sfy: f64, parent: Option<&Transform>) -> Self {
        match parent {
            None => Self { dx, dy, sfx, sfy },
            Some(p) => Self {
                dx: p.dx + p.sfx * dx,
                dy: p.dy + p.sfy * dy,
                sfx: p.sfx * sfx,
                sfy: p.sfy * sfy,
            },
        }
    }

    /// `self` followed by `local`, i.e. `local` expressed inside `self`.
    pub fn then(&self, local: &Transform) -> Self {
        Self::compose(local.dx, local.dy, local.sfx, local.sfy, Some(self))
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(self.apply_x(point.x), self.apply_y(point.y))
    }

    pub fn apply_x(&self, x: f64) -> f64 {
        self.dx + self.sfx * x
    }

    pub fn apply_y(&self, y: f64) -> f64 {
        self.dy + self.sfy * y
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply(*p)).collect()
    }

    /// Zero or negative scale on either axis collapses or mirrors geometry.
    pub fn is_degenerate(&self) -> bool {
        self.sfx <= 0.0 || self.sfy <= 0.0
    }
}
