use serde::{Deserialize, Serialize};

use crate::backend::{Backend, Canvas};
use crate::config::Style;
use crate::error::{BackendError, ValidationError};
use crate::geometry::Point;
use crate::transform::Transform;

/// Whether a primitive is drawn closed and filled, or as an open path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Closed shape. Closing it (first point == last point) is up to the caller.
    Polygon,
    Polyline,
}

/// A leaf drawable: points in the owning pane's local units plus style.
///
/// Geometry is validated when the primitive is built and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    kind: PrimitiveKind,
    points: Vec<Point>,
    style: Style,
}

impl Primitive {
    pub fn polygon(points: Vec<Point>, style: Style) -> Result<Self, ValidationError> {
        Self::new(PrimitiveKind::Polygon, points, style)
    }

    pub fn polyline(points: Vec<Point>, style: Style) -> Result<Self, ValidationError> {
        Self::new(PrimitiveKind::Polyline, points, style)
    }

    pub fn new(
        kind: PrimitiveKind,
        points: Vec<Point>,
        style: Style,
    ) -> Result<Self, ValidationError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ValidationError::NonFinite { index });
        }
        Ok(Self {
            kind,
            points,
            style,
        })
    }

    /// Build from raw coordinate slices, each of which must be an `[x, y]` pair.
    pub fn from_coords<C: AsRef<[f64]>>(
        kind: PrimitiveKind,
        coords: &[C],
        style: Style,
    ) -> Result<Self, ValidationError> {
        let mut points = Vec::with_capacity(coords.len());
        for (index, c) in coords.iter().enumerate() {
            match c.as_ref() {
                &[x, y] => points.push(Point::new(x, y)),
                other => {
                    return Err(ValidationError::Arity {
                        index,
                        len: other.len(),
                    })
                }
            }
        }
        Self::new(kind, points, style)
    }

    /// Closed rectangle covering grid cell `(row, col)`.
    pub fn grid_cell(row: u32, col: u32, style: Style) -> Result<Self, ValidationError> {
        Self::polygon(grid_cell_rectangle(row, col), style)
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Map every point through `transform` and issue one draw call.
    pub fn render<B: Backend>(
        &self,
        transform: &Transform,
        canvas: &mut Canvas<B>,
    ) -> Result<(), BackendError> {
        let device = transform.apply_all(&self.points);
        log::trace!("Drawing {:?} with {} points", self.kind, device.len());
        match self.kind {
            PrimitiveKind::Polygon => {
                canvas.draw_polygon(&device, self.style.fill, self.style.stroke)
            }
            PrimitiveKind::Polyline => {
                canvas.draw_polyline(&device, self.style.fill, self.style.stroke.max(1))
            }
        }
    }
}

/// Corners of grid cell `(row, col)` as a closed 5-point ring.
///
/// Rows run along Y and columns along X, so the first corner is `(col, row)`.
pub fn grid_cell_rectangle(row: u32, col: u32) -> Vec<Point> {
    let (x, y) = (f64::from(col), f64::from(row));
    vec![
        Point::new(x, y),
        Point::new(x, y + 1.0),
        Point::new(x + 1.0, y + 1.0),
        Point::new(x + 1.0, y),
        Point::new(x, y),
    ]
}
