//! Pane factories whose scale or extent is derived from the parent.
//!
//! Both produce ordinary panes in the [`PaneTree`]; nothing here adds new
//! runtime state to the tree.

use crate::error::ConfigError;
use crate::pane::{PaneId, PaneTree};
use crate::transform::Transform;

// ── Grid ─────────────────────────────────────────────────────────────

/// A pane that overlays its parent with a `rows x columns` grid.
///
/// One local unit is one cell: X counts columns and Y counts rows, so the
/// grid's extent is `(columns, rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pane: PaneId,
    rows: u32,
    columns: u32,
}

impl GridLayout {
    pub fn new(
        tree: &mut PaneTree,
        parent: PaneId,
        rows: u32,
        columns: u32,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::InvalidGrid { rows, columns });
        }
        let (pw, ph) = tree.extent(parent)?;
        let local = Transform::new(
            0.0,
            0.0,
            pw / f64::from(columns),
            ph / f64::from(rows),
        );
        let pane = tree.add_derived_pane(parent, local, (f64::from(columns), f64::from(rows)))?;
        log::debug!(
            "Grid {} is {}x{} over {}x{}",
            pane,
            rows,
            columns,
            pw,
            ph
        );
        Ok(Self {
            pane,
            rows,
            columns,
        })
    }

    pub fn pane(&self) -> PaneId {
        self.pane
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// X coordinate, in `relative_to`'s units, of a fractional column.
    ///
    /// Used to align content that lives outside the grid (labels, say) with
    /// the grid's columns. `relative_to` must be the grid or an ancestor.
    pub fn x_out(
        &self,
        tree: &PaneTree,
        column: f64,
        relative_to: PaneId,
    ) -> Result<f64, ConfigError> {
        Ok(tree
            .transform_relative_to(self.pane, relative_to)?
            .apply_x(column))
    }

    /// Y coordinate, in `relative_to`'s units, of a fractional row.
    pub fn y_out(&self, tree: &PaneTree, row: f64, relative_to: PaneId) -> Result<f64, ConfigError> {
        Ok(tree
            .transform_relative_to(self.pane, relative_to)?
            .apply_y(row))
    }
}

// ── Frame ────────────────────────────────────────────────────────────

/// Space reserved around a framed pane, in the parent's units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Inset `parent` by `margins`.
///
/// The framed pane keeps the parent's units; its origin moves to the inner
/// top-left corner and its extent shrinks to the interior.
pub fn framed(
    tree: &mut PaneTree,
    parent: PaneId,
    margins: Margins,
) -> Result<PaneId, ConfigError> {
    let (pw, ph) = tree.extent(parent)?;
    if pw == 0.0 || ph == 0.0 {
        return Err(ConfigError::ZeroExtent);
    }
    let width = pw - margins.left - margins.right;
    let height = ph - margins.top - margins.bottom;
    if width <= 0.0 || height <= 0.0 {
        return Err(ConfigError::MarginsExceedExtent { width, height });
    }
    let local = Transform::new(margins.left, margins.top, 1.0, 1.0);
    tree.add_derived_pane(parent, local, (width, height))
}
