use thiserror::Error;

use crate::pane::PaneId;

// ── Structural misuse ────────────────────────────────────────────────

/// Misuse of the tree-building API. Raised at construction time; the caller
/// has to fix the call site.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("every non-root pane must have a parent")]
    MissingParent,

    #[error("pane {0} does not belong to this tree")]
    UnknownPane(PaneId),

    #[error("grid dimensions must be positive, got {rows} rows x {columns} columns")]
    InvalidGrid { rows: u32, columns: u32 },

    #[error("pane {ancestor} is not an ancestor of pane {pane}")]
    NotAnAncestor { pane: PaneId, ancestor: PaneId },

    #[error("parent pane has zero extent")]
    ZeroExtent,

    #[error("margins leave no interior: {width} x {height} remaining")]
    MarginsExceedExtent { width: f64, height: f64 },

    #[error("tree has no pane ids left")]
    TreeFull,
}

// ── Primitive geometry ───────────────────────────────────────────────

/// Malformed primitive geometry, caught before any transform sees it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("point {index} has {len} coordinates, expected a pair")]
    Arity { index: usize, len: usize },

    #[error("point {index} has a non-numeric coordinate")]
    NonFinite { index: usize },
}

// ── Drawing backend ──────────────────────────────────────────────────

/// Failure reported by a drawing backend. Not recovered from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("surface creation failed: {0}")]
    Surface(String),

    #[error("draw call failed: {0}")]
    Draw(String),

    #[error("present failed: {0}")]
    Present(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
