//! # Panes Core
//!
//! A retained-mode 2D scene graph. A tree of nested coordinate frames
//! ("panes") holds polygons, polylines and child panes; every pane is
//! offset and scaled relative to its parent, and rendering composes those
//! relative frames into device coordinates on the way down the tree.
//!
//! Rasterization is delegated to a [`Backend`] wrapped in a [`Canvas`].

pub mod backend;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pane;
pub mod primitive;
pub mod transform;

pub use backend::{Backend, Canvas};
pub use config::{Style, SurfaceConfig};
pub use error::{BackendError, ConfigError, PanesError, ValidationError};
pub use geometry::{Point, Rgb};
pub use layout::{framed, GridLayout, Margins};
pub use pane::{Content, Pane, PaneId, PaneOptions, PaneTree};
pub use primitive::{grid_cell_rectangle, Primitive, PrimitiveKind};
pub use transform::Transform;
