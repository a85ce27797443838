//! # Panes Render
//!
//! A recording drawing backend for `panes-core`. Every frame rendered into a
//! [`RecordingBackend`] is captured as a [`RenderFrame`] of device-space draw
//! commands, which can be inspected directly or serialized to JSON for a
//! canvas living elsewhere (a browser, a test fixture).

pub mod recorder;
pub mod render_data;

pub use recorder::RecordingBackend;
pub use render_data::{DrawCommand, RenderFrame};
