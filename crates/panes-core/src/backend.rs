//! Drawing backend contract and the surface context that owns it.
//!
//! The rasterizer is an external collaborator. A [`Backend`] only has to
//! create a surface, draw device-space polygons and polylines, present a
//! frame and clear the surface. [`Canvas`] wraps one backend together with
//! its [`SurfaceConfig`] and is passed explicitly to root-pane construction
//! and to every render call, so there is no hidden global surface.

use crate::config::SurfaceConfig;
use crate::error::BackendError;
use crate::geometry::{Point, Rgb};

/// A rasterizer that panes render into.
pub trait Backend {
    /// Create the display surface. Called at most once per [`Canvas`].
    fn init_surface(&mut self, width: f64, height: f64) -> Result<(), BackendError>;

    /// Draw a closed polygon. A `stroke_width` of 0 means filled only.
    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Rgb,
        stroke_width: u32,
    ) -> Result<(), BackendError>;

    /// Draw an open path through `points`.
    fn draw_polyline(&mut self, points: &[Point], color: Rgb, width: u32)
        -> Result<(), BackendError>;

    /// Show the frame drawn so far.
    fn present(&mut self) -> Result<(), BackendError>;

    /// Blank the surface for the next frame.
    fn clear(&mut self, color: Rgb) -> Result<(), BackendError>;
}

/// The one drawing surface shared by every pane tree rendered on it.
#[derive(Debug)]
pub struct Canvas<B: Backend> {
    backend: B,
    config: SurfaceConfig,
    surface_ready: bool,
    frames_presented: u64,
}

impl<B: Backend> Canvas<B> {
    pub fn new(backend: B, config: SurfaceConfig) -> Self {
        Self {
            backend,
            config,
            surface_ready: false,
            frames_presented: 0,
        }
    }

    /// Create the surface on first use; later calls are no-ops.
    pub fn ensure_surface(&mut self) -> Result<(), BackendError> {
        if self.surface_ready {
            return Ok(());
        }
        self.backend
            .init_surface(self.config.width, self.config.height)?;
        self.backend.clear(self.config.background)?;
        self.surface_ready = true;
        log::info!(
            "Surface created: {}x{}",
            self.config.width,
            self.config.height
        );
        Ok(())
    }

    pub fn is_surface_ready(&self) -> bool {
        self.surface_ready
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub(crate) fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Rgb,
        stroke_width: u32,
    ) -> Result<(), BackendError> {
        self.backend.draw_polygon(points, fill, stroke_width)
    }

    pub(crate) fn draw_polyline(
        &mut self,
        points: &[Point],
        color: Rgb,
        width: u32,
    ) -> Result<(), BackendError> {
        self.backend.draw_polyline(points, color, width)
    }

    /// Present the current frame, then clear to the background colour.
    pub fn finish_frame(&mut self) -> Result<(), BackendError> {
        self.backend.present()?;
        self.backend.clear(self.config.background)?;
        self.frames_presented += 1;
        log::debug!("Frame {} presented", self.frames_presented);
        Ok(())
    }
}
