use panes_core::{Backend, BackendError, Point, Rgb};

use crate::render_data::{DrawCommand, RenderFrame};

/// A [`Backend`] that keeps every presented frame in memory.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    surface: Option<(f64, f64)>,
    current: RenderFrame,
    frames: Vec<RenderFrame>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface_size(&self) -> Option<(f64, f64)> {
        self.surface
    }

    /// Frames presented so far, oldest first.
    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    /// Commands drawn since the last present.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.current.commands
    }

    pub fn take_frames(&mut self) -> Vec<RenderFrame> {
        std::mem::take(&mut self.frames)
    }

    fn require_surface(&self) -> Result<(), BackendError> {
        match self.surface {
            Some(_) => Ok(()),
            None => Err(BackendError::Draw("no surface".to_string())),
        }
    }
}

impl Backend for RecordingBackend {
    fn init_surface(&mut self, width: f64, height: f64) -> Result<(), BackendError> {
        if self.surface.is_some() {
            return Err(BackendError::Surface("surface already created".to_string()));
        }
        self.surface = Some((width, height));
        self.current = RenderFrame::empty(0, width, height);
        log::debug!("Recording surface {}x{}", width, height);
        Ok(())
    }

    fn draw_polygon(
        &mut self,
        points: &[Point],
        fill: Rgb,
        stroke_width: u32,
    ) -> Result<(), BackendError> {
        self.require_surface()?;
        self.current
            .commands
            .push(DrawCommand::polygon(points, fill, stroke_width));
        Ok(())
    }

    fn draw_polyline(
        &mut self,
        points: &[Point],
        color: Rgb,
        width: u32,
    ) -> Result<(), BackendError> {
        self.require_surface()?;
        self.current
            .commands
            .push(DrawCommand::polyline(points, color, width));
        Ok(())
    }

    fn present(&mut self) -> Result<(), BackendError> {
        let (width, height) = self
            .surface
            .ok_or_else(|| BackendError::Present("no surface".to_string()))?;
        let next = RenderFrame::empty(self.current.index + 1, width, height);
        let done = std::mem::replace(&mut self.current, next);
        log::debug!(
            "Recorded frame {} with {} commands",
            done.index,
            done.commands.len()
        );
        self.frames.push(done);
        Ok(())
    }

    fn clear(&mut self, color: Rgb) -> Result<(), BackendError> {
        self.require_surface()?;
        self.current.commands.clear();
        self.current.background = Some(color);
        Ok(())
    }
}
