mod bitmap;
mod strip;

use crate::Frame;

pub use bitmap::{BitmapRenderer, OutputMode};
pub use strip::StripRenderer;

/// Output sink for rendered frames.
///
/// Implementations must not fail the caller: I/O problems are logged and the
/// animation carries on. The dispatcher never issues concurrent calls.
pub trait Renderer: Send {
    /// Pushes the current colour of every pixel to the output.
    fn render(&mut self, frame: Frame<'_>);

    /// Updates the brightness scaling applied to subsequent frames.
    fn set_brightness(&mut self, level: u8);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: Frame<'_>) {
        (**self).render(frame);
    }

    fn set_brightness(&mut self, level: u8) {
        (**self).set_brightness(level);
    }
}

/// Fans each frame out to several renderers, one after another.
#[derive(Default)]
pub struct RenderGraph {
    outputs: Vec<Box<dyn Renderer>>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    pub fn register(&mut self, output: Box<dyn Renderer>) {
        self.outputs.push(output);
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl Renderer for RenderGraph {
    fn render(&mut self, frame: Frame<'_>) {
        for output in &mut self.outputs {
            output.render(frame);
        }
    }

    fn set_brightness(&mut self, level: u8) {
        for output in &mut self.outputs {
            output.set_brightness(level);
        }
    }
}

impl std::fmt::Debug for RenderGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderGraph")
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

/// Keeps every frame in memory. Used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub frames: Vec<Vec<crate::Rgb>>,
    pub brightness: Vec<u8>,
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: Frame<'_>) {
        self.frames.push(frame.colors().collect());
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness.push(level);
    }
}
