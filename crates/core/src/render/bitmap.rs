use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use image::RgbImage;

use crate::{Frame, RenderConfig, Renderer, Result};

/// Whether each frame replaces the previous image or gets its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Always write `<root>.png`.
    Single,
    /// Write `<root>0000.png`, `<root>0001.png`, ...
    Sequence,
}

/// Draws each frame as coloured disks on a grey canvas and saves it as PNG.
#[derive(Debug)]
pub struct BitmapRenderer {
    root: PathBuf,
    mode: OutputMode,
    config: RenderConfig,
    brightness: u8,
    index: usize,
}

impl BitmapRenderer {
    pub fn new(root: impl Into<PathBuf>, mode: OutputMode, config: RenderConfig) -> Self {
        let root = root.into();
        tracing::info!(root = %root.display(), ?mode, "creating bitmap output");
        Self {
            root,
            mode,
            config,
            brightness: u8::MAX,
            index: 0,
        }
    }

    /// File the next call to [`BitmapRenderer::write`] will produce.
    pub fn next_path(&self) -> PathBuf {
        let suffix = match self.mode {
            OutputMode::Single => ".png".to_string(),
            OutputMode::Sequence => format!("{:04}.png", self.index),
        };
        let mut name: OsString = self.root.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Paints `frame` into a new image sized to fit the layout.
    pub fn draw(&self, frame: Frame<'_>) -> RgbImage {
        let RenderConfig {
            x_spacing,
            y_spacing,
            radius,
            background,
        } = self.config.clone();

        let max_x = frame.pixels().iter().map(|p| p.x()).max().unwrap_or(0) as u32;
        let max_y = frame.pixels().iter().map(|p| p.y()).max().unwrap_or(0) as u32;
        let width = (max_x + 2) * x_spacing;
        let height = (max_y + 2) * y_spacing;

        let mut canvas = RgbImage::from_pixel(
            width,
            height,
            image::Rgb([background.r, background.g, background.b]),
        );

        let radius = i64::from(radius);
        for pixel in frame.pixels() {
            let colour = pixel.color.scaled(self.brightness);
            let fill = image::Rgb([colour.r, colour.g, colour.b]);
            let cx = (pixel.x() as i64 + 1) * i64::from(x_spacing);
            let cy = (pixel.y() as i64 + 1) * i64::from(y_spacing);

            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    let (px, py) = (cx + dx, cy + dy);
                    if px >= 0 && py >= 0 && px < i64::from(width) && py < i64::from(height) {
                        canvas.put_pixel(px as u32, py as u32, fill);
                    }
                }
            }
        }

        canvas
    }

    /// Draws and saves `frame`, returning the path written.
    pub fn write(&mut self, frame: Frame<'_>) -> Result<PathBuf> {
        let path = self.next_path();
        self.draw(frame).save(&path)?;
        self.index += 1;
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Renderer for BitmapRenderer {
    fn render(&mut self, frame: Frame<'_>) {
        match self.write(frame) {
            Ok(path) => tracing::trace!(path = %path.display(), "wrote frame"),
            Err(error) => tracing::warn!(%error, "bitmap render failed"),
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}
