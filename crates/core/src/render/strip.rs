use std::io::Write;

use crate::{Frame, Renderer, Result};

/// Streams frames to an addressable LED strip as raw GRB bytes.
///
/// The sink is whatever accepts the strip's byte stream: a device node for a
/// DMA/PWM driver, a serial port, or a plain file for inspection.
#[derive(Debug)]
pub struct StripRenderer<W> {
    sink: W,
    brightness: u8,
    buffer: Vec<u8>,
}

impl<W: Write> StripRenderer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            brightness: u8::MAX,
            buffer: Vec::new(),
        }
    }

    /// Three bytes per pixel, in chain order, brightness already applied.
    pub fn encode(&mut self, frame: Frame<'_>) -> &[u8] {
        self.buffer.clear();
        for colour in frame.colors() {
            self.buffer
                .extend_from_slice(&colour.scaled(self.brightness).grb());
        }
        &self.buffer
    }

    pub fn write_frame(&mut self, frame: Frame<'_>) -> Result<()> {
        self.encode(frame);
        self.sink.write_all(&self.buffer)?;
        self.sink.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write + Send> Renderer for StripRenderer<W> {
    fn render(&mut self, frame: Frame<'_>) {
        if let Err(error) = self.write_frame(frame) {
            tracing::warn!(%error, "strip render failed");
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::{Chain, Rgb};

    #[test]
    fn encodes_grb_with_brightness() {
        let mut chain = Chain::build(&[(0, 0), (1, 0)]).unwrap();
        chain.pixels_mut()[0].set(Rgb::new(200, 100, 50));
        chain.pixels_mut()[1].set(Rgb::new(0, 255, 0));

        let mut strip = StripRenderer::new(Vec::new());
        strip.set_brightness(128);
        strip.render(chain.frame());
        strip.render(chain.frame());

        let written = strip.into_inner();
        let expected_frame = [50, 100, 25, 128, 0, 0];
        assert_eq!(written.len(), 12);
        assert_eq!(&written[..6], &expected_frame);
        assert_eq!(&written[6..], &expected_frame);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_are_swallowed_by_render() {
        let chain = Chain::build(&[(0, 0)]).unwrap();
        let mut strip = StripRenderer::new(Broken);
        assert!(strip.write_frame(chain.frame()).is_err());
        strip.render(chain.frame());
    }
}
