use std::time::Duration;

use crate::{Chain, Pattern, Rgb, Settings};

/// Lights one pixel at a time in chain order. Handy for checking wiring.
#[derive(Debug)]
pub struct Walk {
    len: usize,
    delay: Duration,
    step: usize,
}

impl Walk {
    pub fn new(len: usize, delay: Duration) -> Self {
        Self {
            len,
            delay,
            step: 0,
        }
    }
}

impl Pattern for Walk {
    fn advance(&mut self, chain: &mut Chain, _settings: &Settings) -> Duration {
        chain.fill(Rgb::BLACK);
        if let Some(pixel) = chain.pixels_mut().get_mut(self.step) {
            pixel.set(Rgb::RED);
        }
        self.step += 1;
        self.delay
    }

    fn is_done(&self) -> bool {
        self.step >= self.len
    }

    fn cursor(&self) -> usize {
        self.step
    }
}
