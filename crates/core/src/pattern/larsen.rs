use std::time::Duration;

use crate::{Chain, Pattern, Rgb, Settings};

/// Bouncing red scanner with a fading tail.
///
/// The scan position runs from column `0` to `columns + overshoot - 1`, then
/// back down to `1 - overshoot`. Positions outside the column range light
/// nothing, so the tail fades out at each end before the scanner returns.
#[derive(Debug)]
pub struct Larsen {
    columns: usize,
    overshoot: usize,
    dim_factor: f32,
    delay: Duration,
    step: usize,
}

impl Larsen {
    pub fn new(columns: usize, overshoot: usize, dim_factor: f32, delay: Duration) -> Self {
        Self {
            columns,
            overshoot,
            dim_factor,
            delay,
            step: 0,
        }
    }

    fn forward_len(&self) -> usize {
        self.columns + self.overshoot
    }

    /// Total ticks in one forward and backward sweep.
    pub fn sweep_len(&self) -> usize {
        (2 * self.forward_len()).saturating_sub(1)
    }

    /// Column scanned at `step`. May fall outside the chain's columns.
    pub fn scan_position(&self, step: usize) -> isize {
        let forward = self.forward_len();
        if step < forward {
            step as isize
        } else {
            self.columns as isize - 1 - (step - forward) as isize
        }
    }
}

impl Pattern for Larsen {
    fn advance(&mut self, chain: &mut Chain, _settings: &Settings) -> Duration {
        if self.step == 0 {
            chain.fill(Rgb::BLACK);
        }

        let position = self.scan_position(self.step);
        for pixel in chain.pixels_mut() {
            if pixel.x() as isize == position {
                pixel.set(Rgb::RED);
            } else {
                pixel.dim(self.dim_factor);
            }
        }

        self.step += 1;
        self.delay
    }

    fn is_done(&self) -> bool {
        self.step >= self.sweep_len()
    }

    fn cursor(&self) -> usize {
        self.step
    }
}
