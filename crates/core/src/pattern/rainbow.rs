use std::time::Duration;

use crate::{Chain, Pattern, Pixel, Rgb, Settings};

/// Which grouping of the chain a rainbow sweeps across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Columns,
    Rows,
}

impl Axis {
    fn bucket_count(self, chain: &Chain) -> usize {
        match self {
            Axis::Columns => chain.columns().len(),
            Axis::Rows => chain.rows().len(),
        }
    }

    fn coordinate(self, pixel: &Pixel) -> usize {
        match self {
            Axis::Columns => pixel.x(),
            Axis::Rows => pixel.y(),
        }
    }
}

/// Spreads the colour wheel across columns (or rows) and rotates it a little
/// further every step.
#[derive(Debug)]
pub struct Rainbow {
    axis: Axis,
    steps: usize,
    delay: Duration,
    step: usize,
}

impl Rainbow {
    pub fn new(axis: Axis, steps: usize, delay: Duration) -> Self {
        Self {
            axis,
            steps: steps.max(1),
            delay,
            step: 0,
        }
    }

    /// Hue of bucket `index` out of `count` at the current step.
    fn hue(&self, index: usize, count: usize) -> f32 {
        let rotation = 1.0 - self.step as f32 / self.steps as f32;
        index as f32 / count as f32 + rotation
    }
}

impl Pattern for Rainbow {
    fn advance(&mut self, chain: &mut Chain, _settings: &Settings) -> Duration {
        let count = self.axis.bucket_count(chain);
        let wheel: Vec<Rgb> = (0..count)
            .map(|index| Rgb::from_hue(self.hue(index, count)))
            .collect();

        for pixel in chain.pixels_mut() {
            let colour = wheel[self.axis.coordinate(pixel)];
            pixel.set(colour);
        }

        self.step += 1;
        self.delay
    }

    fn is_done(&self) -> bool {
        self.step >= self.steps
    }

    fn cursor(&self) -> usize {
        self.step
    }
}
