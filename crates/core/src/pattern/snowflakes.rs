use std::time::Duration;

use rand::Rng;

use crate::{Chain, Pattern, Rgb, Settings};

/// White flakes falling one row per tick through a red background.
///
/// Flakes spawn at row 0 in a random column and are dropped once they have
/// spent a tick on the bottom row. A fresh instance starts with no flakes.
#[derive(Debug)]
pub struct Snowflakes<R> {
    rng: R,
    columns: usize,
    last_row: usize,
    chance: f64,
    steps: usize,
    delay: Duration,
    step: usize,
    flakes: Vec<(usize, usize)>,
}

impl<R: Rng> Snowflakes<R> {
    pub fn new(rng: R, chain: &Chain, chance: f64, steps: usize, delay: Duration) -> Self {
        Self {
            rng,
            columns: chain.columns().len(),
            last_row: chain.rows().len().saturating_sub(1),
            chance,
            steps: steps.max(1),
            delay,
            step: 0,
            flakes: Vec::new(),
        }
    }

    /// Active flakes as `(column, row)`.
    pub fn flakes(&self) -> &[(usize, usize)] {
        &self.flakes
    }

    fn fall(&mut self) {
        let last_row = self.last_row;
        self.flakes.retain(|&(_, row)| row < last_row);
        for flake in &mut self.flakes {
            flake.1 += 1;
        }

        if self.columns > 0 && self.rng.gen::<f64>() < self.chance {
            let column = self.rng.gen_range(0..self.columns);
            tracing::trace!(column, "new flake");
            self.flakes.push((column, 0));
        }
    }
}

impl<R: Rng + Send + std::fmt::Debug> Pattern for Snowflakes<R> {
    fn advance(&mut self, chain: &mut Chain, _settings: &Settings) -> Duration {
        self.fall();

        for pixel in chain.pixels_mut() {
            if self.flakes.contains(&(pixel.x(), pixel.y())) {
                pixel.set(Rgb::WHITE);
            } else {
                pixel.set(Rgb::RED);
            }
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

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn grid(columns: usize, rows: usize) -> Chain {
        let layout: Vec<(usize, usize)> = (0..rows)
            .flat_map(|y| (0..columns).map(move |x| (x, y)))
            .collect();
        Chain::build(&layout).unwrap()
    }

    fn snow(chain: &Chain, chance: f64) -> Snowflakes<StdRng> {
        Snowflakes::new(StdRng::seed_from_u64(7), chain, chance, 100, Duration::ZERO)
    }

    #[test]
    fn flake_reaches_bottom_then_disappears() {
        let mut chain = grid(1, 5);
        let settings = Settings::default();
        let mut snowflakes = snow(&chain, 1.0);

        snowflakes.advance(&mut chain, &settings);
        assert_eq!(snowflakes.flakes(), &[(0, 0)]);

        snowflakes.chance = 0.0;
        for row in 1..=4 {
            snowflakes.advance(&mut chain, &settings);
            assert_eq!(snowflakes.flakes(), &[(0, row)]);
        }

        snowflakes.advance(&mut chain, &settings);
        assert!(snowflakes.flakes().is_empty());
    }

    #[test]
    fn at_most_one_new_flake_per_tick() {
        let mut chain = grid(6, 5);
        let settings = Settings::default();
        let mut snowflakes = snow(&chain, 0.7);

        for _ in 0..50 {
            let before = snowflakes.flakes().len();
            let dropping = snowflakes.flakes().iter().filter(|&&(_, row)| row == 4).count();
            snowflakes.advance(&mut chain, &settings);
            let after = snowflakes.flakes().len();
            assert!(after + dropping >= before);
            assert!(after + dropping <= before + 1);
            assert!(snowflakes.flakes().iter().all(|&(column, _)| column < 6));
        }
    }

    #[test]
    fn renders_white_flakes_on_red() {
        let mut chain = grid(3, 2);
        let mut snowflakes = snow(&chain, 1.0);
        snowflakes.advance(&mut chain, &Settings::default());

        let (column, row) = snowflakes.flakes()[0];
        for pixel in chain.pixels() {
            let expected = if (pixel.x(), pixel.y()) == (column, row) {
                Rgb::WHITE
            } else {
                Rgb::RED
            };
            assert_eq!(pixel.color, expected);
        }
    }

    #[test]
    fn no_chance_means_no_snow() {
        let mut chain = grid(3, 3);
        let mut snowflakes = snow(&chain, 0.0);
        for _ in 0..10 {
            snowflakes.advance(&mut chain, &Settings::default());
        }
        assert!(snowflakes.flakes().is_empty());
        assert!(chain.frame().colors().all(|c| c == Rgb::RED));
    }
}
