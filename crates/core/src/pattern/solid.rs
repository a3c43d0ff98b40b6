use std::time::Duration;

use crate::{Chain, Pattern, Settings};

/// Holds every pixel at the configured base colour.
///
/// The colour is read from [`Settings`] on every tick, so a colour change
/// shows up on the next frame without restarting the pattern.
#[derive(Debug)]
pub struct Solid {
    delay: Duration,
    step: usize,
}

impl Solid {
    pub fn new(delay: Duration) -> Self {
        Self { delay, step: 0 }
    }
}

impl Pattern for Solid {
    fn advance(&mut self, chain: &mut Chain, settings: &Settings) -> Duration {
        chain.fill(settings.base_color);
        self.step += 1;
        self.delay
    }

    fn is_done(&self) -> bool {
        false
    }

    fn cursor(&self) -> usize {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    #[test]
    fn follows_base_colour_changes() {
        let mut chain = Chain::xmas().unwrap();
        let mut settings = Settings::default();
        let mut solid = Solid::new(Duration::from_secs(1));

        settings.base_color = Rgb::new(1, 2, 3);
        assert_eq!(solid.advance(&mut chain, &settings), Duration::from_secs(1));
        assert!(chain.frame().colors().all(|c| c == Rgb::new(1, 2, 3)));

        settings.base_color = Rgb::new(9, 8, 7);
        solid.advance(&mut chain, &settings);
        assert!(chain.frame().colors().all(|c| c == Rgb::new(9, 8, 7)));
        assert_eq!(solid.cursor(), 2);
        assert!(!solid.is_done());
    }
}
