//! Library of animations over a [`Chain`].
//!
//! Every pattern is a small state machine: the dispatcher calls
//! [`Pattern::advance`] once per tick, which repaints some or all pixels and
//! returns how long to hold that frame. Finite patterns report
//! [`Pattern::is_done`] once their sequence is exhausted; the dispatcher then
//! starts a fresh instance from [`PatternKind::instantiate`].

mod larsen;
mod rainbow;
mod snowflakes;
mod solid;
mod walk;

use std::{fmt, str::FromStr, time::Duration};

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Chain, OrnamentError, PatternConfig, Result, Settings};

pub use larsen::Larsen;
pub use rainbow::{Axis, Rainbow};
pub use snowflakes::Snowflakes;
pub use solid::Solid;
pub use walk::Walk;

/// A resumable animation.
pub trait Pattern: fmt::Debug + Send {
    /// Paints the next frame into `chain` and returns the delay before the
    /// following tick.
    fn advance(&mut self, chain: &mut Chain, settings: &Settings) -> Duration;

    /// Whether the sequence has run out of ticks. Infinite patterns never
    /// finish.
    fn is_done(&self) -> bool;

    /// Number of ticks produced so far.
    fn cursor(&self) -> usize;
}

/// Names of every registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Static,
    Walk,
    RainbowCols,
    RainbowRows,
    Larsen,
    Snowflakes,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Static,
        PatternKind::Walk,
        PatternKind::RainbowCols,
        PatternKind::RainbowRows,
        PatternKind::Larsen,
        PatternKind::Snowflakes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Static => "static",
            PatternKind::Walk => "walk",
            PatternKind::RainbowCols => "rainbow_cols",
            PatternKind::RainbowRows => "rainbow_rows",
            PatternKind::Larsen => "larsen",
            PatternKind::Snowflakes => "snowflakes",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| OrnamentError::UnknownPattern(name.to_string()))
    }

    /// Creates the pattern in its initial state, sized for `chain`.
    pub fn instantiate(self, config: &PatternConfig, chain: &Chain) -> Box<dyn Pattern> {
        match self {
            PatternKind::Static => Box::new(Solid::new(config.static_delay())),
            PatternKind::Walk => Box::new(Walk::new(chain.len(), config.walk_delay())),
            PatternKind::RainbowCols => Box::new(Rainbow::new(
                Axis::Columns,
                config.rainbow_steps,
                config.tick_delay(),
            )),
            PatternKind::RainbowRows => Box::new(Rainbow::new(
                Axis::Rows,
                config.rainbow_steps,
                config.tick_delay(),
            )),
            PatternKind::Larsen => Box::new(Larsen::new(
                chain.columns().len(),
                config.larsen_overshoot,
                config.larsen_dim_factor,
                config.tick_delay(),
            )),
            PatternKind::Snowflakes => Box::new(Snowflakes::new(
                StdRng::from_entropy(),
                chain,
                config.snowflake_chance,
                config.snowflake_steps,
                config.tick_delay(),
            )),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = OrnamentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
