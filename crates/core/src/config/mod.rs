use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Result, Rgb, Settings};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub patterns: PatternConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Startup state of the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_pattern: String,
    pub brightness: u8,
    pub base_colour: Rgb,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_pattern: "rainbow_cols".to_string(),
            brightness: u8::MAX,
            base_colour: Rgb::RED,
        }
    }
}

impl EngineConfig {
    pub fn initial_settings(&self) -> Settings {
        Settings {
            brightness: self.brightness,
            base_color: self.base_colour,
        }
    }
}

/// Timing and shape parameters for the pattern library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub static_delay_ms: u64,
    pub walk_delay_ms: u64,
    /// Shared by the rainbow, larsen and snowflake patterns.
    pub tick_delay_ms: u64,
    pub rainbow_steps: usize,
    pub larsen_overshoot: usize,
    pub larsen_dim_factor: f32,
    pub snowflake_chance: f64,
    pub snowflake_steps: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            static_delay_ms: 1000,
            walk_delay_ms: 500,
            tick_delay_ms: 200,
            rainbow_steps: 100,
            larsen_overshoot: 10,
            larsen_dim_factor: 0.9,
            snowflake_chance: 0.7,
            snowflake_steps: 100,
        }
    }
}

impl PatternConfig {
    pub fn static_delay(&self) -> Duration {
        Duration::from_millis(self.static_delay_ms)
    }

    pub fn walk_delay(&self) -> Duration {
        Duration::from_millis(self.walk_delay_ms)
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    /// Same shapes with every delay set to zero.
    pub fn without_delays(&self) -> Self {
        Self {
            static_delay_ms: 0,
            walk_delay_ms: 0,
            tick_delay_ms: 0,
            ..self.clone()
        }
    }
}

/// Geometry of the bitmap renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub x_spacing: u32,
    pub y_spacing: u32,
    pub radius: u32,
    pub background: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            x_spacing: 20,
            y_spacing: 30,
            radius: 5,
            background: Rgb::new(0x80, 0x80, 0x80),
        }
    }
}
