//! Animation engine for the Christmas ornament.
//!
//! The ornament is a fixed chain of addressable pixels laid out as a glyph.
//! A [`Dispatcher`] owns that [`Chain`], advances the active pattern from the
//! [`pattern`] library once per tick, forwards each frame to a [`Renderer`],
//! and applies [`Command`]s that arrive over the command channel between
//! ticks. Receivers that turn wire requests into commands, and the process
//! glue that wires everything together, live outside this crate.

pub mod chain;
pub mod color;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod pattern;
pub mod render;
pub mod settings;

pub use chain::{xmas_layout, Chain, Frame, Pixel};
pub use color::Rgb;
pub use command::{command_channel, Command, CommandReceiver, CommandSender};
pub use config::{AppConfig, EngineConfig, PatternConfig, RenderConfig};
pub use dispatch::{Applied, Dispatcher};
pub use error::{OrnamentError, Result};
pub use pattern::{Pattern, PatternKind};
pub use render::{BitmapRenderer, OutputMode, RenderGraph, Renderer, StripRenderer};
pub use settings::Settings;
