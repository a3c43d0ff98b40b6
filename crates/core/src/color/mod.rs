use std::{fmt, str::FromStr};

use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{OrnamentError, Result};

/// 8-bit RGB colour of a single pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(0xff, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiplies every channel by `amount`, truncating toward zero.
    ///
    /// `amount` is expected in `0.0..=1.0`; zero blanks the colour and one
    /// leaves it unchanged.
    pub fn dimmed(self, amount: f32) -> Self {
        let scale = |channel: u8| (f32::from(channel) * amount) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Scales every channel by `level / 255`, truncating toward zero.
    pub fn scaled(self, level: u8) -> Self {
        let scale = |channel: u8| ((u16::from(channel) * u16::from(level)) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Colour wheel lookup with full saturation and value.
    ///
    /// `hue` is a fraction of a full turn; anything outside `0.0..1.0` is
    /// folded back into range.
    pub fn from_hue(hue: f32) -> Self {
        let hue = hue - hue.floor();
        let hsv: Hsv = Hsv::new(hue * 360.0, 1.0, 1.0);
        let rgb: Srgb = Srgb::from_color(hsv);
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0) as u8;
        Self::new(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
    }

    /// Channels in the green/red/blue order expected by WS281x strips.
    pub fn grb(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }

    /// Parses a `#RRGGBB` string.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.strip_prefix('#').ok_or_else(|| {
            OrnamentError::invalid_command(format!("colour `{value}` must start with `#`"))
        })?;

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(OrnamentError::invalid_command(format!(
                "colour `{value}` is not of the form #RRGGBB"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|err| OrnamentError::invalid_command(format!("colour `{value}`: {err}")))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = OrnamentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
