use crate::Rgb;

/// Runtime-adjustable values shared with every pattern tick.
///
/// Only the dispatcher writes these; patterns receive a shared reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub brightness: u8,
    pub base_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: u8::MAX,
            base_color: Rgb::RED,
        }
    }
}
