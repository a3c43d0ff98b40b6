use std::sync::mpsc::{self, Receiver, Sender};

use crate::{OrnamentError, PatternKind, Result, Rgb};

/// A validated request to change what the ornament is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Restart with a different pattern. The name is checked again by the
    /// dispatcher, so producers may forward it unvalidated.
    SwitchPattern(String),
    SetBrightness(u8),
    SetColor(Rgb),
}

pub type CommandSender = Sender<Command>;
pub type CommandReceiver = Receiver<Command>;

/// Unbounded FIFO queue between any number of receivers and the dispatcher.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::channel()
}

impl Command {
    /// Interprets a single wire key/value pair.
    ///
    /// Recognised keys are `mode`, `brightness` and `colour`. Brightness
    /// values outside `0..=255` are clamped rather than rejected.
    pub fn from_pair(key: &str, value: &str) -> Result<Self> {
        let value = value.trim();
        match key.trim() {
            "mode" => {
                let kind = PatternKind::from_name(value)?;
                Ok(Command::SwitchPattern(kind.name().to_string()))
            }
            "brightness" => {
                let level: i64 = value.parse().map_err(|_| {
                    OrnamentError::invalid_command(format!(
                        "brightness `{value}` is not an integer"
                    ))
                })?;
                Ok(Command::SetBrightness(clamp_brightness(level)))
            }
            "colour" => Ok(Command::SetColor(Rgb::from_hex(value)?)),
            other => Err(OrnamentError::invalid_command(format!(
                "unrecognised key `{other}`"
            ))),
        }
    }

    /// Parses a `key=value` body. Pairs may be separated by `&` or newlines.
    ///
    /// Either every pair is valid and all commands are returned in order, or
    /// the first failure is returned and nothing should be enqueued.
    pub fn parse_body(body: &str) -> Result<Vec<Self>> {
        let pairs: Vec<&str> = body
            .split(|c: char| c == '&' || c == '\n')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect();

        if pairs.is_empty() {
            return Err(OrnamentError::invalid_command("empty command body"));
        }

        pairs
            .into_iter()
            .map(|pair| {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    OrnamentError::invalid_command(format!("`{pair}` is not a key=value pair"))
                })?;
                Self::from_pair(key, value)
            })
            .collect()
    }
}

pub(crate) fn clamp_brightness(level: i64) -> u8 {
    level.clamp(0, i64::from(u8::MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_recognised_key() {
        assert_eq!(
            Command::from_pair("mode", "larsen").unwrap(),
            Command::SwitchPattern("larsen".to_string())
        );
        assert_eq!(
            Command::from_pair("brightness", "42").unwrap(),
            Command::SetBrightness(42)
        );
        assert_eq!(
            Command::from_pair("colour", "#00ff80").unwrap(),
            Command::SetColor(Rgb::new(0, 0xff, 0x80))
        );
    }

    #[test]
    fn brightness_is_clamped() {
        assert_eq!(
            Command::from_pair("brightness", "900").unwrap(),
            Command::SetBrightness(255)
        );
        assert_eq!(
            Command::from_pair("brightness", "-3").unwrap(),
            Command::SetBrightness(0)
        );
    }

    #[test]
    fn rejects_unknown_mode_and_key() {
        let err = Command::from_pair("mode", "disco").unwrap_err();
        assert!(matches!(err, OrnamentError::UnknownPattern(_)));

        let err = Command::from_pair("speed", "3").unwrap_err();
        assert!(matches!(err, OrnamentError::InvalidCommand(_)));

        let err = Command::from_pair("brightness", "loud").unwrap_err();
        assert!(matches!(err, OrnamentError::InvalidCommand(_)));
    }

    #[test]
    fn body_is_all_or_nothing() {
        let commands = Command::parse_body("mode=walk&brightness=10\n").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::SwitchPattern("walk".to_string()),
                Command::SetBrightness(10)
            ]
        );

        assert!(Command::parse_body("mode=walk&colour=red").is_err());
        assert!(Command::parse_body("mode").is_err());
        assert!(Command::parse_body("  ").is_err());
    }

    #[test]
    fn channel_preserves_publish_order() {
        let (tx, rx) = command_channel();
        let producer = {
            let tx = tx.clone();
            std::thread::spawn(move || {
                for level in 0..5 {
                    tx.send(Command::SetBrightness(level)).unwrap();
                }
            })
        };
        producer.join().unwrap();

        let received: Vec<Command> = rx.try_iter().collect();
        let expected: Vec<Command> = (0..5).map(Command::SetBrightness).collect();
        assert_eq!(received, expected);
    }
}
