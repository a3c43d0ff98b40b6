/// Result alias that carries the custom [`OrnamentError`] type.
pub type Result<T> = std::result::Result<T, OrnamentError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum OrnamentError {
    /// The coordinate table used to build a chain was unusable.
    #[error("invalid layout: {0}")]
    InvalidLayout(&'static str),
    /// A pattern switch named something that is not registered.
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    /// A wire key/value pair could not be turned into a command.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}

impl OrnamentError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid_command<T: Into<String>>(msg: T) -> Self {
        Self::InvalidCommand(msg.into())
    }
}

impl From<&str> for OrnamentError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for OrnamentError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
