use thiserror::Error;

#[derive(Debug, Error)]
pub enum OnrampError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Platform(#[from] crate::platform::PlatformError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
