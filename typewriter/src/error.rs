use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Io(std::io::Error),

    #[error("{0}")]
    Config(ConfigError),

    #[error("Failed to set up logging: {0}")]
    Logging(LoggingError),

    #[error("Failed to start session: {0}")]
    Session(platen::SessionError),
}
