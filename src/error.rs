//! Errors that end the console process. Everything else is rendered.

use crate::config::ConfigError;
use crate::net::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
