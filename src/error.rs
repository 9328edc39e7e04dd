//! Toque error types

use thiserror::Error;

/// Toque error type
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed required field
    #[error("{0}")]
    InvalidInput(String),

    /// Tone gate refused the message
    #[error("{0}")]
    ContentRejected(String),

    /// Delivery provider is not set up on this server
    #[error("{0}")]
    NotConfigured(String),

    /// Provider accepted the request but failed to deliver
    #[error("{0}")]
    DeliveryFailed(String),

    /// Malformed share token
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client platform capability failed (clipboard, share sheet, protocol launch)
    #[error("Platform error: {0}")]
    Platform(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput(_) | Error::Decode(_) => 400,
            Error::ContentRejected(_) => 422,
            Error::NotConfigured(_) => 501,
            _ => 500,
        }
    }
}

/// Result type alias for Toque operations
pub type Result<T> = std::result::Result<T, Error>;
