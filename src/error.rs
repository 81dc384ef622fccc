//! Error types for the keep-alive engine
//!
//! The configuration resolution layer is permissive by design and has no error
//! path of its own; only the audio engine can fail.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Audio subsystem errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No usable output endpoint: {0}")]
    NoEndpoint(String),

    #[error("Failed to open stream: {0}")]
    StreamError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("cpal error: {0}")]
    CpalError(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;
