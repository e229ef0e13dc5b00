//! Error types shared by the core, exec and cli crates.
//!
//! No error is fatal once the client is running: the session turns every
//! variant into a log entry and, where the user must know, an alert.

use thiserror::Error;

/// Top-level error type encompassing all client error categories.
#[derive(Error, Debug)]
pub enum AppError {
    /// The utterance could not be turned into an action.
    #[error("Intent unresolved: {0}")]
    Intent(#[from] IntentError),

    /// A call to the remote gateway failed.
    #[error("Gateway request failed: {0}")]
    Gateway(#[from] GatewayError),

    /// Speech capture is unavailable or failed.
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Reading or writing the persisted collection failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum IntentError {
    #[error("empty utterance")]
    Empty,

    #[error("service request failed: {0}")]
    Transport(String),

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("no recognized action in reply")]
    Unrecognized,
}

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request never produced a response (connect, TLS, I/O).
    #[error("{operation}: {message}")]
    Request { operation: String, message: String },

    /// The gateway answered with a non-success status.
    #[error("{operation}: HTTP {status}")]
    Status { operation: String, status: u16 },

    /// The response body did not match the contract.
    #[error("{operation}: unexpected response: {message}")]
    Decode { operation: String, message: String },
}

impl GatewayError {
    pub fn operation(&self) -> &str {
        match self {
            Self::Request { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }
}

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("speech recognition not supported: {0}")]
    Unsupported(String),

    #[error("speech capture failed: {0}")]
    Capture(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode: {0}")]
    Encode(String),

    #[error("decode: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: String, message: String },
}
