use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} file does not exist.")]
    NotFound(String),

    #[error("Cannot read config at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures reported by a [`Messenger`](crate::messenger::Messenger) implementation.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Client is not connected")]
    NotConnected,

    #[error("Connection failed: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to save session to {path}: {source}")]
    SaveSession {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Cannot open {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "The login code was rejected. It is either wrong or stale; request a new one by running again and enter the code you just received by SMS/Telegram"
    )]
    InvalidCode,

    #[error("Could not find the logged-in account among the contacts")]
    SelfNotFound,

    #[error("Failed to read from the terminal: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}
