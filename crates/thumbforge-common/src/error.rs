//! Error types used throughout thumbforge.
//!
//! Each stage of the resize handler has its own variant so callers (and the
//! Lambda runtime's failure report) can tell which step aborted a batch.

use std::fmt::Display;

/// Common error type for thumbforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source object is missing or the source store is unreachable.
    #[error("Retrieval failed for {object}: {message}")]
    Retrieval { object: String, message: String },

    /// The retrieved bytes are not a supported or intact image.
    #[error("Decode failed for {object}: {message}")]
    Decode { object: String, message: String },

    /// The resized image could not be encoded.
    #[error("Encode failed for {object}: {message}")]
    Encode { object: String, message: String },

    /// The destination store rejected the write or is unreachable.
    #[error("Storage failed for {object}: {message}")]
    Storage { object: String, message: String },

    /// A notification record does not address an object we can process.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new Retrieval error for the given object.
    pub fn retrieval<O: Display, S: Into<String>>(object: O, msg: S) -> Self {
        Self::Retrieval {
            object: object.to_string(),
            message: msg.into(),
        }
    }

    /// Create a new Decode error for the given object.
    pub fn decode<O: Display, S: Into<String>>(object: O, msg: S) -> Self {
        Self::Decode {
            object: object.to_string(),
            message: msg.into(),
        }
    }

    /// Create a new Encode error for the given object.
    pub fn encode<O: Display, S: Into<String>>(object: O, msg: S) -> Self {
        Self::Encode {
            object: object.to_string(),
            message: msg.into(),
        }
    }

    /// Create a new Storage error for the given object.
    pub fn storage<O: Display, S: Into<String>>(object: O, msg: S) -> Self {
        Self::Storage {
            object: object.to_string(),
            message: msg.into(),
        }
    }

    /// Create a new InvalidRecord error.
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
