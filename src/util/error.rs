//! Error types for the FBX property library.

use crate::dom::TokenLocation;
use thiserror::Error;

/// Main error type for property decoding and scene loading.
#[derive(Error, Debug)]
pub enum Error {
    /// Property record is shorter than its declared type requires
    #[error("Not enough tokens for property of type {declared_type} at {location}")]
    InsufficientTokens {
        declared_type: String,
        location: TokenLocation,
    },

    /// Token cannot be rendered as the requested value type
    #[error("Failed to parse {expected} token at {location}: {reason}")]
    TokenParse {
        expected: &'static str,
        location: TokenLocation,
        reason: String,
    },

    /// Scene description is structurally invalid
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// Object not found by name
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error in a scene description
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a token parse error.
    pub fn token_parse(
        expected: &'static str,
        location: TokenLocation,
        reason: impl Into<String>,
    ) -> Self {
        Self::TokenParse {
            expected,
            location,
            reason: reason.into(),
        }
    }

    /// Create an invalid scene error.
    pub fn invalid_scene(msg: impl Into<String>) -> Self {
        Self::InvalidScene(msg.into())
    }

    /// Location of the offending token, for decode failures.
    pub fn location(&self) -> Option<TokenLocation> {
        match self {
            Self::InsufficientTokens { location, .. } | Self::TokenParse { location, .. } => {
                Some(*location)
            }
            _ => None,
        }
    }

    /// True for failures raised while decoding a property record.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::InsufficientTokens { .. } | Self::TokenParse { .. })
    }
}

/// Result type alias for property operations.
pub type Result<T> = std::result::Result<T, Error>;
