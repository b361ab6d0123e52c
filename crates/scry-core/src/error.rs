//! Error types for the Scry application.

use thiserror::Error;

/// A shared error type for the entire Scry application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum ScryError {
    /// The platform refused or failed to produce a snapshot
    #[error("Capture failed: {0}")]
    Capture(String),

    /// An operation required a selection that is missing or empty
    #[error("Selection error: {0}")]
    Selection(String),

    /// The request to the analysis endpoint could not be completed
    #[error("{message}")]
    Transport { message: String },

    /// The analysis endpoint answered with an explicit error payload
    #[error("{}", remote_message(.error, .detail))]
    Remote {
        error: String,
        detail: Option<String>,
    },

    /// The analysis endpoint answered with neither a result nor an error
    #[error("Unrecognized response from the analysis endpoint")]
    UnrecognizedResponse,

    /// Image decoding, encoding, or pixel manipulation failed
    #[error("Image error: {0}")]
    Image(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn remote_message(error: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("{error}: {detail}"),
        None => error.to_string(),
    }
}

impl ScryError {
    /// Creates a Capture error
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture(message.into())
    }

    /// Creates a Selection error
    pub fn selection(message: impl Into<String>) -> Self {
        Self::Selection(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Remote error from an endpoint error payload
    pub fn remote(error: impl Into<String>, detail: Option<String>) -> Self {
        Self::Remote {
            error: error.into(),
            detail,
        }
    }

    /// Creates an Image error
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ScryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<image::ImageError> for ScryError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

impl From<toml::de::Error> for ScryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, ScryError>`.
pub type Result<T> = std::result::Result<T, ScryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_with_detail() {
        let err = ScryError::remote("bad_input", Some("no text".to_string()));
        assert_eq!(err.to_string(), "bad_input: no text");
    }

    #[test]
    fn test_remote_error_display_without_detail() {
        let err = ScryError::remote("bad_input", None);
        assert_eq!(err.to_string(), "bad_input");
    }

    #[test]
    fn test_transport_error_display_is_bare_message() {
        let err = ScryError::transport("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_capture_error_display() {
        let err = ScryError::capture("no active display found");
        assert_eq!(err.to_string(), "Capture failed: no active display found");
    }
}
