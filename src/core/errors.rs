//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Remote endpoint answered with a non-2xx status
    #[error("Response error: {code} - {message}")]
    ResponseError {
        code: u16,
        message: String,
    },

    /// Status code outside the documented set and no body to read
    #[error("Unexpected response status: {code}")]
    UnexpectedStatus {
        code: u16,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Response body does not parse
    #[error("Invalid response: {message}")]
    InvalidResponse {
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Language tag too short to yield a two-letter code
    #[error("Invalid language tag: {tag:?}")]
    InvalidLanguage {
        tag: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Credential store failure
    #[error("Credential error: {name} - {message}")]
    CredentialError {
        name: String,
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Numeric status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TranslationError::ResponseError { code, .. }
            | TranslationError::UnexpectedStatus { code } => Some(*code),
            TranslationError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

impl From<quick_xml::Error> for TranslationError {
    fn from(err: quick_xml::Error) -> Self {
        TranslationError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_extraction() {
        let err = TranslationError::ResponseError {
            code: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(TranslationError::UnexpectedStatus { code: 500 }.status_code(), Some(500));
        assert_eq!(TranslationError::TimeoutError.status_code(), None);
    }

    #[test]
    fn test_error_display() {
        let err = TranslationError::InvalidLanguage { tag: "e".to_string() };
        assert_eq!(err.to_string(), "Invalid language tag: \"e\"");
    }
}
