//! Error types for estate-search.

use thiserror::Error;

/// Result type alias using estate-search's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for estate-search operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed caller input (non-numeric price, min > max, unknown status).
    /// Surfaced to the caller as-is and never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A well-formed value outside the supported set (currency, language).
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Content store, rate source, or translator unreachable or erroring.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than a system fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::UnsupportedValue(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Upstream(format!("malformed response: {}", e))
        } else {
            Error::Upstream(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("minPrice must be a number".to_string());
        assert_eq!(err.to_string(), "Validation error: minPrice must be a number");
    }

    #[test]
    fn test_error_display_unsupported_value() {
        let err = Error::UnsupportedValue("currency 'XYZ'".to_string());
        assert_eq!(err.to_string(), "Unsupported value: currency 'XYZ'");
    }

    #[test]
    fn test_error_display_upstream() {
        let err = Error::Upstream("connection refused".to_string());
        assert_eq!(err.to_string(), "Upstream error: connection refused");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing SANITY_PROJECT_ID".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing SANITY_PROJECT_ID"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::Validation("x".into()).is_client_error());
        assert!(Error::UnsupportedValue("x".into()).is_client_error());
        assert!(!Error::Upstream("x".into()).is_client_error());
        assert!(!Error::Internal("x".into()).is_client_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
