//! Backend client errors.

use thiserror::Error;

/// Errors that can occur when talking to the REST backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// First part of the response body.
        message: String,
    },

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL is unusable.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Whether the backend could not be reached at all (down, timed out).
    ///
    /// Pages use this to tell "check that the server is running" apart from
    /// a rejected request.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Whether the backend rejected the request as invalid (4xx other than 404).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 400 && *status < 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BackendError::NotFound("producto 9".to_string());
        assert_eq!(err.to_string(), "not found: producto 9");

        let err = BackendError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned 500: boom");
    }

    #[test]
    fn test_classification() {
        let conflict = BackendError::Status {
            status: 409,
            message: String::new(),
        };
        assert!(conflict.is_client_error());
        assert!(!conflict.is_unreachable());

        let server = BackendError::Status {
            status: 503,
            message: String::new(),
        };
        assert!(!server.is_client_error());
    }
}
