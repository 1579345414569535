//! Transport error types.

use thiserror::Error;

/// Errors raised by the HTTP collaborator.
///
/// Non-2xx responses carry the status and raw body so callers can decide
/// what to surface; transport failures are distinguishable from rejections.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the rejection, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a 401, which must cascade into a forced logout.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::Status {
            status: 401,
            body: String::new(),
        };
        assert!(err.is_unauthorized());
    }
}
