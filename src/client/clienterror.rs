use std::fmt;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::time::calendar::holidaycalendar::CalendarError;
use crate::time::rangeofdates::InvalidDateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NetworkError,
    Timeout,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    BadRequest,
    InternalError,
    InvalidResponse
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE"
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a holiday source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub status: Option<u16>,
    pub retryable: bool
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] HTTP {}: {}", self.code, status, self.message),
            None => write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>, status: Option<u16>, retryable: bool) -> ApiError {
        ApiError { code, message: message.into(), status, retryable }
    }

    /// Maps an HTTP status to an error code. Rate limiting and server side
    /// failures are marked retryable.
    pub fn from_status(status: u16, message: impl Into<String>) -> ApiError {
        let (code, retryable) = match status {
            400 => (ErrorCode::BadRequest, false),
            401 => (ErrorCode::Unauthorized, false),
            403 => (ErrorCode::Forbidden, false),
            404 => (ErrorCode::NotFound, false),
            429 => (ErrorCode::RateLimited, true),
            _ => (ErrorCode::InternalError, status >= 500)
        };
        ApiError::new(code, message, Some(status), retryable)
    }

    pub fn network_error(message: impl Into<String>) -> ApiError {
        ApiError::new(ErrorCode::NetworkError, message, None, true)
    }

    pub fn timeout(message: impl Into<String>) -> ApiError {
        ApiError::new(ErrorCode::Timeout, message, None, true)
    }

    pub fn invalid_response(message: impl Into<String>) -> ApiError {
        ApiError::new(ErrorCode::InvalidResponse, message, None, false)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("year must be between {min} and {max}, got {year}")]
    InvalidYear { year: i32, min: i32, max: i32 },
    #[error(transparent)]
    InvalidRange(#[from] InvalidDateRange),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Api(#[from] ApiError)
}

impl ClientError {
    /// Only source failures can succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Api(error) => error.retryable,
            _ => false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, ErrorCode::BadRequest, false),
            (401, ErrorCode::Unauthorized, false),
            (403, ErrorCode::Forbidden, false),
            (404, ErrorCode::NotFound, false),
            (429, ErrorCode::RateLimited, true),
            (418, ErrorCode::InternalError, false),
            (500, ErrorCode::InternalError, true),
            (503, ErrorCode::InternalError, true),
        ];
        for (status, code, retryable) in cases {
            let error = ApiError::from_status(status, "boom");
            assert_eq!(error.code, code, "status {status}");
            assert_eq!(error.retryable, retryable, "status {status}");
            assert_eq!(error.status, Some(status));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::from_status(404, "missing").to_string(), "[NOT_FOUND] HTTP 404: missing");
        assert_eq!(ApiError::timeout("slow").to_string(), "[TIMEOUT] slow");
        assert_eq!(
            ClientError::InvalidYear { year: 1800, min: 1900, max: 2100 }.to_string(),
            "year must be between 1900 and 2100, got 1800"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ClientError::from(ApiError::network_error("reset")).is_retryable());
        assert!(!ClientError::from(ApiError::invalid_response("garbage")).is_retryable());
        assert!(!ClientError::InvalidYear { year: 0, min: 1900, max: 2100 }.is_retryable());
    }
}
