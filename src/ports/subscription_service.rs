//! Backend subscription service port.
//!
//! The authoritative source of subscription state. Fetched on screen entry
//! and after every settled purchase or restore; its response always replaces
//! the local snapshot wholesale.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionState;

/// Port for the backend's subscription-of-record endpoint.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Fetches the user's current subscription of record.
    async fn fetch_subscription(&self, user_id: &UserId)
        -> Result<SubscriptionState, BackendError>;
}

/// Errors from backend subscription calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    /// Error code for categorization.
    pub code: BackendErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl BackendError {
    /// Create a new backend error.
    pub fn new(code: BackendErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(BackendErrorCode::Timeout, message)
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(BackendErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BackendError {}

/// Backend error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// The request exceeded the configured deadline.
    Timeout,

    /// The auth token was rejected.
    Unauthorized,

    /// The backend has no subscription record for this user.
    NotFound,

    /// The response body could not be parsed.
    InvalidResponse,

    /// The backend reported a server-side error.
    ServiceError,
}

impl BackendErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendErrorCode::NetworkError
                | BackendErrorCode::Timeout
                | BackendErrorCode::ServiceError
        )
    }
}

impl std::fmt::Display for BackendErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BackendErrorCode::NetworkError => "network_error",
            BackendErrorCode::Timeout => "timeout",
            BackendErrorCode::Unauthorized => "unauthorized",
            BackendErrorCode::NotFound => "not_found",
            BackendErrorCode::InvalidResponse => "invalid_response",
            BackendErrorCode::ServiceError => "service_error",
        };
        write!(f, "{}", s)
    }
}
