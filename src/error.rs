//! Request-scoped error taxonomy.
//!
//! Every failure is terminal for the request that produced it and nothing
//! here is fatal to the process. Each variant maps to one HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Missing, malformed or extra input.
    #[error("{0}")]
    Validation(String),
    /// Missing, malformed, forged or expired session token.
    #[error("unauthenticated")]
    Unauthenticated,
    /// Credentials did not match any registered user.
    #[error("{0}")]
    Unauthorized(String),
    /// A store is not in a usable state.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // bare rejection, nothing about the cause leaks
            Self::Unauthenticated => status.into_response(),
            Self::Validation(message) | Self::Unauthorized(message) | Self::Internal(message) => {
                (status, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Unauthorized("x".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::Internal("x".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_has_empty_body() -> anyhow::Result<()> {
        let response = Error::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_validation_body_is_message() -> anyhow::Result<()> {
        let response = Error::validation("Request contains additional fields").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"Request contains additional fields");
        Ok(())
    }

    #[test]
    fn test_store_error_is_internal() {
        let err: Error = StoreError::Unavailable("highScores").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
