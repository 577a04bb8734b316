//! Request gate for protected routes.
//!
//! [`Authenticated`] is an extractor: axum resolves it before the handler
//! body runs, so a rejected request never reaches the handler and never
//! touches a store. All rejections are the same bare 401.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::{debug, error};

use crate::{
    error::Error,
    token::{Claims, TokenService},
};

/// Claims of a verified session token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

impl Authenticated {
    #[must_use]
    pub fn user_handle(&self) -> &str {
        &self.0.user_handle
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .cloned()
            .ok_or_else(|| {
                error!("token service extension missing from router");
                Error::Internal("Server error: token service is not configured".to_string())
            })?;

        let token = bearer_token(&parts.headers)?;

        let claims = tokens.verify(token).map_err(|_| {
            debug!("session token rejected");
            Error::Unauthenticated
        })?;

        Ok(Self(claims))
    }
}

/// Token from an `Authorization: Bearer <token>` header.
///
/// # Errors
/// [`Error::Unauthenticated`] if the header is missing, not `Bearer`, or has
/// no token segment.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(Error::Unauthenticated)?;

    let (scheme, rest) = header.split_once(' ').ok_or(Error::Unauthenticated)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::Unauthenticated);
    }

    rest.split(' ')
        .next()
        .filter(|token| !token.is_empty())
        .ok_or(Error::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(authorization: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers(Some("Bearer abc.def.ghi"))), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers(Some("bearer abc"))), Ok("abc"));
        assert_eq!(bearer_token(&headers(Some("Bearer abc extra"))), Ok("abc"));
    }

    #[test]
    fn test_bearer_token_rejections() {
        for value in [None, Some("Bearer"), Some("Bearer "), Some("Bearer  abc"), Some("Basic abc"), Some("abc")] {
            assert_eq!(
                bearer_token(&headers(value)),
                Err(Error::Unauthenticated),
                "header: {value:?}"
            );
        }
    }
}
