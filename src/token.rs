//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with a process-wide secret. They carry the
//! player handle plus `iat`/`exp` and are never stored server side.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Two days, in seconds.
pub const TOKEN_TTL_SECONDS: u64 = 2 * 24 * 60 * 60;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userHandle")]
    pub user_handle: String,
    pub iat: u64,
    pub exp: u64,
}

/// The one rejection every failed verification produces, whatever the cause.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct InvalidToken;

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let key = secret.expose_secret().as_bytes();

        // expiry is checked by hand against the caller's clock so the
        // boundary is strict (`now < exp`) and testable
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
        }
    }

    /// Mint a token for `user_handle` valid for [`TOKEN_TTL_SECONDS`] from now.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be serialized or signed.
    pub fn issue(&self, user_handle: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_handle, jsonwebtoken::get_current_timestamp())
    }

    /// Mint a token as if the current time were `issued_at` (unix seconds).
    ///
    /// # Errors
    /// Returns an error if the claims cannot be serialized or signed.
    pub fn issue_at(
        &self,
        user_handle: &str,
        issued_at: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            user_handle: user_handle.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(TOKEN_TTL_SECONDS),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify a token against the secret and the current time.
    ///
    /// # Errors
    /// Returns [`InvalidToken`] if the token is malformed, forged or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        self.verify_at(token, jsonwebtoken::get_current_timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// Returns [`InvalidToken`] if the token is malformed, forged or expired.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<Claims, InvalidToken> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidToken)?;

        if now < claims.exp {
            Ok(claims)
        } else {
            Err(InvalidToken)
        }
    }
}
