//! Player registration and login.
//!
//! Both operations take the parsed JSON request body because their
//! validation rules are about the raw shape of that body: which keys are
//! present, which are strings, and whether anything else was sent.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, instrument};

use crate::{
    error::Error,
    store::{CredentialStore, User},
    token::TokenService,
};

pub const MIN_HANDLE_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 6;

const ALLOWED_LOGIN_FIELDS: [&str; 2] = ["userHandle", "password"];

const MISSING_FIELDS: &str = "Missing required fields: userHandle, password";
const NOT_STRINGS: &str = "userHandle and password must be strings";
const HANDLE_TOO_SHORT: &str = "userHandle should be at least 6 characters long";
const PASSWORD_TOO_SHORT: &str = "password should be at least 6 characters long";
const EXTRA_FIELDS: &str = "Request contains additional fields";
const BAD_CREDENTIALS: &str = "Incorrect username or password. Please sign up.";

pub struct Accounts {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
}

impl Accounts {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Register a user from a `{userHandle, password}` body.
    ///
    /// Handles are not checked for uniqueness.
    ///
    /// # Errors
    /// [`Error::Validation`] for missing, non-string or too short fields,
    /// [`Error::Internal`] if the store is unusable.
    #[instrument(skip_all)]
    pub fn signup(&self, body: &Map<String, Value>) -> Result<User, Error> {
        let (user_handle, password) = credentials(body)?;

        let user = User {
            user_handle: user_handle.to_string(),
            password: password.to_string(),
        };
        self.store.append(user.clone())?;

        debug!(user_handle = %user.user_handle, "user registered");

        Ok(user)
    }

    /// Exchange a `{userHandle, password}` body for a session token.
    ///
    /// # Errors
    /// [`Error::Validation`] for malformed bodies (including extra fields),
    /// [`Error::Unauthorized`] when no registered user matches,
    /// [`Error::Internal`] if the store is unusable or signing fails.
    #[instrument(skip_all)]
    pub fn login(&self, body: &Map<String, Value>) -> Result<String, Error> {
        let (user_handle, password) = credentials(body)?;

        if body
            .keys()
            .any(|field| !ALLOWED_LOGIN_FIELDS.contains(&field.as_str()))
        {
            return Err(Error::validation(EXTRA_FIELDS));
        }

        let Some(user) = self.store.find(user_handle, password)? else {
            debug!("no user matches the submitted credentials");
            return Err(Error::Unauthorized(BAD_CREDENTIALS.to_string()));
        };

        self.tokens.issue(&user.user_handle).map_err(|e| {
            error!("Error signing session token: {:?}", e);
            Error::Internal("Error signing session token".to_string())
        })
    }
}

/// Presence, then type, then length checks shared by signup and login.
fn credentials(body: &Map<String, Value>) -> Result<(&str, &str), Error> {
    let user_handle = body.get("userHandle").filter(|value| truthy(value));
    let password = body.get("password").filter(|value| truthy(value));

    let (Some(user_handle), Some(password)) = (user_handle, password) else {
        return Err(Error::validation(MISSING_FIELDS));
    };

    let (Some(user_handle), Some(password)) = (user_handle.as_str(), password.as_str()) else {
        return Err(Error::validation(NOT_STRINGS));
    };

    if utf16_len(user_handle) < MIN_HANDLE_LENGTH {
        return Err(Error::validation(HANDLE_TOO_SHORT));
    }

    if utf16_len(password) < MIN_PASSWORD_LENGTH {
        return Err(Error::validation(PASSWORD_TOO_SHORT));
    }

    Ok((user_handle, password))
}

/// Length in UTF-16 code units; characters outside the BMP count twice.
fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// JSON values that count as "present": everything except `null`, `false`,
/// `0` and `""`.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
