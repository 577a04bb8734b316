//! Route handlers.
//!
//! Handlers only adapt HTTP to the domain services: they unwrap the JSON
//! body or query string, call [`crate::accounts`] or [`crate::leaderboard`],
//! and shape the response.

pub mod health;
pub mod high_scores;
pub mod login;
pub mod signup;

use axum::Json;
use serde_json::{Map, Value};

/// The request body as a JSON object. Missing, unparsable or non-object
/// bodies become an empty object so that field validation reports them.
pub(crate) fn object(payload: Option<Json<Value>>) -> Map<String, Value> {
    match payload {
        Some(Json(Value::Object(map))) => map,
        _ => Map::new(),
    }
}
