use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::object;
use crate::{accounts::Accounts, error::Error, store::User};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(rename = "jsonWebToken")]
    json_web_token: String,
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = User, content_type = "application/json"),
    responses (
        (status = 200, description = "Session token issued", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Invalid body or additional fields", body = String, content_type = "text/plain"),
        (status = 401, description = "Incorrect username or password", body = String, content_type = "text/plain"),
    ),
    tag = "accounts"
)]
#[instrument(skip_all)]
pub async fn login(
    accounts: Extension<Arc<Accounts>>,
    payload: Option<Json<Value>>,
) -> Result<Json<LoginResponse>, Error> {
    let token = accounts.login(&object(payload))?;

    debug!("session token issued");

    Ok(Json(LoginResponse {
        json_web_token: token,
    }))
}
