use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use super::object;
use crate::{accounts::Accounts, error::Error, store::User};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    message: String,
    data: User,
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = User, content_type = "application/json"),
    responses (
        (status = 201, description = "User registered", body = SignupResponse, content_type = "application/json"),
        (status = 400, description = "Missing, non-string or too short userHandle/password", body = String, content_type = "text/plain"),
    ),
    tag = "accounts"
)]
#[instrument(skip_all)]
pub async fn signup(
    accounts: Extension<Arc<Accounts>>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<SignupResponse>), Error> {
    let user = accounts.signup(&object(payload))?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully".to_string(),
            data: user,
        }),
    ))
}
