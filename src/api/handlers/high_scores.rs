use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use super::object;
use crate::{
    api::gate::Authenticated,
    error::Error,
    leaderboard::{parse_page, Leaderboard},
    store::ScoreEntry,
};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct HighScoreResponse {
    message: String,
    data: ScoreEntry,
}

#[derive(IntoParams, Debug, Default, PartialEq, Eq)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardParams {
    /// Level to list, matched exactly
    level: Option<String>,
    /// 1-based page of 20 entries, defaults to 1
    #[param(value_type = Option<u32>)]
    page: Option<String>,
}

impl LeaderboardParams {
    /// A repeated `level` is ambiguous and dropped; for `page` the first
    /// value wins.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut levels = Vec::new();
        let mut page = None;

        for (key, value) in pairs {
            match key.as_str() {
                "level" => levels.push(value),
                "page" => {
                    page.get_or_insert(value);
                }
                _ => {}
            }
        }

        let level = if levels.len() == 1 { levels.pop() } else { None };

        Self { level, page }
    }
}

#[utoipa::path(
    get,
    path = "/high-scores",
    params(LeaderboardParams),
    responses (
        (status = 200, description = "Up to 20 scores for the level, best first", body = [ScoreEntry], content_type = "application/json"),
        (status = 400, description = "Missing or invalid level", body = String, content_type = "text/plain"),
        (status = 500, description = "Score store unavailable", body = String, content_type = "text/plain"),
    ),
    tag = "high-scores"
)]
#[instrument(skip_all)]
pub async fn list_high_scores(
    leaderboard: Extension<Arc<Leaderboard>>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Result<Json<Vec<ScoreEntry>>, Error> {
    let params = query
        .map(|Query(pairs)| LeaderboardParams::from_pairs(pairs))
        .unwrap_or_default();
    let page = parse_page(params.page.as_deref());

    debug!(level = ?params.level, page, "leaderboard query");

    leaderboard.query(params.level.as_deref(), page).map(Json)
}

#[utoipa::path(
    post,
    path = "/high-scores",
    request_body(content = ScoreEntry, content_type = "application/json"),
    responses (
        (status = 201, description = "High score recorded", body = HighScoreResponse, content_type = "application/json"),
        (status = 400, description = "Missing or invalid fields", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing, invalid or expired session token"),
    ),
    security(("bearer" = [])),
    tag = "high-scores"
)]
#[instrument(skip_all, fields(user_handle = %auth.user_handle()))]
pub async fn post_high_score(
    leaderboard: Extension<Arc<Leaderboard>>,
    auth: Authenticated,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<HighScoreResponse>), Error> {
    let entry = leaderboard.submit(&object(payload))?;

    Ok((
        StatusCode::CREATED,
        Json(HighScoreResponse {
            message: "High score posted successfully".to_string(),
            data: entry,
        }),
    ))
}
