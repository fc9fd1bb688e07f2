use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::ApiJson,
    models::{Connection, KindredCandidate},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub target_user_id: String,
    pub mood: String,
}

#[derive(Debug, Deserialize)]
pub struct KindredQuery {
    #[serde(default)]
    pub mood: Option<String>,
}

/// POST /connections/connect
pub async fn connect(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<ConnectRequest>,
) -> AppResult<Json<Connection>> {
    let connection = state
        .connections
        .connect(&user_id, &req.target_user_id, &req.mood)
        .await?;
    Ok(Json(connection))
}

/// GET /connections
pub async fn list_connections(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<Connection>>> {
    Ok(Json(state.connections.get_connections(&user_id).await?))
}

/// GET /connections/kindred?mood=<mood>
pub async fn kindred_spirits(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<KindredQuery>,
) -> AppResult<Json<Vec<KindredCandidate>>> {
    let mood = params.mood.unwrap_or_default();
    Ok(Json(state.connections.find_kindred_spirits(&user_id, &mood).await?))
}
