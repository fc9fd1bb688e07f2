use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::ApiJson,
    models::{ProfilePayload, UserProfile},
    state::AppState,
};

/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.users.get_profile(&user_id).await?))
}

/// PUT /users/me
pub async fn put_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<ProfilePayload>,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(state.users.upsert_profile(&user_id, payload).await?))
}

/// GET /users/suggested
pub async fn suggested_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.users.suggested_users(&user_id).await?))
}

/// POST /users/{id}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(followee_id): Path<String>,
) -> AppResult<StatusCode> {
    state.users.follow(&user_id, &followee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
