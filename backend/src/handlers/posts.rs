use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::{auth::AuthUser, error::AppResult, extract::ApiJson, models::MoodPost, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub mood: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default)]
    pub mood: Option<String>,
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<MoodPost>)> {
    let post = state
        .posts
        .create_post(&user_id, &req.mood, req.note, req.image_url)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/trending?mood=<mood>
pub async fn trending_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<TrendingQuery>,
) -> AppResult<Json<Vec<MoodPost>>> {
    Ok(Json(state.posts.trending_posts(params.mood.as_deref()).await?))
}
