use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodPost {
    pub id: Uuid,
    pub user_id: String,
    pub mood: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMoodPost {
    pub user_id: String,
    pub mood: String,
    pub note: Option<String>,
    pub image_url: Option<String>,
}
