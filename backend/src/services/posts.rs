use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::constants::{MAX_TRENDING_POSTS, TRENDING_WINDOW_HOURS};
use crate::db::Store;
use crate::error::AppResult;
use crate::models::{MoodPost, NewMoodPost};
use crate::utils::validation::{validate_image_url, validate_mood, validate_note, validate_user_id};

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_post(
        &self,
        user_id: &str,
        mood: &str,
        note: Option<String>,
        image_url: Option<String>,
    ) -> AppResult<MoodPost> {
        let new = NewMoodPost {
            user_id: validate_user_id("userId", user_id)?.to_string(),
            mood: validate_mood(mood)?.to_string(),
            note: validate_note(note)?,
            image_url: validate_image_url(image_url)?,
        };

        let post = self.store.insert_post(new).await?;
        tracing::info!("User {} posted mood '{}' ({})", post.user_id, post.mood, post.id);
        Ok(post)
    }

    /// Posts from the trending window, newest first, optionally for one mood.
    pub async fn trending_posts(&self, mood: Option<&str>) -> AppResult<Vec<MoodPost>> {
        let mood = match mood.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => Some(validate_mood(m)?),
            None => None,
        };
        let since = Utc::now() - Duration::hours(TRENDING_WINDOW_HOURS);

        Ok(self.store.posts_since(mood, since, MAX_TRENDING_POSTS).await?)
    }
}
