use std::sync::Arc;

use crate::constants::MAX_SUGGESTED_USERS;
use crate::db::Store;
use crate::error::{AppError, AppResult};
use crate::models::{ProfilePayload, UserProfile};
use crate::utils::validation::{validate_image_url, validate_user_id, validate_username};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace the caller's profile from a current or legacy payload.
    pub async fn upsert_profile(&self, user_id: &str, payload: ProfilePayload) -> AppResult<UserProfile> {
        let user_id = validate_user_id("userId", user_id)?;
        let mut update = payload
            .into_profile(user_id)
            .ok_or_else(|| AppError::validation("username (or legacy handle) is required"))?;

        validate_username("username", &update.username)?;
        validate_username("displayName", &update.display_name)?;
        update.avatar_url = validate_image_url(update.avatar_url)?;

        Ok(self.store.upsert_user(update).await?)
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        let user_id = validate_user_id("userId", user_id)?;
        self.store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
    }

    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        let follower_id = validate_user_id("userId", follower_id)?;
        let followee_id = validate_user_id("followeeId", followee_id)?;
        if follower_id == followee_id {
            return Err(AppError::validation("Cannot follow yourself"));
        }

        self.store.insert_follow(follower_id, followee_id).await?;
        tracing::info!("User {} followed {}", follower_id, followee_id);
        Ok(())
    }

    pub async fn suggested_users(&self, user_id: &str) -> AppResult<Vec<UserProfile>> {
        let user_id = validate_user_id("userId", user_id)?;
        Ok(self.store.suggested_users(user_id, MAX_SUGGESTED_USERS).await?)
    }
}
