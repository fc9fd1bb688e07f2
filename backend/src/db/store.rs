use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::{connections, posts, users};
use crate::models::{Connection, MoodPost, NewConnection, NewMoodPost, ProfileUpdate, UserProfile};

/// Persistence seam used by the service layer.
///
/// Every method is a single read or write against the backing store.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_connection(&self, new: NewConnection) -> Result<Connection>;

    /// Connections where `user_id` is the initiator, newest first.
    async fn connections_initiated_by(&self, user_id: &str) -> Result<Vec<Connection>>;

    async fn insert_post(&self, new: NewMoodPost) -> Result<MoodPost>;

    /// Up to `limit` posts tagged `mood`, newest first.
    async fn recent_posts_by_mood(&self, mood: &str, limit: i64) -> Result<Vec<MoodPost>>;

    /// Up to `limit` posts created at or after `since`, newest first.
    async fn posts_since(
        &self,
        mood: Option<&str>,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MoodPost>>;

    async fn upsert_user(&self, update: ProfileUpdate) -> Result<UserProfile>;

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Inserting an existing edge is a no-op.
    async fn insert_follow(&self, follower_id: &str, followee_id: &str) -> Result<()>;

    async fn suggested_users(&self, user_id: &str, limit: i64) -> Result<Vec<UserProfile>>;
}

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_connection(&self, new: NewConnection) -> Result<Connection> {
        connections::create_connection(&self.pool, &new).await
    }

    async fn connections_initiated_by(&self, user_id: &str) -> Result<Vec<Connection>> {
        connections::get_connections_by_initiator(&self.pool, user_id).await
    }

    async fn insert_post(&self, new: NewMoodPost) -> Result<MoodPost> {
        posts::create_post(&self.pool, &new).await
    }

    async fn recent_posts_by_mood(&self, mood: &str, limit: i64) -> Result<Vec<MoodPost>> {
        posts::get_recent_posts_by_mood(&self.pool, mood, limit).await
    }

    async fn posts_since(
        &self,
        mood: Option<&str>,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MoodPost>> {
        posts::get_posts_since(&self.pool, mood, since, limit).await
    }

    async fn upsert_user(&self, update: ProfileUpdate) -> Result<UserProfile> {
        users::upsert_user(&self.pool, &update).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        users::get_user_by_id(&self.pool, user_id).await
    }

    async fn insert_follow(&self, follower_id: &str, followee_id: &str) -> Result<()> {
        users::create_follow(&self.pool, follower_id, followee_id).await
    }

    async fn suggested_users(&self, user_id: &str, limit: i64) -> Result<Vec<UserProfile>> {
        users::get_suggested_users(&self.pool, user_id, limit).await
    }
}
