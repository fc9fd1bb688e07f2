use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::db::store::Store;
use crate::models::{Connection, MoodPost, NewConnection, NewMoodPost, ProfileUpdate, UserProfile};

#[derive(Debug, Default)]
struct Tables {
    connections: Vec<Connection>,
    posts: Vec<MoodPost>,
    users: Vec<UserProfile>,
    follows: HashSet<(String, String)>,
}

/// In-process store for local development and tests. Rows are kept in
/// insertion order; reads sort newest first with later inserts winning ties.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a post with an explicit creation time.
    pub fn insert_post_at(&self, new: NewMoodPost, created_at: DateTime<Utc>) -> Result<MoodPost> {
        let post = MoodPost {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            mood: new.mood,
            note: new.note,
            image_url: new.image_url,
            created_at,
        };
        self.write()?.posts.push(post.clone());
        Ok(post)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| anyhow!("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

fn newest_first<T: Clone>(
    rows: &[T],
    created_at: impl Fn(&T) -> DateTime<Utc>,
    keep: impl Fn(&T) -> bool,
) -> Vec<T> {
    let mut selected: Vec<T> = rows.iter().rev().filter(|r| keep(r)).cloned().collect();
    selected.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    selected
}

fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_connection(&self, new: NewConnection) -> Result<Connection> {
        let connection = Connection {
            id: Uuid::new_v4(),
            user_a: new.user_a,
            user_b: new.user_b,
            shared_mood: new.shared_mood,
            created_at: Utc::now(),
        };
        self.write()?.connections.push(connection.clone());
        Ok(connection)
    }

    async fn connections_initiated_by(&self, user_id: &str) -> Result<Vec<Connection>> {
        let tables = self.read()?;
        Ok(newest_first(&tables.connections, |c| c.created_at, |c| c.user_a == user_id))
    }

    async fn insert_post(&self, new: NewMoodPost) -> Result<MoodPost> {
        self.insert_post_at(new, Utc::now())
    }

    async fn recent_posts_by_mood(&self, mood: &str, limit: i64) -> Result<Vec<MoodPost>> {
        let tables = self.read()?;
        let mut posts = newest_first(&tables.posts, |p| p.created_at, |p| p.mood == mood);
        posts.truncate(clamp_limit(limit));
        Ok(posts)
    }

    async fn posts_since(
        &self,
        mood: Option<&str>,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MoodPost>> {
        let tables = self.read()?;
        let mut posts = newest_first(
            &tables.posts,
            |p| p.created_at,
            |p| p.created_at >= since && mood.is_none_or(|m| p.mood == m),
        );
        posts.truncate(clamp_limit(limit));
        Ok(posts)
    }

    async fn upsert_user(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let mut tables = self.write()?;
        if let Some(existing) = tables.users.iter_mut().find(|u| u.id == update.id) {
            existing.username = update.username;
            existing.display_name = update.display_name;
            existing.avatar_url = update.avatar_url;
            return Ok(existing.clone());
        }

        let user = UserProfile {
            id: update.id,
            username: update.username,
            display_name: update.display_name,
            avatar_url: update.avatar_url,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.read()?.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn insert_follow(&self, follower_id: &str, followee_id: &str) -> Result<()> {
        self.write()?
            .follows
            .insert((follower_id.to_string(), followee_id.to_string()));
        Ok(())
    }

    async fn suggested_users(&self, user_id: &str, limit: i64) -> Result<Vec<UserProfile>> {
        let tables = self.read()?;
        let mut users = newest_first(
            &tables.users,
            |u| u.created_at,
            |u| {
                u.id != user_id
                    && !tables.follows.contains(&(user_id.to_string(), u.id.clone()))
            },
        );
        users.truncate(clamp_limit(limit));
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(user_id: &str, mood: &str) -> NewMoodPost {
        NewMoodPost {
            user_id: user_id.to_string(),
            mood: mood.to_string(),
            note: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_recent_posts_by_mood_newest_first_and_limited() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.insert_post_at(post("a", "happy"), now - Duration::minutes(3)).unwrap();
        store.insert_post_at(post("b", "sad"), now - Duration::minutes(2)).unwrap();
        store.insert_post_at(post("c", "happy"), now - Duration::minutes(1)).unwrap();
        store.insert_post_at(post("d", "happy"), now).unwrap();

        let posts = store.recent_posts_by_mood("happy", 2).await.unwrap();
        let authors: Vec<&str> = posts.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(authors, vec!["d", "c"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_prefer_later_insert() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.insert_post_at(post("first", "calm"), now).unwrap();
        store.insert_post_at(post("second", "calm"), now).unwrap();

        let posts = store.recent_posts_by_mood("calm", 10).await.unwrap();
        assert_eq!(posts[0].user_id, "second");
        assert_eq!(posts[1].user_id, "first");
    }

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let store = MemoryStore::new();
        store.insert_follow("a", "b").await.unwrap();
        store.insert_follow("a", "b").await.unwrap();
        assert_eq!(store.read().unwrap().follows.len(), 1);
    }
}
