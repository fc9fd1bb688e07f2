use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::{KINDRED_SCAN_LIMIT, MAX_KINDRED_RESULTS};
use crate::db::Store;
use crate::error::{AppError, AppResult};
use crate::models::{Connection, KindredCandidate, MoodPost, NewConnection};
use crate::utils::validation::{require_mood, validate_user_id};

#[derive(Clone)]
pub struct ConnectionService {
    store: Arc<dyn Store>,
}

impl ConnectionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Record that `user_id` connected with `target_user_id` over `mood`.
    ///
    /// Repeated calls create repeated records; there is no duplicate guard.
    pub async fn connect(&self, user_id: &str, target_user_id: &str, mood: &str) -> AppResult<Connection> {
        let user_a = validate_user_id("userId", user_id)?;
        let user_b = validate_user_id("targetUserId", target_user_id)?;
        let shared_mood = require_mood(mood)?;

        if user_a == user_b {
            return Err(AppError::validation("Cannot connect with yourself"));
        }

        let connection = self
            .store
            .insert_connection(NewConnection {
                user_a: user_a.to_string(),
                user_b: user_b.to_string(),
                shared_mood: shared_mood.to_string(),
            })
            .await?;

        tracing::info!(
            "Connection {} created: {} -> {} ({})",
            connection.id, connection.user_a, connection.user_b, connection.shared_mood
        );
        Ok(connection)
    }

    /// Connections initiated by `user_id`, newest first. Records where the
    /// user is the counterpart are not included.
    pub async fn get_connections(&self, user_id: &str) -> AppResult<Vec<Connection>> {
        let user_id = validate_user_id("userId", user_id)?;
        Ok(self.store.connections_initiated_by(user_id).await?)
    }

    /// Sample up to five other users who recently posted `current_mood`.
    pub async fn find_kindred_spirits(&self, user_id: &str, current_mood: &str) -> AppResult<Vec<KindredCandidate>> {
        let user_id = validate_user_id("userId", user_id)?;
        let mood = require_mood(current_mood)?;

        let posts = self.store.recent_posts_by_mood(mood, KINDRED_SCAN_LIMIT).await?;
        let kindred = select_kindred(&posts, user_id, MAX_KINDRED_RESULTS);

        tracing::debug!(
            "Kindred lookup for {} on '{}': scanned {} posts, found {}",
            user_id, mood, posts.len(), kindred.len()
        );
        Ok(kindred)
    }
}

/// Distinct authors other than `user_id`, in first-seen order, capped at `max`.
fn select_kindred(posts: &[MoodPost], user_id: &str, max: usize) -> Vec<KindredCandidate> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .filter(|p| p.user_id != user_id)
        .filter(|p| seen.insert(p.user_id.as_str()))
        .take(max)
        .map(|p| KindredCandidate { user_id: p.user_id.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::NewMoodPost;
    use chrono::{Duration, Utc};

    fn service() -> (Arc<MemoryStore>, ConnectionService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), ConnectionService::new(store))
    }

    fn happy_post(user_id: &str) -> NewMoodPost {
        NewMoodPost {
            user_id: user_id.to_string(),
            mood: "happy".to_string(),
            note: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_connect_assigns_id_and_timestamp() {
        let (_, service) = service();
        let before = Utc::now();

        let connection = service.connect("u1", "u2", "calm").await.unwrap();

        assert_eq!(connection.user_a, "u1");
        assert_eq!(connection.user_b, "u2");
        assert_eq!(connection.shared_mood, "calm");
        assert!(!connection.id.is_nil());
        assert!(connection.created_at >= before);
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_input() {
        let (_, service) = service();

        assert!(matches!(service.connect("", "u2", "calm").await, Err(AppError::Validation(_))));
        assert!(matches!(service.connect("u1", "", "calm").await, Err(AppError::Validation(_))));
        assert!(matches!(service.connect("u1", "u2", "  ").await, Err(AppError::Validation(_))));
        assert!(matches!(service.connect("u1", "u1", "calm").await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_connect_accepts_any_non_empty_mood() {
        let (_, service) = service();
        let long_mood = "quietly hopeful after a very long week";

        let connection = service.connect("u1", "u2", long_mood).await.unwrap();
        assert_eq!(connection.shared_mood, long_mood);
    }

    #[tokio::test]
    async fn test_connect_allows_duplicates() {
        let (_, service) = service();
        service.connect("u1", "u2", "calm").await.unwrap();
        service.connect("u1", "u2", "calm").await.unwrap();

        assert_eq!(service.get_connections("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_connections_only_initiator_newest_first() {
        let (_, service) = service();
        service.connect("u1", "u2", "calm").await.unwrap();
        service.connect("u3", "u1", "sad").await.unwrap();
        service.connect("u1", "u4", "happy").await.unwrap();

        let connections = service.get_connections("u1").await.unwrap();

        assert_eq!(connections.len(), 2);
        assert!(connections.iter().all(|c| c.user_a == "u1"));
        assert!(connections.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(connections[0].user_b, "u4");
    }

    #[tokio::test]
    async fn test_connect_then_list_end_to_end() {
        let (_, service) = service();
        service.connect("u1", "u2", "calm").await.unwrap();

        let connections = service.get_connections("u1").await.unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].user_a, "u1");
        assert_eq!(connections[0].user_b, "u2");
        assert_eq!(connections[0].shared_mood, "calm");
    }

    #[tokio::test]
    async fn test_kindred_excludes_self_dedups_and_caps() {
        let (store, service) = service();
        let now = Utc::now();
        // 50 posts, newest first: u2 u1 u3 u2 u4 u5 u6 u7, then padding from u1
        let newest_first = ["u2", "u1", "u3", "u2", "u4", "u5", "u6", "u7"];
        let mut authors: Vec<&str> = newest_first.to_vec();
        authors.resize(50, "u1");

        for (age, author) in authors.iter().enumerate() {
            store
                .insert_post_at(happy_post(author), now - Duration::seconds(age as i64))
                .unwrap();
        }

        let kindred = service.find_kindred_spirits("u1", "happy").await.unwrap();
        let ids: Vec<&str> = kindred.iter().map(|k| k.user_id.as_str()).collect();

        assert_eq!(ids, vec!["u2", "u3", "u4", "u5", "u6"]);
    }

    #[tokio::test]
    async fn test_kindred_only_scans_most_recent_posts() {
        let (store, service) = service();
        let now = Utc::now();
        for age in 0..KINDRED_SCAN_LIMIT {
            store
                .insert_post_at(happy_post("u1"), now - Duration::seconds(age))
                .unwrap();
        }
        store
            .insert_post_at(happy_post("old"), now - Duration::hours(1))
            .unwrap();

        let kindred = service.find_kindred_spirits("u1", "happy").await.unwrap();
        assert!(kindred.is_empty());
    }

    #[tokio::test]
    async fn test_kindred_ignores_other_moods() {
        let (store, service) = service();
        let now = Utc::now();
        let mut sad = happy_post("u9");
        sad.mood = "sad".to_string();
        store.insert_post_at(sad, now).unwrap();
        store.insert_post_at(happy_post("u2"), now).unwrap();

        let kindred = service.find_kindred_spirits("u1", "happy").await.unwrap();
        assert_eq!(kindred, vec![KindredCandidate { user_id: "u2".to_string() }]);
    }

    #[test]
    fn test_select_kindred_respects_max() {
        let posts: Vec<MoodPost> = (0..10)
            .map(|i| MoodPost {
                id: uuid::Uuid::new_v4(),
                user_id: format!("u{}", i),
                mood: "happy".to_string(),
                note: None,
                image_url: None,
                created_at: Utc::now(),
            })
            .collect();

        assert_eq!(select_kindred(&posts, "u0", 3).len(), 3);
        assert!(select_kindred(&posts, "u0", 10).iter().all(|k| k.user_id != "u0"));
    }
}
