use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::constants::CLIENT_REQUEST_TIMEOUT_SECS;
use crate::models::{Connection, KindredCandidate, MoodPost, UserProfile};

/// Where a session's cacheable lists come from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn trending_posts(&self, mood: Option<&str>) -> Result<Vec<MoodPost>>;
    async fn suggested_users(&self) -> Result<Vec<UserProfile>>;
}

/// HTTP client for the moodlink API, authenticated as one user.
#[derive(Debug, Clone)]
pub struct MoodApiClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectBody<'a> {
    target_user_id: &'a str,
    mood: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostBody<'a> {
    mood: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

impl MoodApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CLIENT_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to reach API for {}", what))?
            .error_for_status()
            .with_context(|| format!("API rejected {}", what))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid response body for {}", what))
    }

    pub async fn connect(&self, target_user_id: &str, mood: &str) -> Result<Connection> {
        let request = self
            .client
            .post(self.url("/connections/connect"))
            .json(&ConnectBody { target_user_id, mood });
        self.send_json(request, "connect").await
    }

    pub async fn connections(&self) -> Result<Vec<Connection>> {
        self.send_json(self.client.get(self.url("/connections")), "connections").await
    }

    pub async fn kindred_spirits(&self, mood: &str) -> Result<Vec<KindredCandidate>> {
        let request = self
            .client
            .get(self.url("/connections/kindred"))
            .query(&[("mood", mood)]);
        self.send_json(request, "kindred spirits").await
    }

    pub async fn create_post(&self, mood: &str, note: Option<&str>, image_url: Option<&str>) -> Result<MoodPost> {
        let request = self
            .client
            .post(self.url("/posts"))
            .json(&PostBody { mood, note, image_url });
        self.send_json(request, "create post").await
    }

    pub async fn follow(&self, user_id: &str) -> Result<()> {
        self.client
            .post(self.url(&format!("/users/{}/follow", user_id)))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach API for follow")?
            .error_for_status()
            .context("API rejected follow")?;
        Ok(())
    }
}

#[async_trait]
impl FeedSource for MoodApiClient {
    async fn trending_posts(&self, mood: Option<&str>) -> Result<Vec<MoodPost>> {
        let mut request = self.client.get(self.url("/posts/trending"));
        if let Some(mood) = mood {
            request = request.query(&[("mood", mood)]);
        }
        self.send_json(request, "trending posts").await
    }

    async fn suggested_users(&self) -> Result<Vec<UserProfile>> {
        self.send_json(self.client.get(self.url("/users/suggested")), "suggested users").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::create_router;
    use crate::auth::{issue_token, AuthConfig};
    use crate::client::ClientSession;
    use crate::db::{MemoryStore, Store};
    use crate::models::ProfileUpdate;
    use crate::utils::{Config, StoreBackend};
    use crate::AppState;
    use std::sync::Arc;

    const SECRET: &str = "client-test-secret";

    /// Serve the real router on an ephemeral port; returns its base URL.
    async fn spawn_server(store: Arc<MemoryStore>) -> String {
        let config = Config {
            port: 0,
            jwt_secret: SECRET.to_string(),
            jwt_audience: None,
            store_backend: StoreBackend::Memory,
            allowed_origins: vec![],
        };
        let state = AppState::new(store, AuthConfig::new(SECRET, None));
        let app = create_router(state, &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str, user_id: &str) -> MoodApiClient {
        let token = issue_token(SECRET, user_id, None, 3600).unwrap();
        MoodApiClient::new(base_url, token).unwrap()
    }

    #[tokio::test]
    async fn test_client_round_trips_against_server() {
        let store = Arc::new(MemoryStore::new());
        let base_url = spawn_server(store.clone()).await;
        let u1 = client_for(&base_url, "u1");
        let u2 = client_for(&base_url, "u2");
        let u3 = client_for(&base_url, "u3");

        let connection = u1.connect("u2", "calm").await.unwrap();
        assert_eq!(connection.user_a, "u1");
        assert_eq!(connection.user_b, "u2");
        assert_eq!(connection.shared_mood, "calm");

        let listed = u1.connections().await.unwrap();
        assert_eq!(listed, vec![connection]);
        assert!(u2.connections().await.unwrap().is_empty());

        u2.create_post("happy", Some("sunny walk"), None).await.unwrap();
        u3.create_post("happy", None, Some("https://res.cloudinary.com/demo/a.jpg")).await.unwrap();
        u1.create_post("happy", None, None).await.unwrap();

        let kindred: Vec<String> = u1
            .kindred_spirits("happy")
            .await
            .unwrap()
            .into_iter()
            .map(|k| k.user_id)
            .collect();
        assert_eq!(kindred, vec!["u3".to_string(), "u2".to_string()]);

        // server-side validation comes back as an error
        assert!(u1.connect("u1", "calm").await.is_err());
        assert!(u1.follow("u1").await.is_err());
    }

    #[tokio::test]
    async fn test_session_caches_until_invalidated() {
        let store = Arc::new(MemoryStore::new());
        let base_url = spawn_server(store.clone()).await;
        let mut session = ClientSession::new(client_for(&base_url, "u1"));
        let u2 = client_for(&base_url, "u2");

        u2.create_post("happy", None, None).await.unwrap();
        let first = session.trending_posts(Some("happy")).await;
        assert_eq!(first.len(), 1);

        u2.create_post("happy", None, None).await.unwrap();
        let cached = session.trending_posts(Some("happy")).await;
        assert!(Arc::ptr_eq(&first, &cached));

        session.invalidate_trending();
        assert_eq!(session.trending_posts(Some("happy")).await.len(), 2);

        assert!(session.suggested_users().await.is_empty());
        store
            .upsert_user(ProfileUpdate {
                id: "u3".to_string(),
                username: "three".to_string(),
                display_name: "Three".to_string(),
                avatar_url: None,
            })
            .await
            .unwrap();
        assert!(session.suggested_users().await.is_empty());

        session.invalidate_suggested();
        let suggested = session.suggested_users().await;
        assert_eq!(suggested.len(), 1);
        assert_eq!(suggested[0].id, "u3");

        session.source().follow("u3").await.unwrap();
        session.invalidate_suggested();
        assert!(session.suggested_users().await.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MoodApiClient::new("http://localhost:3000/", "token").unwrap();
        assert_eq!(client.url("/connections"), "http://localhost:3000/connections");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_error() {
        // port 9 (discard) is not expected to serve HTTP
        let client = MoodApiClient::new("http://127.0.0.1:9", "token").unwrap();
        assert!(client.suggested_users().await.is_err());
    }
}
