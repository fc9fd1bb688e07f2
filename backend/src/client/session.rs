use std::sync::Arc;
use std::time::Duration;

use crate::client::api::FeedSource;
use crate::client::cache::{Clock, SystemClock, TtlCache};
use crate::constants::CLIENT_CACHE_TTL;
use crate::models::{MoodPost, UserProfile};

/// Per-session client state: one trending cache keyed by mood filter and one
/// suggested-users cache. Nothing is shared between sessions.
pub struct ClientSession<S> {
    source: S,
    trending: TtlCache<Vec<MoodPost>, Option<String>>,
    suggested: TtlCache<Vec<UserProfile>>,
}

impl<S: FeedSource> ClientSession<S> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, Arc::new(SystemClock), CLIENT_CACHE_TTL)
    }

    pub fn with_clock(source: S, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            trending: TtlCache::new(ttl, clock.clone()),
            suggested: TtlCache::new(ttl, clock),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn trending_posts(&mut self, mood: Option<&str>) -> Arc<Vec<MoodPost>> {
        let filter = mood.map(str::trim).filter(|m| !m.is_empty()).map(str::to_string);
        let source = &self.source;
        let mood = filter.clone();
        self.trending
            .get_or_fetch(filter, || async move { source.trending_posts(mood.as_deref()).await })
            .await
    }

    pub async fn suggested_users(&mut self) -> Arc<Vec<UserProfile>> {
        let source = &self.source;
        self.suggested.get_or_fetch((), || source.suggested_users()).await
    }

    pub fn invalidate_trending(&mut self) {
        self.trending.invalidate();
    }

    pub fn invalidate_suggested(&mut self) {
        self.suggested.invalidate();
    }
}
