use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical user profile. Older clients send `name`/`handle`; those are
/// resolved by [`ProfilePayload::into_profile`] before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Profile body as accepted on the wire, in either the current or the legacy shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    // legacy
    pub handle: Option<String>,
    pub name: Option<String>,
}

impl ProfilePayload {
    /// Resolve the payload into the canonical shape.
    ///
    /// `username` falls back to `handle`; `display_name` falls back to `name`
    /// and then to the resolved username. Returns `None` when no username can
    /// be resolved.
    pub fn into_profile(self, user_id: &str) -> Option<ProfileUpdate> {
        let username = non_blank(self.username).or_else(|| non_blank(self.handle))?;
        let display_name = non_blank(self.display_name)
            .or_else(|| non_blank(self.name))
            .unwrap_or_else(|| username.clone());

        Some(ProfileUpdate {
            id: user_id.to_string(),
            username,
            display_name,
            avatar_url: non_blank(self.avatar_url),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
