// =============================================================================
// Moodlink Backend Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

use std::time::Duration;

// =============================================================================
// KINDRED MATCHING
// =============================================================================

/// How many of the most recent posts for a mood are scanned for kindred spirits
pub const KINDRED_SCAN_LIMIT: i64 = 50;

/// Maximum kindred spirits returned per request
pub const MAX_KINDRED_RESULTS: usize = 5;

// =============================================================================
// POSTS
// =============================================================================

/// Maximum characters in a mood label (after trimming)
pub const MAX_MOOD_LABEL_CHARS: usize = 32;

/// Maximum characters in the free-text note attached to a post
pub const MAX_NOTE_CHARS: usize = 280;

/// How far back trending posts are collected
pub const TRENDING_WINDOW_HOURS: i64 = 24;

/// Maximum posts returned by the trending endpoint
pub const MAX_TRENDING_POSTS: i64 = 20;

// =============================================================================
// USERS
// =============================================================================

/// Maximum profiles returned by the suggested users endpoint
pub const MAX_SUGGESTED_USERS: i64 = 10;

/// Maximum characters in a user identifier (token subject)
pub const MAX_USER_ID_CHARS: usize = 128;

/// Maximum characters in a username or display name
pub const MAX_USERNAME_CHARS: usize = 40;

// =============================================================================
// CLIENT CACHE
// =============================================================================

/// How long a cached trending/suggested list stays fresh on the client
pub const CLIENT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Request timeout used by the API client
pub const CLIENT_REQUEST_TIMEOUT_SECS: u64 = 15;

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default database pool size if not specified in environment
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// SEEDING
// =============================================================================

/// Moods the seeding tool picks from
pub const SEED_MOODS: &[&str] = &[
    "happy", "calm", "anxious", "sad", "excited", "tired", "grateful", "angry",
];
