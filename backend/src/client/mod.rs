//! Client-side access to the API: an HTTP client plus session-owned caches
//! for the trending and suggested-users lists.

pub mod api;
pub mod cache;
pub mod session;

pub use api::{FeedSource, MoodApiClient};
pub use cache::{Clock, SystemClock, TtlCache};
pub use session::ClientSession;
