pub mod connections;
pub mod posts;
pub mod users;

pub use connections::{Connection, NewConnection, KindredCandidate};
pub use posts::{MoodPost, NewMoodPost};
pub use users::{UserProfile, ProfileUpdate, ProfilePayload};
