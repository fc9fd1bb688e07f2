pub mod connections;
pub mod posts;
pub mod users;

pub use connections::{connect, list_connections, kindred_spirits};
pub use posts::{create_post, trending_posts};
pub use users::{get_me, put_me, suggested_users, follow_user};
