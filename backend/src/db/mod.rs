pub mod connection;
pub mod migrations;
pub mod connections;
pub mod posts;
pub mod users;
pub mod store;
pub mod memory;

pub use connection::{get_db_pool, DatabaseConfig};
pub use store::{Store, PgStore};
pub use memory::MemoryStore;
