pub mod models;
pub mod db;
pub mod services;
pub mod handlers;
pub mod client;
pub mod utils;
pub mod constants;
pub mod auth;
pub mod error;
pub mod extract;
pub mod state;
pub mod app;

pub use utils::config::Config;
pub use db::connection::get_db_pool;
pub use error::{AppError, AppResult};
pub use state::AppState;

// Re-export common types
pub use sqlx::PgPool;
pub use anyhow::Result;
pub use uuid::Uuid;
pub use chrono::{DateTime, Utc};
