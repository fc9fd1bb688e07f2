use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::db::Store;
use crate::services::{ConnectionService, PostService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub connections: ConnectionService,
    pub posts: PostService,
    pub users: UserService,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self {
        Self {
            connections: ConnectionService::new(store.clone()),
            posts: PostService::new(store.clone()),
            users: UserService::new(store),
            auth: Arc::new(auth),
        }
    }
}
