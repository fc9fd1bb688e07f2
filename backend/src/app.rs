use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState, Config};

pub fn create_router(state: AppState, config: &Config) -> Router {
    let cors_layer = create_cors_layer(config);

    Router::new()
        .route("/health", get(health_check))
        // Connections
        .route("/connections", get(handlers::list_connections))
        .route("/connections/connect", post(handlers::connect))
        .route("/connections/kindred", get(handlers::kindred_spirits))
        // Posts
        .route("/posts", post(handlers::create_post))
        .route("/posts/trending", get(handlers::trending_posts))
        // Users
        .route("/users/me", get(handlers::get_me).put(handlers::put_me))
        .route("/users/suggested", get(handlers::suggested_users))
        .route("/users/{id}/follow", post(handlers::follow_user))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // Default to permissive for development
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

async fn health_check() -> &'static str {
    "OK"
}
