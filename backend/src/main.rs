use moodlink::{
    app::create_router,
    auth::AuthConfig,
    db::{self, MemoryStore, PgStore, Store},
    utils::{self, StoreBackend},
    AppState, Config, get_db_pool,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;
    tracing::debug!("Loaded config: {:?}", config);

    let store = build_store(config.store_backend).await?;
    let auth = AuthConfig::new(&config.jwt_secret, config.jwt_audience.as_deref());

    let port = config.port;
    let app = create_router(AppState::new(store, auth), &config);

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(backend: StoreBackend) -> anyhow::Result<Arc<dyn Store>> {
    match backend {
        StoreBackend::Postgres => {
            let db_config = db::DatabaseConfig::from_env()?;
            let pool = get_db_pool(&db_config).await?;

            // Run migrations
            db::migrations::run_migrations(&pool).await?;

            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
