//! Entry point: load config, wire dependencies, and run the server.

use jobs::auth::TokenCodec;
use jobs::config::Config;
use jobs::db::{self, MemoryStore, PgStore, StoreHandle};
use jobs::{create_app, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: StoreHandle = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::ensure_schema(&pool).await?;
            tracing::info!("using postgres store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; accounts and listings are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let tokens = TokenCodec::new(&config.jwt_secret, config.jwt_expiration_hours);
    let state = AppState::new(store, tokens).with_static_dir(config.static_dir.clone());
    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
