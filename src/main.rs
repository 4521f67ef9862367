use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use travelfast_web::cache::AppCache;
use travelfast_web::store::JsonFileStore;
use travelfast_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("travelfast_web=info,tower_http=info")),
        )
        .init();

    let data_file =
        std::env::var("DATA_FILE").unwrap_or_else(|_| "travelfast_bookings.json".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let state = AppState {
        store: Arc::new(JsonFileStore::new(&data_file)),
        cache: AppCache::new(),
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, data_file = %data_file, "travelfast-web listening");

    axum::serve(listener, app(state))
        .await
        .context("server error")?;
    Ok(())
}
