//! plainmed-server: MedlinePlus search and survey API binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plainmed_core::Topic;
use plainmed_server::config::Config;
use plainmed_server::db::{self, MemoryStore, PgStore, SharedStore};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = Config::from_env();
    let store = open_store(&config).await;

    tracing::info!(store = store.name(), "Store ready");
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);
    tracing::info!(origins = ?config.cors_origins, "CORS origins");

    let app = plainmed_server::build_app(store, &config);

    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting PlainMed server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise the in-memory store
async fn open_store(config: &Config) -> SharedStore {
    match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .expect("Failed to create database pool");
            db::migrate(&pool)
                .await
                .expect("Failed to prepare database schema");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let topics = match &config.topics_file {
                Some(path) => {
                    let raw = std::fs::read_to_string(path).expect("Failed to read TOPICS_FILE");
                    let topics: Vec<Topic> =
                        serde_json::from_str(&raw).expect("TOPICS_FILE is not a topic array");
                    tracing::info!(count = topics.len(), path = %path.display(), "Seeded topics");
                    topics
                }
                None => Vec::new(),
            };
            Arc::new(MemoryStore::with_topics(topics))
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
