use clap::Parser;
use igbo_api::app::build_router;
use igbo_api::config::Config;
use igbo_api::dictionary::embedded::Dictionary;
use igbo_api::dictionary::seed::seed;
use igbo_api::entities::repository::Repository;
use igbo_api::shutdown::{Shutdown, shutdown_signal};
use igbo_api::storage::Connection;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("igbo_api=info,tower_http=info")),
        )
        .init();

    let config = Arc::new(Config::parse());
    tracing::info!("Starting in {:?} mode", config.runtime_env);

    // 1. Database:
    let connection = Connection::open(&config.database_uri)
        .with_context(|| format!("opening {}", config.database_uri))?;
    let repo = Repository::new(connection.clone());

    // 2. Embedded dictionary:
    let dictionary =
        Arc::new(Dictionary::embedded().context("parsing the embedded dictionary")?);
    tracing::info!(
        "Loaded {} headwords ({} terms)",
        dictionary.len(),
        dictionary.term_count()
    );

    if config.seed_at_startup() {
        let report = seed(&repo, &dictionary, config.index_ready_timeout()).await?;
        tracing::info!("Startup seed: {:?}", report);
    } else if config.seed_on_startup {
        tracing::warn!("Ignoring seed on startup in production");
    }

    // 3. HTTP server:
    let shutdown = Shutdown::new();
    let app = build_router(repo, dictionary, config.clone(), shutdown.clone());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    if let Some(duration) = config.build_check() {
        tracing::info!("Testing server build, exiting in {:?}", duration);
        shutdown.trigger_after(duration);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    connection.close();
    tracing::info!("Database connection closed");

    Ok(())
}
