mod config;
mod errors;
mod extract;
mod llm_client;
mod routes;
mod state;
mod store;
mod tailoring;
mod workspace;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileStore, RedisStore, StateStore};
use crate::workspace::transitions::Workspace;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Rewriter v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;

    // Persisted values are read once; every later change is written back.
    let persisted = store
        .load()
        .await
        .context("Failed to load persisted workspace")?;
    info!(
        "Loaded workspace from {} store: {} job descriptions, resume {}, api key {}",
        store.backend(),
        persisted.job_descriptions.len(),
        if persisted.resume.is_empty() { "empty" } else { "present" },
        if persisted.api_key.is_empty() { "unset" } else { "set" },
    );

    let llm = LlmClient::new(
        config.openai_api_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build HTTP client")?;
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        llm.api_url()
    );

    let state = AppState {
        workspace: Arc::new(RwLock::new(Workspace::from_persisted(persisted))),
        store,
        tailor: Arc::new(llm),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when REDIS_URL is configured, otherwise the JSON file at STATE_PATH.
async fn build_store(config: &Config) -> Result<Arc<dyn StateStore>> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url)
                .await
                .context("Failed to connect to Redis state store")?;
            Ok(Arc::new(store))
        }
        None => {
            info!("Using file state store at {}", config.state_path.display());
            Ok(Arc::new(FileStore::new(config.state_path.clone())))
        }
    }
}
