//! Translation Service Entry Point

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use translation_service::app::create_router;
use translation_service::config::Config;
use translation_service::security::{Authenticator, CredentialStore};
use translation_service::service::TranslationService;
use translation_service::store::TranslationStore;
use translation_service::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    config.validate()?;

    info!("Starting translation service");

    let store = TranslationStore::new(&config.database.url)
        .await
        .context("Failed to initialize translation store")?;

    let credentials = CredentialStore::from_entries(&config.security.api_keys);
    if credentials.is_empty() {
        warn!("No API keys configured; every request to /api/translations will be rejected");
    } else {
        info!(tenants = credentials.len(), "Loaded tenant credentials");
    }

    // Explicit constructor wiring, leaf-first: credentials -> authenticator,
    // store -> service.
    let state = AppState {
        service: TranslationService::new(store),
        authenticator: Arc::new(Authenticator::new(credentials)),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Translation service listening on {addr}");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
