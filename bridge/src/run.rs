use axum::Router;
use axum::http::Method;
use dotenvy::dotenv;
use edupay::{ConnectionController, Notifier, ProviderRegistry, SessionStore};
use edupay_types::storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;

use crate::config::Config;
use crate::handlers;
use crate::sig_down::SigDown;
#[cfg(feature = "telemetry")]
use crate::telemetry::Telemetry;

/// Starts the bridge.
///
/// - Loads `.env` variables.
/// - Installs logging and, when configured, OpenTelemetry export.
/// - Builds the wallet providers and restores the previous session.
/// - Serves the HTTP endpoints until SIGTERM or SIGINT.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // The EVM and Solana RPC clients both pull in rustls; pin the provider.
    rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
        .map_err(|_| "Failed to initialize rustls crypto provider")?;

    dotenv().ok();

    #[cfg(feature = "telemetry")]
    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let config = Config::load()?;

    let storage: Arc<dyn SessionStorage> = match config.session_file() {
        Some(path) => {
            tracing::info!(path = %path.display(), "persisting wallet session to file");
            Arc::new(FileSessionStorage::new(path))
        }
        None => Arc::new(MemorySessionStorage::new()),
    };
    let registry = ProviderRegistry::from_config(config.providers(), Some(storage.clone()));
    tracing::info!(providers = ?registry, "wallet providers ready");
    let controller = ConnectionController::new(registry, SessionStore::new(storage), Notifier::new());
    controller.restore().await;

    let http_endpoints = Router::new().merge(handlers::routes().with_state(controller));
    #[cfg(feature = "telemetry")]
    let http_endpoints = http_endpoints.layer(telemetry.http_tracing());
    let http_endpoints = http_endpoints.layer(
        cors::CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(cors::Any),
    );

    let addr = SocketAddr::new(config.host(), config.port());
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    let sig_down = SigDown::try_new()?;
    let axum_cancellation_token = sig_down.cancellation_token();
    let axum_graceful_shutdown = async move { axum_cancellation_token.cancelled().await };
    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(axum_graceful_shutdown)
        .await?;

    Ok(())
}
