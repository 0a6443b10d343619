use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, chat::AppState},
};

/// Start the ChatBot gateway server
///
/// This function:
/// 1. Creates the shared application state
/// 2. Builds the Axum application
/// 3. Binds to the configured address
/// 4. Serves requests until ctrl-c, then drains connections
pub async fn start_server(config: Config) -> Result<()> {
    // Configuration facts only; credentials are never logged.
    info!(
        api_key_configured = config.provider.api_key.is_some(),
        endpoint_configured = config.provider.endpoint.is_some(),
        deployment = config.provider.deployment.as_deref().unwrap_or("<unset>"),
        api_version = %config.provider.api_version,
        "Provider configuration resolved"
    );

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let state = AppState {
        config: Arc::new(config),
        http_client: reqwest::Client::new(),
    };

    let app = create_router(state);

    info!("Starting ChatBot gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // CORS contract: all origins, all methods, all headers, no credentials.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/favicon.ico", get(handlers::health::favicon))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/chat",
            post(handlers::chat::handle_chat).options(handlers::chat::handle_chat_options),
        )
        .with_state(state)
        // Chat bodies are a single message; 1MB is plenty
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
