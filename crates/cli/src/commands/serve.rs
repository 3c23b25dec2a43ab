use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderValue;
use campus_core::config::CampusConfig;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};

use super::open_repository;

/// Run the `serve` command: start the REST API server.
pub async fn run(config_path: &str, bind: Option<&str>, port: Option<u16>) -> anyhow::Result<()> {
    let config = CampusConfig::load(Path::new(config_path))?;
    config.validate()?;

    let repo = open_repository(&config).await?;
    let addr = listen_address(&config, bind, port);

    let state = Arc::new(campus_api::AppState {
        repo,
        config: config.clone(),
    });
    let app = campus_api::router(state)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let listener = TcpListener::bind(&addr).await?;

    println!("Campus API listening on http://{}", addr);
    info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Command-line overrides win over the `[server]` section.
fn listen_address(config: &CampusConfig, bind: Option<&str>, port: Option<u16>) -> String {
    let bind = bind.unwrap_or(config.server.bind_address.as_str());
    let port = port.unwrap_or(config.server.port);
    format!("{bind}:{port}")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
