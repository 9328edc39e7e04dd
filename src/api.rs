//! HTTP application for the relay
//!
//! Wraps the relay router with CORS and request tracing and serves it until
//! Ctrl+C.
//!
//! ## Endpoint Map
//!
//! | Route                  | Description                 |
//! |------------------------|-----------------------------|
//! | `POST /api/send/email` | Relay an anonymous e-mail   |
//! | `POST /api/send/sms`   | Relay an anonymous SMS      |
//! | `GET /api/health`      | Liveness probe              |

use crate::config::ToqueConfig;
use crate::error::Result;
use crate::relay::{relay_router, RelayService, RelayState};
use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete relay HTTP application
pub fn build_app(state: RelayState, cors_origins: &[String]) -> Router {
    relay_router(state)
        .layer(build_cors(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind, serve, and shut down gracefully on Ctrl+C
pub async fn serve(config: ToqueConfig) -> Result<()> {
    let service = RelayService::from_config(&config)?;
    tracing::info!(
        email = service.email_enabled(),
        sms = service.sms_enabled(),
        "Relay providers"
    );

    let state = RelayState {
        service: Arc::new(service),
    };
    let app = build_app(state, &config.server.cors_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Toque relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Toque relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down...");
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
