//! HTTP façade for the SOS dispatcher.
//!
//! Exposes `POST /send-sos` and `GET /health` using axum.

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::{HealthResponse, OutcomeView, SosResponse};

use crate::dispatch::Dispatcher;
use crate::metrics::Metrics;
use crate::validation::RequestValidator;
use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub validator: RequestValidator,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, validator: RequestValidator, metrics: Metrics) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            validator,
            metrics,
        }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/send-sos", post(handlers::send_sos))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `port` until Ctrl-C or SIGTERM.
pub async fn run_server(router: Router, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = terminate_signal();
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

/// Resolves on SIGTERM. The handler is installed when this is called, not
/// when the future is first polled.
#[cfg(unix)]
fn terminate_signal() -> impl std::future::Future<Output = ()> {
    use tokio::signal::unix::{signal, SignalKind};

    let stream = signal(SignalKind::terminate());
    async move {
        match stream {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                // Without a signal handler, keep serving until the process is killed.
                std::future::pending::<()>().await;
            }
        }
    }
}
