//! Prometheus scrape endpoint.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tracing::{error, info};

use siamon_core::SiaMetrics;

pub(crate) fn router(metrics: Arc<SiaMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(handle_metrics))
        .route("/health", get(handle_health))
        .with_state(metrics)
        .layer(CompressionLayer::new())
}

pub(crate) async fn bind(addr: SocketAddr) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    Ok(listener)
}

/// Serves the registry until `shutdown` resolves.
pub(crate) async fn serve<F>(
    listener: TcpListener,
    metrics: Arc<SiaMetrics>,
    shutdown: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(metrics))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C.
pub(crate) async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received shutdown signal"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Never waits for collection: gauges hold the last values written.
async fn handle_metrics(State(metrics): State<Arc<SiaMetrics>>) -> Response {
    match metrics.encode_text() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn handle_health() -> &'static str {
    "ok"
}
