//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use booking_types::{BookingStore, PaymentGateway};

use super::handlers::{self, AppState};
use crate::BookingService;
use crate::openapi;

/// Routes served by [`HttpServer`], as `(method, path)`.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/get-razorpay-key"),
    ("POST", "/create-order"),
    ("POST", "/verify-payment"),
    ("POST", "/save-booking"),
    ("GET", "/api-docs/openapi.json"),
];

/// HTTP Server for the booking checkout API.
pub struct HttpServer<G: PaymentGateway, S: BookingStore> {
    state: Arc<AppState<G, S>>,
}

impl<G: PaymentGateway, S: BookingStore> HttpServer<G, S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: BookingService<G, S>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/", get(handlers::liveness))
            .route("/health", get(handlers::health))
            .route("/get-razorpay-key", get(handlers::razorpay_key::<G, S>))
            .route("/create-order", post(handlers::create_order::<G, S>))
            .route("/verify-payment", post(handlers::verify_payment::<G, S>))
            .route("/save-booking", post(handlers::save_booking::<G, S>))
            .route("/api-docs/openapi.json", get(openapi::openapi_json))
            .layer(metrics)
            .layer(CatchPanicLayer::custom(handlers::handle_panic))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        for (method, path) in ROUTES {
            tracing::info!("  {} {}", method, path);
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
