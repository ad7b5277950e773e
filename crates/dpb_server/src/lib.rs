//! HTTP server wiring for dpb (router, handlers, and shared state).

/// HTTP error mapping for engine failures.
pub mod error;
/// HTTP handlers for the store and retrieve endpoints.
pub mod handlers;

pub use dpb_core::{config, Config, ConfigError, Lookup, PasteError, PasteStore, VERSION};

use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PasteStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state around an already opened store.
    pub fn new(config: Config, store: PasteStore) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Open the paste store described by `config` and wrap it in state.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the base directory is unusable.
    pub fn open(config: Config) -> Result<Self, ConfigError> {
        let store = PasteStore::open(&config)?;
        Ok(Self::new(config, store))
    }
}

/// Create the application router.
///
/// - `GET /` returns the version banner.
/// - `POST /` stores the request body and returns the new identifier.
/// - `GET /:id` streams a stored paste back.
///
/// Every other path goes through the same uniform not-found handling.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::paste::version)
                .post(handlers::paste::create_paste)
                .fallback(handlers::paste::method_not_allowed),
        )
        .route(
            "/:id",
            get(handlers::paste::get_paste).fallback(handlers::paste::method_not_allowed),
        )
        .fallback(handlers::paste::fallback)
        .with_state(state)
        .layer(tower::ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
}
