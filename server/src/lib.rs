//! In-memory todo REST service.
//!
//! # Overview
//! `TodoStore` holds the records, `TodoService` guards it behind a lock,
//! `validation` checks payloads and `routes` maps HTTP to service calls.
//! `middleware` wraps the route table with CORS, tracing, compression,
//! security headers, the error envelope and the panic catcher.
//!
//! # Design
//! - State is an explicitly owned `AppState`, one per router, so every test
//!   builds its own isolated store.
//! - Store operations are synchronous; only the network boundary is async.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::{AppState, SharedState};
pub use store::{Todo, TodoPatch, TodoStore};

/// Router with a fresh, empty store and default configuration.
pub fn app() -> Router {
    create_app(AppState::shared(Config::default()))
}

/// Router serving `state`, wrapped in the full middleware stack.
pub fn create_app(state: SharedState) -> Router {
    middleware::apply(routes::router().with_state(state))
}

/// Serve a fresh app on `listener` until the process is killed.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `state` on `listener`, draining in-flight requests once `shutdown`
/// resolves.
pub async fn serve(
    listener: TcpListener,
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
