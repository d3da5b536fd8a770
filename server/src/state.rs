//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::service::TodoService;
use crate::store::TodoStore;

/// State owned by the router for the lifetime of the server.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub todos: TodoService,
    pub started_at: Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            todos: TodoService::new(TodoStore::new()),
            started_at: Instant::now(),
        }
    }

    pub fn shared(config: Config) -> SharedState {
        Arc::new(Self::new(config))
    }

    /// Seconds since the state was created.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
