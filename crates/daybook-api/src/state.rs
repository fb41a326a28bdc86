//! Application state shared across route handlers.

use std::sync::Arc;
use std::time::Instant;

use daybook_chat::CommandRouter;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Stateless router; one instance serves all requests.
    pub router: Arc<CommandRouter>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(router: CommandRouter) -> Self {
        Self::from_shared(Arc::new(router))
    }

    pub fn from_shared(router: Arc<CommandRouter>) -> Self {
        Self {
            router,
            start_time: Instant::now(),
        }
    }
}
