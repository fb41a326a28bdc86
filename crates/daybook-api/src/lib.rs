//! Daybook API crate - axum HTTP shell around the chat command router.
//!
//! Exposes a health check and a single chat endpoint that hands each message
//! to [`daybook_chat::CommandRouter`].

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
