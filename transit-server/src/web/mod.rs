//! Web layer for the transit query server.
//!
//! Serves the tools over JSON-RPC at `POST /mcp`, plus a health check and
//! an informational index page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
