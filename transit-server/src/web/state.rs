//! Application state for the web layer.

use std::sync::Arc;

use crate::tools::Tools;

/// Shared application state.
pub struct AppState<S> {
    /// Tool dispatcher over the feed source
    pub tools: Arc<Tools<S>>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(tools: Tools<S>) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }
}

// Manual impl: cloning shares the Arc, so `S` itself need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            tools: Arc::clone(&self.tools),
        }
    }
}
