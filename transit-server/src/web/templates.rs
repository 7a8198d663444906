//! Askama templates for the informational page.

use askama::Template;

use crate::tools::{ToolDescriptor, catalog};

/// Home page listing the available tools.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub version: &'static str,
    pub tools: Vec<ToolDescriptor>,
}

impl IndexTemplate {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            tools: catalog(),
        }
    }
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self::new()
    }
}
