//! Shared query parameter types for API handlers.

use agora_core::pagination::Page;
use serde::Deserialize;

/// Collection pagination parameters (`?page=`), 1-based.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

impl PageParams {
    /// Resolve against the configured page size.
    pub fn resolve(&self, page_size: i64) -> Page {
        Page::new(self.page, page_size)
    }
}
