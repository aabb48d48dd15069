use std::sync::Arc;

use crate::layout::PageConfig;
use crate::storage::ObjectStore;

/// Per-server state injected into route handlers via Axum extractors.
/// Holds no mutable data; each request owns its own buffers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, page_config: PageConfig) -> Self {
        AppState { store, page_config }
    }
}
