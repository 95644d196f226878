use ng_core::{RecordStore, DEFAULT_NGRAM_LIMIT};
use std::sync::Arc;

/// Immutable state shared by every request.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub ngram_limit: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            ngram_limit: DEFAULT_NGRAM_LIMIT,
        }
    }

    pub fn with_ngram_limit(mut self, ngram_limit: u32) -> Self {
        self.ngram_limit = ngram_limit;
        self
    }
}
