// LogLens - app/state.rs
//
// Shared state handed to every HTTP handler. Cloned per request; all
// members are reference-counted and immutable after startup.

use crate::core::analysis::Analyzer;
use crate::core::model::CategorizerMode;
use crate::core::storage::UploadSource;
use std::sync::Arc;

/// Top-level service state.
#[derive(Clone)]
pub struct AppState {
    /// Parser with the deployment's categorisation mode.
    pub analyzer: Arc<Analyzer>,

    /// Where uploads are kept between `/upload` and `/filter`.
    pub store: Arc<dyn UploadSource>,

    /// Request body limit, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(analyzer: Analyzer, store: Arc<dyn UploadSource>, max_upload_bytes: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            store,
            max_upload_bytes,
        }
    }

    pub fn mode(&self) -> CategorizerMode {
        self.analyzer.mode()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mode", &self.mode())
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}
