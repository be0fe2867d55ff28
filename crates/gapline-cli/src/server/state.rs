//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use gapline::{PipelineCache, PipelineOutput};

use super::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline output, rebuilt when an input file changes.
    pub cache: Arc<RwLock<PipelineCache>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(cache: PipelineCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Current pipeline output, checked against the files on disk.
    ///
    /// Hashing and rebuilding run on the blocking pool. A fresh entry is
    /// served under the read lock; only a rebuild takes the write lock.
    pub async fn output(&self) -> Result<Arc<PipelineOutput>, ApiError> {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
            let fresh = cache.blocking_read().fresh()?;
            if let Some(entry) = fresh {
                return Ok(entry);
            }
            // Another request may have rebuilt in between; get() checks again
            Ok(cache.blocking_write().get()?)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Pipeline task failed: {}", e)))?
    }

    /// Run the pipeline again, keeping the previous output if it fails.
    pub async fn refresh(&self) -> Result<Arc<PipelineOutput>, ApiError> {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
            Ok(cache.blocking_write().refresh()?)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Pipeline task failed: {}", e)))?
    }
}
