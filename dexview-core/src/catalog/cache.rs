//! Collection index cache
//!
//! Loads the collection index on first use and keeps it for the rest of
//! the session. Failed loads are not cached, so the next request retries.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::client::CatalogBackend;
use super::index::CatalogIndex;
use super::listing::ListingError;

/// Default collection boundary: the first generation
pub const DEFAULT_COLLECTION_LIMIT: usize = 151;

/// Memoized collection index
///
/// The lock is held across the fetch so concurrent first requests
/// share a single network call.
#[derive(Debug)]
pub struct IndexCache {
    limit: usize,
    index: Mutex<Option<Arc<CatalogIndex>>>,
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_LIMIT)
    }
}

impl IndexCache {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            index: Mutex::new(None),
        }
    }

    /// Collection size limit passed to the backend
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Return the memoized index, fetching it on first use
    pub async fn get_index<B>(&self, backend: &B) -> Result<Arc<CatalogIndex>, ListingError>
    where
        B: CatalogBackend + ?Sized,
    {
        let mut slot = self.index.lock().await;

        if let Some(index) = slot.as_ref() {
            debug!("Using cached index ({} entries)", index.len());
            return Ok(Arc::clone(index));
        }

        debug!(
            "Fetching index from '{}' (limit: {})",
            backend.name(),
            self.limit
        );
        let mut index = backend
            .fetch_index(self.limit)
            .await
            .ok_or(ListingError::IndexUnavailable)?;

        // Servers may ignore `?limit=`
        if index.entries.len() > self.limit {
            debug!(
                "Backend returned {} entries, keeping the first {}",
                index.entries.len(),
                self.limit
            );
            index.entries.truncate(self.limit);
        }

        let index = Arc::new(index);

        debug!("Cached index with {} entries", index.len());
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Drop the memoized index; the next request refetches
    pub async fn invalidate(&self) {
        let mut slot = self.index.lock().await;
        if slot.take().is_some() {
            debug!("Index cache invalidated");
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.index.lock().await.is_some()
    }
}
