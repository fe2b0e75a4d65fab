//! Detail resolution for a page of entry refs
//!
//! Fetches the full record for each visible entry. Failed fetches are
//! dropped without aborting the rest; the output keeps input order.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::client::CatalogBackend;
use super::index::CatalogEntryRef;
use super::record::{Pokemon, Species};

/// Resolves entry refs into detail records through a backend
#[derive(Debug)]
pub struct DetailResolver<'a, B: ?Sized> {
    backend: &'a B,
    concurrency: usize,
}

impl<'a, B> DetailResolver<'a, B>
where
    B: CatalogBackend + ?Sized,
{
    /// Sequential resolver: one request at a time, in input order
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` requests in flight (minimum 1)
    ///
    /// Output order and skip-on-failure are unchanged.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Fetch a record per ref, omitting refs whose fetch failed
    pub async fn resolve_page(&self, refs: &[CatalogEntryRef]) -> Vec<Pokemon> {
        let backend = self.backend;

        let fetched: Vec<Option<Pokemon>> = stream::iter(refs.iter())
            .map(|entry| async move {
                let identifier = entry.identifier();
                let record = backend.fetch_detail(&identifier).await;
                if record.is_none() {
                    warn!("Skipping '{}': detail record unavailable", entry.name);
                }
                record
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let records: Vec<Pokemon> = fetched.into_iter().flatten().collect();

        debug!(
            "Resolved {}/{} records via '{}'",
            records.len(),
            refs.len(),
            backend.name()
        );
        records
    }

    /// Fetch one record plus its species supplement
    ///
    /// The supplement is looked up by the record's numeric id and is
    /// optional: its failure still returns the record.
    pub async fn resolve_one(&self, identifier: &str) -> Option<(Pokemon, Option<Species>)> {
        let record = self.backend.fetch_detail(identifier).await?;

        let species_key = if record.id > 0 {
            record.id.to_string()
        } else {
            identifier.to_string()
        };

        let supplement = self.backend.fetch_supplement(&species_key).await;
        if supplement.is_none() {
            debug!("No supplement for '{}'; continuing without it", identifier);
        }

        Some((record, supplement))
    }
}
