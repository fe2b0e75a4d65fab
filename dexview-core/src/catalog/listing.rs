//! Page, detail and featured loads
//!
//! [`Catalog`] ties the index cache, the query engine and the detail
//! resolver together. Every load returns an outcome value carrying either
//! renderable data or a user-facing message; nothing here panics or
//! returns a bare error to the presentation layer.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::cache::{IndexCache, DEFAULT_COLLECTION_LIMIT};
use super::client::CatalogBackend;
use super::index::{CatalogEntryRef, CatalogIndex};
use super::query::{page, page_count, PaginationControls, SearchState};
use super::record::Pokemon;
use super::resolver::DetailResolver;
use crate::config::ViewerConfig;
use crate::view::{Card, DetailView, PLACEHOLDER_IMAGE};

/// Default number of featured cards
pub const DEFAULT_FEATURED_COUNT: usize = 4;

/// Conditions that replace a page's content with a message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("Failed to load the card list. Please try again later.")]
    IndexUnavailable,

    #[error("Failed to load cards. Please try again later.")]
    NothingLoaded,

    #[error("Failed to load card information for '{0}'. Please try again later.")]
    DetailUnavailable(String),

    #[error("No cards to feature.")]
    NothingToFeature,
}

/// A resolved list page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    pub state: SearchState,
    pub cards: Vec<Card>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub controls: PaginationControls,
    /// Entries on this page whose record could not be fetched
    pub skipped: usize,
}

/// Result of a list or featured load
#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    Page(ListingPage),
    /// The query matched nothing (or the index is empty)
    NoResults { query: String },
    Failed(ListingError),
}

/// Result of a detail load
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Box<DetailView>),
    /// No identifier was given; no request was made
    NotFound,
    Failed(ListingError),
}

impl ListingOutcome {
    /// Message to show instead of content, if any
    pub fn message(&self) -> Option<String> {
        match self {
            ListingOutcome::Page(page) if page.cards.is_empty() => Some(format!(
                "Page {} is past the last page ({}).",
                page.state.page, page.total_pages
            )),
            ListingOutcome::Page(_) => None,
            ListingOutcome::NoResults { .. } => {
                Some("No cards found. Try a different search.".to_string())
            }
            ListingOutcome::Failed(e) => Some(e.to_string()),
        }
    }

    pub fn page(&self) -> Option<&ListingPage> {
        match self {
            ListingOutcome::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Pagination controls to show alongside this outcome
    pub fn controls(&self) -> PaginationControls {
        match self {
            ListingOutcome::Page(page) => page.controls,
            _ => PaginationControls::disabled(),
        }
    }
}

impl DetailOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            DetailOutcome::Found(_) => None,
            DetailOutcome::NotFound => Some(
                "Card not found. Go back to the card list with `dexview list`.".to_string(),
            ),
            DetailOutcome::Failed(e) => Some(e.to_string()),
        }
    }
}

/// Catalog session: one backend, one index cache
pub struct Catalog<B> {
    backend: B,
    cache: IndexCache,
    concurrency: usize,
    placeholder_image: String,
}

impl<B: CatalogBackend> Catalog<B> {
    /// Catalog with default collection limit and sequential resolution
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: IndexCache::new(DEFAULT_COLLECTION_LIMIT),
            concurrency: 1,
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    pub fn from_config(backend: B, config: &ViewerConfig) -> Self {
        Self {
            backend,
            cache: IndexCache::new(config.collection_limit),
            concurrency: config.concurrency.max(1),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Drop the cached index so the next load refetches it
    pub async fn invalidate_index(&self) {
        self.cache.invalidate().await;
    }

    /// The collection index, fetched on first use
    pub async fn index(&self) -> Result<Arc<CatalogIndex>, ListingError> {
        self.cache.get_index(&self.backend).await
    }

    fn resolver(&self) -> DetailResolver<'_, B> {
        DetailResolver::new(&self.backend).with_concurrency(self.concurrency)
    }

    /// Load one list page for the given search state
    pub async fn load_page(&self, state: &SearchState) -> ListingOutcome {
        let index = match self.index().await {
            Ok(index) => index,
            Err(e) => {
                warn!("Listing aborted: {}", e);
                return ListingOutcome::Failed(e);
            }
        };

        let slice = page(&index, state);
        if slice.is_no_results() {
            debug!("No entries match '{}'", state.query);
            return ListingOutcome::NoResults {
                query: state.query.clone(),
            };
        }

        let total_pages = page_count(slice.total_matched, state.page_size);
        let controls = PaginationControls::new(state.page, total_pages);

        if slice.items.is_empty() {
            debug!("Page {} is beyond the last page {}", state.page, total_pages);
            return ListingOutcome::Page(ListingPage {
                state: state.clone(),
                cards: Vec::new(),
                total_matched: slice.total_matched,
                total_pages,
                controls,
                skipped: 0,
            });
        }

        let records = self.resolver().resolve_page(&slice.items).await;
        if records.is_empty() {
            warn!(
                "None of the {} entries on page {} could be loaded",
                slice.items.len(),
                state.page
            );
            return ListingOutcome::Failed(ListingError::NothingLoaded);
        }

        info!(
            "Loaded page {}/{} ({} of {} matches)",
            state.page,
            total_pages,
            records.len(),
            slice.total_matched
        );

        ListingOutcome::Page(ListingPage {
            state: state.clone(),
            skipped: slice.items.len() - records.len(),
            cards: self.cards(&records),
            total_matched: slice.total_matched,
            total_pages,
            controls,
        })
    }

    /// Load the detail view for an identifier taken from user input
    ///
    /// A missing or blank identifier is reported as not found without
    /// touching the network.
    pub async fn load_detail(&self, identifier: Option<&str>) -> DetailOutcome {
        let Some(identifier) = identifier.map(str::trim).filter(|id| !id.is_empty()) else {
            debug!("Detail requested without an identifier");
            return DetailOutcome::NotFound;
        };

        match self.resolver().resolve_one(identifier).await {
            Some((record, supplement)) => DetailOutcome::Found(Box::new(DetailView::new(
                &record,
                supplement.as_ref(),
                &self.placeholder_image,
            ))),
            None => DetailOutcome::Failed(ListingError::DetailUnavailable(identifier.to_string())),
        }
    }

    /// Load `count` randomly picked entries from the collection
    pub async fn load_featured(&self, count: usize) -> ListingOutcome {
        let index = match self.index().await {
            Ok(index) => index,
            Err(e) => return ListingOutcome::Failed(e),
        };

        let picks = sample_entries(&index, count, &mut rand::thread_rng());
        if picks.is_empty() {
            debug!("Nothing to feature (count {}, {} entries)", count, index.len());
            return ListingOutcome::Failed(ListingError::NothingToFeature);
        }

        let records = self.resolver().resolve_page(&picks).await;
        if records.is_empty() {
            return ListingOutcome::Failed(ListingError::NothingLoaded);
        }

        ListingOutcome::Page(ListingPage {
            state: SearchState::new(picks.len()),
            skipped: picks.len() - records.len(),
            cards: self.cards(&records),
            total_matched: index.len(),
            total_pages: 1,
            controls: PaginationControls::disabled(),
        })
    }

    fn cards(&self, records: &[Pokemon]) -> Vec<Card> {
        records
            .iter()
            .map(|record| Card::from_record(record, &self.placeholder_image))
            .collect()
    }
}

/// Pick up to `count` distinct entries in random order
pub(crate) fn sample_entries<R: Rng + ?Sized>(
    index: &CatalogIndex,
    count: usize,
    rng: &mut R,
) -> Vec<CatalogEntryRef> {
    index
        .entries
        .choose_multiple(rng, count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod listing_tests {
    use super::*;
    use crate::catalog::testing::MockBackend;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_first_generation_paging() {
        let catalog = Catalog::new(MockBackend::with_generated(151));
        let state = SearchState::new(20);

        let first = catalog.load_page(&state).await;
        let first = first.page().unwrap();
        assert_eq!(first.cards.len(), 20);
        assert_eq!(first.total_matched, 151);
        assert_eq!(first.total_pages, 8);
        assert!(!first.controls.prev_enabled);
        assert!(first.controls.next_enabled);

        let last = catalog.load_page(&state.clone().with_page(8)).await;
        let last = last.page().unwrap();
        assert_eq!(last.cards.len(), 11);
        assert!(last.controls.prev_enabled);
        assert!(!last.controls.next_enabled);

        let beyond = catalog.load_page(&state.with_page(9)).await;
        assert!(beyond.page().unwrap().cards.is_empty());
        assert!(beyond.message().unwrap().contains("past the last page"));

        // One index fetch for all three page loads
        assert_eq!(catalog.backend().index_calls.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.backend().detail_calls(), 31);
    }

    #[tokio::test]
    async fn test_search_and_no_results() {
        let catalog = Catalog::new(MockBackend::with_names(&[
            "charmander",
            "charizard",
            "squirtle",
        ]));

        let outcome = catalog
            .load_page(&SearchState::new(20).with_query("char"))
            .await;
        let names: Vec<String> = outcome
            .page()
            .unwrap()
            .cards
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["Charmander", "Charizard"]);

        let outcome = catalog
            .load_page(&SearchState::new(20).with_query("pikachu"))
            .await;
        assert_eq!(
            outcome,
            ListingOutcome::NoResults {
                query: "pikachu".to_string()
            }
        );
        assert!(!outcome.controls().next_enabled);
        assert!(!outcome.controls().prev_enabled);
    }

    #[tokio::test]
    async fn test_partial_failure_reports_skipped() {
        let backend = MockBackend::with_names(&["bulbasaur", "ivysaur", "venusaur"]).failing("ivysaur");
        let catalog = Catalog::new(backend);

        let outcome = catalog.load_page(&SearchState::default()).await;
        let page = outcome.page().unwrap();
        assert_eq!(page.cards.len(), 2);
        assert_eq!(page.skipped, 1);
        assert_eq!(page.cards[0].name, "Bulbasaur");
        assert_eq!(page.cards[1].name, "Venusaur");
        assert!(outcome.message().is_none());
    }

    #[tokio::test]
    async fn test_nothing_loaded() {
        let backend = MockBackend::with_names(&["bulbasaur"]).failing("bulbasaur");
        let catalog = Catalog::new(backend);

        let outcome = catalog.load_page(&SearchState::default()).await;
        assert_eq!(outcome, ListingOutcome::Failed(ListingError::NothingLoaded));
        assert!(outcome.message().is_some());
    }

    #[tokio::test]
    async fn test_index_failure_then_recovery() {
        let backend = MockBackend::with_names(&["bulbasaur"]);
        backend.index_failures.store(1, Ordering::SeqCst);
        let catalog = Catalog::new(backend);

        let outcome = catalog.load_page(&SearchState::default()).await;
        assert_eq!(outcome, ListingOutcome::Failed(ListingError::IndexUnavailable));

        let outcome = catalog.load_page(&SearchState::default()).await;
        assert_eq!(outcome.page().unwrap().cards.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_index_is_no_results() {
        let backend = MockBackend {
            index: Some(CatalogIndex::default()),
            ..Default::default()
        };
        let catalog = Catalog::new(backend);

        let outcome = catalog.load_page(&SearchState::default()).await;
        assert!(matches!(outcome, ListingOutcome::NoResults { .. }));
    }

    #[tokio::test]
    async fn test_detail_without_id_makes_no_request() {
        let catalog = Catalog::new(MockBackend::with_names(&["pikachu"]));

        assert_eq!(catalog.load_detail(None).await, DetailOutcome::NotFound);
        assert_eq!(catalog.load_detail(Some("  ")).await, DetailOutcome::NotFound);
        assert!(DetailOutcome::NotFound.message().is_some());

        assert_eq!(catalog.backend().detail_calls(), 0);
        assert_eq!(catalog.backend().index_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_detail_found_and_failed() {
        let catalog = Catalog::new(MockBackend::with_names(&["pikachu"]));

        match catalog.load_detail(Some("pikachu")).await {
            DetailOutcome::Found(view) => {
                assert_eq!(view.card.name, "Pikachu");
                assert_eq!(view.height_m, Some(0.7));
                assert!(view.description.is_none());
            }
            other => panic!("expected detail, got {other:?}"),
        }

        assert_eq!(
            catalog.load_detail(Some("missingno")).await,
            DetailOutcome::Failed(ListingError::DetailUnavailable("missingno".to_string()))
        );
    }

    #[tokio::test]
    async fn test_featured_picks_distinct_entries() {
        let catalog = Catalog::new(MockBackend::with_generated(151));

        let outcome = catalog.load_featured(DEFAULT_FEATURED_COUNT).await;
        let page = outcome.page().unwrap();
        assert_eq!(page.cards.len(), 4);
        assert_eq!(page.total_matched, 151);

        let ids: HashSet<u32> = page.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn test_featured_on_small_index() {
        let catalog = Catalog::new(MockBackend::with_names(&["bulbasaur", "ivysaur"]));
        let outcome = catalog.load_featured(4).await;
        assert_eq!(outcome.page().unwrap().cards.len(), 2);

        let empty = Catalog::new(MockBackend {
            index: Some(CatalogIndex::default()),
            ..Default::default()
        });
        let outcome = empty.load_featured(4).await;
        assert_eq!(outcome, ListingOutcome::Failed(ListingError::NothingToFeature));
        assert_eq!(outcome.message().as_deref(), Some("No cards to feature."));
    }

    #[tokio::test]
    async fn test_featured_zero_count_has_its_own_message() {
        let catalog = Catalog::new(MockBackend::with_generated(10));

        let outcome = catalog.load_featured(0).await;
        assert_eq!(outcome, ListingOutcome::Failed(ListingError::NothingToFeature));
        assert!(!outcome.message().unwrap().contains("search"));
        assert_eq!(catalog.backend().detail_calls(), 0);
    }

    #[test]
    fn test_sample_entries_is_deterministic_with_seed() {
        let backend = MockBackend::with_generated(30);
        let index = backend.index.unwrap();

        let a = sample_entries(&index, 5, &mut StdRng::seed_from_u64(7));
        let b = sample_entries(&index, 5, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);

        assert!(sample_entries(&index, 0, &mut StdRng::seed_from_u64(7)).is_empty());
    }

    #[tokio::test]
    async fn test_from_config_uses_limit_and_concurrency() {
        let config = ViewerConfig {
            collection_limit: 10,
            concurrency: 3,
            ..Default::default()
        };
        let catalog = Catalog::from_config(MockBackend::with_generated(25), &config);
        assert_eq!(catalog.cache().limit(), 10);

        let outcome = catalog.load_page(&SearchState::new(25)).await;
        let page = outcome.page().unwrap();
        let ids: Vec<u32> = page.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
        assert_eq!(page.total_matched, 10);
    }

    #[tokio::test]
    async fn test_collection_limit_bounds_paging() {
        let config = ViewerConfig {
            collection_limit: 10,
            ..Default::default()
        };
        let catalog = Catalog::from_config(MockBackend::with_generated(25), &config);

        let second = catalog.load_page(&SearchState::new(5).with_page(2)).await;
        let second = second.page().unwrap();
        assert_eq!(second.total_matched, 10);
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.cards.len(), 5);
        assert!(!second.controls.next_enabled);

        let beyond = catalog.load_page(&SearchState::new(5).with_page(3)).await;
        assert!(beyond.page().unwrap().cards.is_empty());

        // Entries past the limit are not searchable either
        let outcome = catalog
            .load_page(&SearchState::new(5).with_query("mon-25"))
            .await;
        assert!(matches!(outcome, ListingOutcome::NoResults { .. }));
    }
}
