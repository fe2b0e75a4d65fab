//! dexview Catalog - index caching, search and detail resolution
//!
//! This module turns the PokeAPI REST endpoints into pages of resolved
//! records that a presentation layer can render directly.
//!
//! # Overview
//!
//! The catalog flow:
//! - Lazily fetch the collection index once and keep it for the session
//! - Filter it with a case-insensitive name query
//! - Slice the matches into pages
//! - Resolve every visible entry into a full record, skipping failures
//!
//! # Architecture
//!
//! ```text
//! PokeAPI (https://pokeapi.co/api/v2)
//!     │
//!     ├── /pokemon?limit=N         ← collection index
//!     ├── /pokemon/{nameOrId}      ← detail records
//!     └── /pokemon-species/{id}    ← flavor text supplement
//!            │
//!            ▼
//!     CatalogBackend (PokeApiClient)
//!            │
//!            ▼
//!     IndexCache ─▶ query::page ─▶ DetailResolver
//!            │
//!            ▼
//!     Catalog::load_page / load_detail / load_featured
//! ```

mod cache;
mod client;
mod index;
mod listing;
mod query;
mod record;
mod resolver;

pub use cache::{IndexCache, DEFAULT_COLLECTION_LIMIT};
pub use client::{CatalogBackend, FetchError, PokeApiClient, DEFAULT_API_BASE_URL};
pub use index::{CatalogEntryRef, CatalogIndex};
pub use listing::{
    Catalog, DetailOutcome, ListingError, ListingOutcome, ListingPage, DEFAULT_FEATURED_COUNT,
};
pub use query::{
    page, page_count, PageSlice, PaginationControls, SearchState, DEFAULT_PAGE_SIZE,
};
pub use record::{
    AbilitySlot, FlavorTextEntry, NamedResource, OfficialArtwork, OtherSprites, Pokemon,
    Species, Sprites, StatSlot, TypeSlot,
};
pub use resolver::DetailResolver;

#[cfg(test)]
pub(crate) mod testing;
