//! In-memory backend for unit tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::client::CatalogBackend;
use super::index::{CatalogEntryRef, CatalogIndex};
use super::record::{NamedResource, Pokemon, Species, StatSlot, TypeSlot};

/// Mock backend serving canned records and counting calls
#[derive(Default)]
pub(crate) struct MockBackend {
    pub index: Option<CatalogIndex>,
    /// Number of leading `fetch_index` calls that fail
    pub index_failures: AtomicUsize,
    pub details: HashMap<String, Pokemon>,
    pub species: HashMap<String, Species>,
    pub failing: HashSet<String>,
    /// Make lower ids finish later so concurrent fetches complete out of order
    pub stagger: bool,

    pub index_calls: AtomicUsize,
    pub supplement_calls: AtomicUsize,
    pub detail_requests: Mutex<Vec<String>>,
    pub detail_completions: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Backend whose index holds `names` and can resolve every one of them
    pub fn with_names(names: &[&str]) -> Self {
        let entries = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                CatalogEntryRef::new(*name, format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1))
            })
            .collect();

        let details = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), pokemon(i as u32 + 1, name)))
            .collect();

        Self {
            index: Some(CatalogIndex::from_entries(entries)),
            details,
            ..Default::default()
        }
    }

    /// Backend with `count` generated entries named `mon-1`, `mon-2`, ...
    pub fn with_generated(count: usize) -> Self {
        let names: Vec<String> = (1..=count).map(|i| format!("mon-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::with_names(&refs)
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn staggered(mut self) -> Self {
        self.stagger = true;
        self
    }

    pub fn completed(&self) -> Vec<String> {
        self.detail_completions.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_requests.lock().unwrap().len()
    }

    pub fn requested(&self) -> Vec<String> {
        self.detail_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogBackend for MockBackend {
    async fn fetch_index(&self, _limit: usize) -> Option<CatalogIndex> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.index_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.index_failures.store(remaining - 1, Ordering::SeqCst);
            return None;
        }

        self.index.clone()
    }

    async fn fetch_detail(&self, identifier: &str) -> Option<Pokemon> {
        self.detail_requests
            .lock()
            .unwrap()
            .push(identifier.to_string());

        let record = self.details.get(identifier).cloned().or_else(|| {
            let id: u32 = identifier.parse().ok()?;
            self.details.values().find(|p| p.id == id).cloned()
        });

        if self.stagger {
            let id = record.as_ref().map_or(0, |p| p.id as usize);
            for _ in 0..self.details.len().saturating_sub(id) {
                tokio::task::yield_now().await;
            }
        }

        self.detail_completions
            .lock()
            .unwrap()
            .push(identifier.to_string());

        if self.failing.contains(identifier) {
            return None;
        }
        record
    }

    async fn fetch_supplement(&self, identifier: &str) -> Option<Species> {
        self.supplement_calls.fetch_add(1, Ordering::SeqCst);
        self.species.get(identifier).cloned()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

pub(crate) fn pokemon(id: u32, name: &str) -> Pokemon {
    Pokemon {
        id,
        name: name.to_string(),
        types: vec![TypeSlot {
            slot: 1,
            kind: NamedResource {
                name: "normal".to_string(),
                url: String::new(),
            },
        }],
        stats: vec![StatSlot {
            base_stat: 40 + id,
            effort: 0,
            stat: NamedResource {
                name: "hp".to_string(),
                url: String::new(),
            },
        }],
        height: Some(7),
        weight: Some(69),
        ..Default::default()
    }
}
