//! Catalog index parsing
//!
//! The `/pokemon?limit=N` endpoint lists the entries of a collection as
//! lightweight name/url pairs. Full records are fetched separately.

use serde::{Deserialize, Serialize};

/// A catalog index (the `/pokemon` list response)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogIndex {
    /// Size of the whole remote dataset, not of this index
    #[serde(default)]
    pub count: Option<u64>,

    /// Link to the next chunk of the dataset
    #[serde(default)]
    pub next: Option<String>,

    /// Link to the previous chunk of the dataset
    #[serde(default)]
    pub previous: Option<String>,

    /// Entries in collection order
    #[serde(rename = "results")]
    pub entries: Vec<CatalogEntryRef>,
}

/// An entry ref: identifier plus link to its detail record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryRef {
    /// Entry name, also accepted by the API as an identifier
    pub name: String,

    /// Detail URL (`.../pokemon/{id}/`)
    pub url: String,
}

impl CatalogIndex {
    /// Build an index from entries
    pub fn from_entries(entries: Vec<CatalogEntryRef>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Search entries by name
    ///
    /// Case-insensitive substring match, index order preserved.
    /// A blank query matches every entry.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntryRef> {
        let query_lower = query.trim().to_lowercase();

        if query_lower.is_empty() {
            return self.entries.iter().collect();
        }

        self.entries
            .iter()
            .filter(|entry| entry.matches(&query_lower))
            .collect()
    }
}

impl CatalogEntryRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id taken from the trailing path segment of the detail URL
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }

    /// Identifier to request the detail record with
    ///
    /// The name is always accepted by the API, so it is preferred over the id.
    pub fn identifier(&self) -> String {
        if self.name.is_empty() {
            self.id().map(|id| id.to_string()).unwrap_or_default()
        } else {
            self.name.clone()
        }
    }

    /// `query_lower` must already be lowercase
    fn matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;

    fn parse(json: &str) -> serde_json::Result<CatalogIndex> {
        serde_json::from_str(json)
    }

    fn sample_index_json() -> &'static str {
        r#"{
  "count": 1302,
  "next": "https://pokeapi.co/api/v2/pokemon?offset=3&limit=3",
  "previous": null,
  "results": [
    {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
    {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"},
    {"name": "Charizard", "url": "https://pokeapi.co/api/v2/pokemon/6/"}
  ]
}"#
    }

    #[test]
    fn test_parse_index() {
        let index = parse(sample_index_json()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.count, Some(1302));
        assert!(index.previous.is_none());
        assert_eq!(index.entries[0].name, "bulbasaur");
        assert_eq!(index.entries[1].id(), Some(4));
    }

    #[test]
    fn test_parse_index_without_envelope_fields() {
        let index = parse(r#"{"results": []}"#).unwrap();
        assert!(index.is_empty());
        assert!(index.count.is_none());
    }

    #[test]
    fn test_parse_index_missing_results_fails() {
        assert!(parse(r#"{"count": 3}"#).is_err());
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let index = parse(sample_index_json()).unwrap();

        let results = index.search("CHAR");
        let names: Vec<&str> = results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "Charizard"]);

        assert!(index.search("pikachu").is_empty());
        assert_eq!(index.search("   ").len(), 3);
    }

    #[test]
    fn test_entry_id_from_url() {
        let entry = CatalogEntryRef::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
        assert_eq!(entry.id(), Some(25));

        let entry = CatalogEntryRef::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25");
        assert_eq!(entry.id(), Some(25));

        let entry = CatalogEntryRef::new("odd", "not a url");
        assert_eq!(entry.id(), None);
    }

    #[test]
    fn test_identifier_falls_back_to_id() {
        let entry = CatalogEntryRef::new("", "https://pokeapi.co/api/v2/pokemon/7/");
        assert_eq!(entry.identifier(), "7");

        let entry = CatalogEntryRef::new("squirtle", "https://pokeapi.co/api/v2/pokemon/7/");
        assert_eq!(entry.identifier(), "squirtle");
    }
}
