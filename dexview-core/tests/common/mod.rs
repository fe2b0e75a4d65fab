//! Shared helpers for dexview-core integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// `/pokemon?limit=N` body for the given names, ids starting at 1
pub fn index_body(names: &[&str]) -> String {
    let results: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "name": name,
                "url": format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1),
            })
        })
        .collect();

    json!({
        "count": 1302,
        "next": "https://pokeapi.co/api/v2/pokemon?offset=151&limit=151",
        "previous": null,
        "results": results,
    })
    .to_string()
}

/// Minimal `/pokemon/{id}` body
pub fn detail_body(id: u32, name: &str, types: &[&str], hp: u32) -> String {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": ""}}))
        .collect();

    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "base_experience": 112,
        "sprites": {
            "front_default": format!("https://img.example/{id}.png"),
            "other": {"official-artwork": {"front_default": format!("https://img.example/art/{id}.png")}}
        },
        "types": types,
        "stats": [
            {"base_stat": hp, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": ""}}
        ],
        "abilities": [{"ability": {"name": "static", "url": ""}, "is_hidden": false, "slot": 1}]
    })
    .to_string()
}

/// Minimal `/pokemon-species/{id}` body with one English and one other entry
pub fn species_body(id: u32, name: &str, english: &str) -> String {
    json!({
        "id": id,
        "name": name,
        "flavor_text_entries": [
            {"flavor_text": "Texte en français", "language": {"name": "fr", "url": ""}, "version": null},
            {"flavor_text": english, "language": {"name": "en", "url": ""}, "version": {"name": "red", "url": ""}}
        ]
    })
    .to_string()
}
