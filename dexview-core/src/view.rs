//! View models handed to the presentation layer
//!
//! Plain data derived from detail records; no markup. The CLI renders
//! these as tables, text or JSON.

use serde::Serialize;

use crate::catalog::{Pokemon, Species};

/// Image shown when a record has no artwork or sprite
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1542779283-429940ce8336?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80";

/// Name shown when a record has none
pub const UNKNOWN_NAME: &str = "Unknown";

/// Summary card for list pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    pub types: Vec<String>,
    pub hp: Option<u32>,
}

/// One stat row of the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: u32,
    /// Bar fill, `base_stat / 1.5` capped at 100
    pub bar_percent: f64,
}

/// Full detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    #[serde(flatten)]
    pub card: Card,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub base_experience: Option<u32>,
    pub abilities: Vec<String>,
    pub description: Option<String>,
    pub stats: Vec<StatLine>,
}

impl Card {
    pub fn from_record(record: &Pokemon, placeholder_image: &str) -> Self {
        let name = if record.name.is_empty() {
            UNKNOWN_NAME.to_string()
        } else {
            capitalize(&record.name)
        };

        Self {
            id: record.id,
            name,
            image_url: record
                .image_url()
                .unwrap_or(placeholder_image)
                .to_string(),
            types: record.type_names().into_iter().map(capitalize).collect(),
            hp: record.hp(),
        }
    }

    /// HP for display, `??` when the record has no hp stat
    pub fn hp_display(&self) -> String {
        self.hp
            .map(|hp| hp.to_string())
            .unwrap_or_else(|| "??".to_string())
    }

    pub fn types_display(&self) -> String {
        self.types.join(", ")
    }
}

impl DetailView {
    pub fn new(record: &Pokemon, supplement: Option<&Species>, placeholder_image: &str) -> Self {
        Self {
            card: Card::from_record(record, placeholder_image),
            height_m: record.height.map(|dm| f64::from(dm) / 10.0),
            weight_kg: record.weight.map(|hg| f64::from(hg) / 10.0),
            base_experience: record.base_experience,
            abilities: record
                .ability_names()
                .into_iter()
                .map(capitalize)
                .collect(),
            description: supplement.and_then(Species::english_flavor_text),
            stats: record
                .stats
                .iter()
                .map(|s| StatLine {
                    label: stat_label(&s.stat.name),
                    value: s.base_stat,
                    bar_percent: (f64::from(s.base_stat) / 1.5).min(100.0),
                })
                .collect(),
        }
    }
}

/// Uppercase the first character, keep the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `special-attack` -> `Special attack`
fn stat_label(name: &str) -> String {
    capitalize(&name.replacen('-', " ", 1))
}
