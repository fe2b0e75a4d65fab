//! Text rendering of listing and detail outcomes
//!
//! Every function returns a `String` so commands decide where it goes.

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use dexview_core::catalog::{DetailOutcome, ListingOutcome, ListingPage, PaginationControls};
use dexview_core::view::{Card, DetailView};

/// Width of a full stat bar in cells
const BAR_WIDTH: usize = 20;

/// Table row for a card
#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "#")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Types")]
    types: String,
    #[tabled(rename = "HP")]
    hp: String,
}

impl From<&Card> for CardRow {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            name: card.name.clone(),
            types: card.types_display(),
            hp: card.hp_display(),
        }
    }
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Stat")]
    label: String,
    #[tabled(rename = "Value")]
    value: u32,
    #[tabled(rename = "")]
    bar: String,
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

pub fn card_table(cards: &[Card]) -> String {
    let rows: Vec<CardRow> = cards.iter().map(CardRow::from).collect();
    styled(Table::new(&rows))
}

/// `« Prev   Page 2 of 8   Next »`, with disabled controls left out
pub fn pagination_footer(controls: &PaginationControls) -> String {
    let mut parts = Vec::new();
    if controls.prev_enabled {
        parts.push("« Prev".to_string());
    }
    parts.push(format!("Page {} of {}", controls.page, controls.total_pages));
    if controls.next_enabled {
        parts.push("Next »".to_string());
    }
    parts.join("   ")
}

fn page_header(page: &ListingPage) -> String {
    if page.state.has_query() {
        format!(
            "{} match(es) for '{}'",
            page.total_matched, page.state.query
        )
    } else {
        format!("{} card(s)", page.total_matched)
    }
}

/// Render a list page, or the outcome's message
///
/// `paged` adds the match count header and the pagination footer; the
/// featured listing leaves both out.
pub fn listing(outcome: &ListingOutcome, paged: bool) -> String {
    let Some(page) = outcome.page().filter(|p| !p.cards.is_empty()) else {
        return outcome.message().unwrap_or_default();
    };

    let mut out = String::new();
    if paged {
        out.push_str(&page_header(page));
        out.push_str("\n\n");
    }
    out.push_str(&card_table(&page.cards));
    out.push('\n');
    if page.skipped > 0 {
        out.push_str(&format!(
            "{} card(s) could not be loaded.\n",
            page.skipped
        ));
    }
    if paged {
        out.push_str(&pagination_footer(&page.controls));
        out.push('\n');
    }
    out
}

/// Fixed-width bar for a 0-100 fill
pub fn stat_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn format_measure(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{v} {unit}"))
        .unwrap_or_else(|| "??".to_string())
}

pub fn detail_view(view: &DetailView) -> String {
    let card = &view.card;
    let mut out = String::new();

    out.push_str(&format!("#{} {}\n", card.id, card.name));
    out.push_str(&format!("Types:      {}\n", card.types_display()));
    out.push_str(&format!("HP:         {}\n", card.hp_display()));
    out.push_str(&format!("Height:     {}\n", format_measure(view.height_m, "m")));
    out.push_str(&format!("Weight:     {}\n", format_measure(view.weight_kg, "kg")));
    if let Some(exp) = view.base_experience {
        out.push_str(&format!("Base exp:   {exp}\n"));
    }
    if !view.abilities.is_empty() {
        out.push_str(&format!("Abilities:  {}\n", view.abilities.join(", ")));
    }
    out.push_str(&format!("Image:      {}\n", card.image_url));

    if let Some(description) = &view.description {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }

    if !view.stats.is_empty() {
        let rows: Vec<StatRow> = view
            .stats
            .iter()
            .map(|s| StatRow {
                label: s.label.clone(),
                value: s.value,
                bar: stat_bar(s.bar_percent),
            })
            .collect();
        out.push('\n');
        out.push_str(&styled(Table::new(&rows)));
        out.push('\n');
    }

    out
}

pub fn detail(outcome: &DetailOutcome) -> String {
    match outcome {
        DetailOutcome::Found(view) => detail_view(view),
        other => other.message().unwrap_or_default(),
    }
}

/// JSON for a listing: the page itself, or `{"message": ...}`
pub fn listing_json(outcome: &ListingOutcome) -> serde_json::Result<String> {
    match outcome {
        ListingOutcome::Page(page) if !page.cards.is_empty() => {
            serde_json::to_string_pretty(page)
        }
        other => serde_json::to_string_pretty(&serde_json::json!({
            "message": other.message(),
        })),
    }
}

pub fn detail_json(outcome: &DetailOutcome) -> serde_json::Result<String> {
    match outcome {
        DetailOutcome::Found(view) => serde_json::to_string_pretty(view),
        other => serde_json::to_string_pretty(&serde_json::json!({
            "message": other.message(),
        })),
    }
}
