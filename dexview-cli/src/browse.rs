//! Interactive browse session over stdin
//!
//! One `Catalog` for the whole session, so the index is fetched once
//! and every command after that only resolves detail records.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use dexview_core::catalog::{Catalog, CatalogBackend, SearchState};

use crate::render;

const HELP: &str = "\
Commands:
  /<text>, search <text>   search by name
  clear                    clear the search
  n, next                  next page
  p, prev                  previous page
  show <id>                show one card
  reload                   refetch the card list
  help                     show this help
  q, quit                  leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Clear,
    Next,
    Prev,
    Show(Option<String>),
    Reload,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return BrowseCommand::Empty;
        }
        if let Some(query) = line.strip_prefix('/') {
            return BrowseCommand::Search(query.trim().to_string());
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "search" | "s" => BrowseCommand::Search(rest.to_string()),
            "clear" => BrowseCommand::Clear,
            "n" | "next" => BrowseCommand::Next,
            "p" | "prev" => BrowseCommand::Prev,
            "show" => BrowseCommand::Show(Some(rest.to_string()).filter(|id| !id.is_empty())),
            "reload" => BrowseCommand::Reload,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            _ => BrowseCommand::Unknown(line.to_string()),
        }
    }
}

pub async fn run<B: CatalogBackend>(catalog: &Catalog<B>, page_size: usize) -> Result<()> {
    let mut state = SearchState::new(page_size);
    let mut total_pages = show_page(catalog, &state).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = BrowseCommand::parse(&line);
        debug!(?command, "browse command");

        match command {
            BrowseCommand::Search(query) => {
                state.submit_search(&query);
                total_pages = show_page(catalog, &state).await;
            }
            BrowseCommand::Clear => {
                state.clear_search();
                total_pages = show_page(catalog, &state).await;
            }
            BrowseCommand::Next => {
                if state.next_page(total_pages) {
                    total_pages = show_page(catalog, &state).await;
                } else {
                    println!("Already on the last page.");
                }
            }
            BrowseCommand::Prev => {
                if state.prev_page() {
                    total_pages = show_page(catalog, &state).await;
                } else {
                    println!("Already on the first page.");
                }
            }
            BrowseCommand::Show(identifier) => {
                let outcome = catalog.load_detail(identifier.as_deref()).await;
                println!("{}", render::detail(&outcome));
            }
            BrowseCommand::Reload => {
                catalog.invalidate_index().await;
                total_pages = show_page(catalog, &state).await;
            }
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Quit => break,
            BrowseCommand::Empty => {}
            BrowseCommand::Unknown(input) => {
                println!("Unknown command '{input}'. Type 'help' for commands.");
            }
        }
    }

    Ok(())
}

/// Render the page for `state`; returns the page count for navigation
async fn show_page<B: CatalogBackend>(catalog: &Catalog<B>, state: &SearchState) -> usize {
    let outcome = catalog.load_page(state).await;
    println!("{}", render::listing(&outcome, true));
    outcome.controls().total_pages
}
