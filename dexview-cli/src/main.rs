//! dexview - browse, search and inspect the PokeAPI catalog from a terminal

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dexview_core::catalog::{Catalog, PokeApiClient, SearchState};
use dexview_core::config::ViewerConfig;

mod browse;
mod render;

/// Modules that can be traced individually
#[derive(Debug, Clone, ValueEnum)]
enum TraceModule {
    Client,
    Cache,
    Resolver,
    All,
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "dexview",
    about = "Browse, search and inspect the PokeAPI catalog",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Enable tracing (comma-separated: client,cache,resolver,all)
    #[clap(long, value_delimiter = ',', global = true)]
    trace: Vec<TraceModule>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override configuration file path
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[clap(long, global = true)]
    api_base_url: Option<String>,
}

#[derive(Parser, Debug)]
enum Command {
    /// List one page of cards
    List {
        /// Filter by name (case-insensitive substring)
        #[clap(long, short)]
        query: Option<String>,

        /// Page number, starting at 1
        #[clap(long, short, default_value = "1")]
        page: usize,

        /// Cards per page (defaults to the configured page size)
        #[clap(long, value_parser = parse_positive)]
        page_size: Option<usize>,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show one card in detail
    Show {
        /// Name or numeric id
        id: Option<String>,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show a few randomly picked cards
    Featured {
        /// Number of cards (defaults to the configured featured count)
        #[clap(long, short, value_parser = parse_positive)]
        count: Option<usize>,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Interactive session: search, page through and inspect cards
    Browse,

    /// Show configuration
    Config {
        /// Print the resolved configuration as YAML
        #[clap(long)]
        show: bool,
    },
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid number: {s}")),
    }
}

fn initialize_tracing(log_level: &LogLevel, trace_modules: &[TraceModule]) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    for module in trace_modules {
        let directive = match module {
            TraceModule::Client => "dexview_core::catalog::client=trace",
            TraceModule::Cache => "dexview_core::catalog::cache=trace",
            TraceModule::Resolver => "dexview_core::catalog::resolver=trace",
            TraceModule::All => "dexview_core=trace",
        };

        if let Ok(parsed) = directive.parse() {
            filter = filter.add_directive(parsed);
        }
    }

    // Logs go to stderr; stdout carries tables and JSON
    if !trace_modules.is_empty() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();

        tracing::info!(trace_modules = ?trace_modules, "dexview tracing enabled");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve configuration from file, environment and global flags
fn load_config(cli: &Cli) -> Result<ViewerConfig> {
    let mut config = ViewerConfig::load_with_override(cli.config.as_deref())?;

    if let Some(url) = &cli.api_base_url {
        config.api_base_url = url.clone();
        config.validate()?;
    }

    debug!(?config, "Resolved configuration");
    Ok(config)
}

fn build_catalog(config: &ViewerConfig) -> Result<Catalog<PokeApiClient>> {
    let client = PokeApiClient::new(&config.api_base_url)
        .with_context(|| format!("Failed to create API client for {}", config.api_base_url))?;
    Ok(Catalog::from_config(client, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, &cli.trace);

    let config = load_config(&cli)?;

    match cli.command {
        Command::List {
            query,
            page,
            page_size,
            json,
        } => {
            let state = SearchState::new(page_size.unwrap_or(config.page_size))
                .with_query(query.as_deref().unwrap_or_default())
                .with_page(page);
            list_command(&config, &state, json).await
        }
        Command::Show { id, json } => show_command(&config, id.as_deref(), json).await,
        Command::Featured { count, json } => {
            featured_command(&config, count.unwrap_or(config.featured_count), json).await
        }
        Command::Browse => {
            let catalog = build_catalog(&config)?;
            browse::run(&catalog, config.page_size).await
        }
        Command::Config { show } => config_command(cli.config.as_deref(), &config, show),
    }
}

async fn list_command(config: &ViewerConfig, state: &SearchState, json: bool) -> Result<()> {
    let catalog = build_catalog(config)?;
    let outcome = catalog.load_page(state).await;

    if json {
        println!("{}", render::listing_json(&outcome)?);
    } else {
        println!("{}", render::listing(&outcome, true));
    }
    Ok(())
}

async fn show_command(config: &ViewerConfig, id: Option<&str>, json: bool) -> Result<()> {
    let catalog = build_catalog(config)?;
    let outcome = catalog.load_detail(id).await;

    if json {
        println!("{}", render::detail_json(&outcome)?);
    } else {
        println!("{}", render::detail(&outcome));
    }
    Ok(())
}

async fn featured_command(config: &ViewerConfig, count: usize, json: bool) -> Result<()> {
    let catalog = build_catalog(config)?;
    let outcome = catalog.load_featured(count).await;

    if json {
        println!("{}", render::listing_json(&outcome)?);
    } else {
        println!("{}", render::listing(&outcome, false));
    }
    Ok(())
}

fn config_command(path_override: Option<&Path>, config: &ViewerConfig, show: bool) -> Result<()> {
    let path = match path_override {
        Some(path) => path.to_path_buf(),
        None => ViewerConfig::default_config_path()?,
    };

    if show {
        println!("# {}", path.display());
        print!(
            "{}",
            serde_yaml_ng::to_string(config).context("Failed to serialize config")?
        );
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
