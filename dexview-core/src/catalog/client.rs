//! Remote catalog client - Abstraction over the creature-data API
//!
//! The [`CatalogBackend`] trait is what the cache and resolver talk to.
//! [`PokeApiClient`] implements it over HTTP. Every failure (transport,
//! non-success status, undecodable body) is logged and normalized to
//! `None`: callers skip the item instead of aborting the page.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::index::CatalogIndex;
use super::record::{Pokemon, Species};

/// Default PokeAPI base URL
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors from a single remote call
///
/// These never cross the [`CatalogBackend`] seam; they exist so the
/// failure can be logged with its cause before being dropped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("request URL error: {0}")]
    RequestUrl(#[from] url::ParseError),

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to send GET {url}: {source}")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Trait for catalog data sources
///
/// A `None` return is the failure marker. Implementations make a single
/// attempt per call and never panic on remote errors.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Fetch the first `limit` entries of the collection
    async fn fetch_index(&self, limit: usize) -> Option<CatalogIndex>;

    /// Fetch the full record for a name or numeric id
    async fn fetch_detail(&self, identifier: &str) -> Option<Pokemon>;

    /// Fetch the species supplement for a name or numeric id
    async fn fetch_supplement(&self, identifier: &str) -> Option<Species>;

    /// Backend identifier for logging/debugging
    fn name(&self) -> &'static str;
}

/// PokeAPI HTTP backend
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    /// Always ends with `/` so relative joins keep the version prefix
    base_url: Url,
    http: reqwest::Client,
}

impl PokeApiClient {
    /// Create a client for the given API root (e.g. `https://pokeapi.co/api/v2`)
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/")).map_err(|e| FetchError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchError::BaseUrl {
                url: base_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("dexview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /pokemon?limit={limit}`
    pub async fn try_fetch_index(&self, limit: usize) -> Result<CatalogIndex, FetchError> {
        let mut url = self.base_url.join("pokemon")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        self.get_json(url).await
    }

    /// `GET /pokemon/{nameOrId}`
    pub async fn try_fetch_detail(&self, identifier: &str) -> Result<Pokemon, FetchError> {
        let segment = normalize_identifier(identifier)?;
        let url = self.base_url.join(&format!("pokemon/{segment}"))?;
        self.get_json(url).await
    }

    /// `GET /pokemon-species/{nameOrId}`
    pub async fn try_fetch_supplement(&self, identifier: &str) -> Result<Species, FetchError> {
        let segment = normalize_identifier(identifier)?;
        let url = self.base_url.join(&format!("pokemon-species/{segment}"))?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::RequestSend {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogBackend for PokeApiClient {
    async fn fetch_index(&self, limit: usize) -> Option<CatalogIndex> {
        absent_on_error("index", &limit.to_string(), self.try_fetch_index(limit).await)
    }

    async fn fetch_detail(&self, identifier: &str) -> Option<Pokemon> {
        absent_on_error("detail", identifier, self.try_fetch_detail(identifier).await)
    }

    async fn fetch_supplement(&self, identifier: &str) -> Option<Species> {
        absent_on_error(
            "supplement",
            identifier,
            self.try_fetch_supplement(identifier).await,
        )
    }

    fn name(&self) -> &'static str {
        "pokeapi"
    }
}

fn absent_on_error<T>(kind: &str, identifier: &str, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(kind, identifier, "Failed to fetch {}: {}", kind, e);
            None
        }
    }
}

/// Lowercase and validate an identifier for use as a single path segment
///
/// API names are lowercase ASCII with `-` separators; numeric ids are digits.
fn normalize_identifier(identifier: &str) -> Result<String, FetchError> {
    let normalized = identifier.trim().to_lowercase();

    let valid = !normalized.is_empty()
        && normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(normalized)
    } else {
        Err(FetchError::InvalidIdentifier(identifier.to_string()))
    }
}
