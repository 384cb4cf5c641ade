//! Configuration for the paper harvester.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Maximum page size accepted by the paper search endpoint.
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Pause before every search request.
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(10);

    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";
}

/// Paper field sets for API requests.
pub mod fields {
    /// Fields requested for every search page.
    pub const SEARCH: &[&str] =
        &["title", "abstract", "year", "authors", "url", "citationCount", "fieldsOfStudy"];
}

/// Harvester configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,

    /// Delay applied before each request.
    pub rate_limit_delay: Duration,

    /// Records requested per page, clamped to `1..=100`.
    pub page_size: u32,

    /// Comma-joined into the `fields` query parameter.
    pub fields: Vec<String>,

    /// Optional `fieldsOfStudy` filter.
    pub fields_of_study: Option<Vec<String>>,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: None,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            page_size: api::MAX_PAGE_SIZE,
            fields: fields::SEARCH.iter().map(ToString::to_string).collect(),
            fields_of_study: None,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Some(Duration::from_secs(5)),
            rate_limit_delay: Duration::ZERO, // No delay in tests
            ..Self::new(None)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = match std::env::var(api::API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Some(key),
            Ok(_) | Err(std::env::VarError::NotPresent) => None,
            Err(e) => anyhow::bail!("{} is not valid unicode: {e}", api::API_KEY_ENV),
        };
        Ok(Self::new(api_key))
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Page size the API will actually accept.
    #[must_use]
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, api::MAX_PAGE_SIZE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
