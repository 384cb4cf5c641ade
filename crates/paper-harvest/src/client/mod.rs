//! Semantic Scholar API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - A fixed pause before every request (see [`Pacer`])
//! - Status code mapping into [`ClientError`]
//!
//! No retries are attempted; a failed request is reported once.

mod pacer;

pub use pacer::Pacer;

use reqwest::Client;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::SearchResult;

/// Parameters for one page of the paper search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest<'a> {
    /// Free-text query.
    pub query: &'a str,
    /// Index of the first record.
    pub offset: u64,
    /// Records requested.
    pub limit: u32,
    /// Fields to return for each paper.
    pub fields: &'a [String],
    /// Optional `fieldsOfStudy` filter.
    pub fields_of_study: Option<&'a [String]>,
}

impl SearchRequest<'_> {
    /// Query string pairs in the order the API documents them.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.to_string()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("fields", self.fields.join(",")),
        ];

        if let Some(fos) = self.fields_of_study {
            if !fos.is_empty() {
                params.push(("fieldsOfStudy", fos.join(",")));
            }
        }

        params
    }
}

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// HTTP client.
    client: Client,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,

    /// Pause applied before each request.
    pacer: Pacer,
}

impl SemanticScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the
    /// HTTP client cannot be initialized.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        if let Some(ref key) = config.api_key {
            let mut value = reqwest::header::HeaderValue::from_str(key)?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            graph_api_url: config.graph_api_url.trim_end_matches('/').to_string(),
            pacer: Pacer::new(config.rate_limit_delay),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Request pacer shared by every call.
    #[must_use]
    pub const fn pacer(&self) -> Pacer {
        self.pacer
    }

    /// Fetch one page of paper search results.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a body that
    /// is not JSON.
    pub async fn search_papers(&self, request: &SearchRequest<'_>) -> ClientResult<SearchResult> {
        let url = format!("{}/paper/search", self.graph_api_url);
        self.get(&url, &request.params()).await
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(&str, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.pacer.wait().await;

        tracing::debug!(url, ?params, "GET");
        let response = self.client.get(url).query(params).send().await?;

        let response = Self::handle_response(response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient")
            .field("graph_api_url", &self.graph_api_url)
            .field("has_api_key", &self.has_api_key())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params() {
        let fields = vec!["title".to_string(), "year".to_string()];
        let request = SearchRequest {
            query: "voltage protein",
            offset: 100,
            limit: 45,
            fields: &fields,
            fields_of_study: None,
        };

        let params = request.params();
        assert_eq!(params[0], ("query", "voltage protein".to_string()));
        assert_eq!(params[1], ("limit", "45".to_string()));
        assert_eq!(params[2], ("offset", "100".to_string()));
        assert_eq!(params[3], ("fields", "title,year".to_string()));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_search_params_fields_of_study() {
        let fields = vec!["title".to_string()];
        let fos = vec!["Biology".to_string(), "Medicine".to_string()];
        let request = SearchRequest {
            query: "q",
            offset: 0,
            limit: 10,
            fields: &fields,
            fields_of_study: Some(&fos),
        };

        assert!(request.params().contains(&("fieldsOfStudy", "Biology,Medicine".to_string())));
    }
}
