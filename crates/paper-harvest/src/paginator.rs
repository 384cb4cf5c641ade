//! Offset/limit pagination over the paper search endpoint.
//!
//! A [`Paginator`] issues one request per batch, strictly in sequence, and
//! records why it stopped. Stopping is never an error for the consumer: the
//! batch sequence simply ends and [`Paginator::stop_reason`] tells a clean
//! finish apart from an aborted one.

use futures::Stream;

use crate::client::{SearchRequest, SemanticScholarClient};
use crate::config::Config;
use crate::error::ClientError;
use crate::models::Paper;

/// One page of papers from a single API call.
pub type Batch = Vec<Paper>;

/// Why a paginator stopped producing batches.
#[derive(Debug)]
pub enum StopReason {
    /// `max_results` papers have been fetched.
    CapReached,
    /// The server reported no further results.
    Exhausted,
    /// A request failed; the failure has already been logged.
    Aborted(ClientError),
}

impl StopReason {
    /// True unless a request failed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        !matches!(self, Self::Aborted(_))
    }

    /// The request failure, if the run was aborted.
    #[must_use]
    pub const fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Aborted(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapReached => f.write_str("result cap reached"),
            Self::Exhausted => f.write_str("no more results"),
            Self::Aborted(e) => write!(f, "aborted: {e}"),
        }
    }
}

/// Counters for one pagination run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchState {
    /// Papers fetched so far; also the offset of the next request.
    pub total_fetched: u64,
    /// Server-reported total, taken from the first response that carries one.
    pub total_available: Option<u64>,
}

/// Per-run search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Records requested per call, clamped to `1..=100`.
    pub page_size: u32,
    /// Stop once this many papers have been fetched.
    pub max_results: Option<u64>,
    /// Fields requested for each paper.
    pub fields: Vec<String>,
    /// Optional `fieldsOfStudy` filter.
    pub fields_of_study: Option<Vec<String>>,
}

impl SearchOptions {
    /// Options taken from the configuration, with an optional cap.
    #[must_use]
    pub fn from_config(config: &Config, max_results: Option<u64>) -> Self {
        Self {
            page_size: config.effective_page_size(),
            max_results,
            fields: config.fields.clone(),
            fields_of_study: config.fields_of_study.clone(),
        }
    }
}

/// Lazily fetches successive search pages for one query.
#[derive(Debug)]
pub struct Paginator<'a> {
    client: &'a SemanticScholarClient,
    query: String,
    options: SearchOptions,
    state: FetchState,
    stopped: Option<StopReason>,
}

impl<'a> Paginator<'a> {
    /// Create a paginator. No request is made until the first batch is pulled.
    #[must_use]
    pub fn new(
        client: &'a SemanticScholarClient,
        query: impl Into<String>,
        mut options: SearchOptions,
    ) -> Self {
        options.page_size = options.page_size.clamp(1, crate::config::api::MAX_PAGE_SIZE);
        Self { client, query: query.into(), options, state: FetchState::default(), stopped: None }
    }

    /// Current counters.
    #[must_use]
    pub const fn state(&self) -> FetchState {
        self.state
    }

    /// Why the paginator stopped, or `None` while batches may still follow.
    #[must_use]
    pub const fn stop_reason(&self) -> Option<&StopReason> {
        self.stopped.as_ref()
    }

    /// Consume the paginator, returning the stop reason if it has stopped.
    #[must_use]
    pub fn into_stop_reason(self) -> Option<StopReason> {
        self.stopped
    }

    /// Fetch the next batch, or `None` once the run has stopped.
    pub async fn next_batch(&mut self) -> Option<Batch> {
        if self.stopped.is_some() {
            return None;
        }

        let limit = match self.options.max_results {
            Some(max) => {
                let remaining = max.saturating_sub(self.state.total_fetched);
                if remaining == 0 {
                    self.stop(StopReason::CapReached);
                    return None;
                }
                remaining.min(u64::from(self.options.page_size)) as u32
            }
            None => self.options.page_size,
        };

        let request = SearchRequest {
            query: &self.query,
            offset: self.state.total_fetched,
            limit,
            fields: &self.options.fields,
            fields_of_study: self.options.fields_of_study.as_deref(),
        };

        let result = match self.client.search_papers(&request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    query = %self.query,
                    offset = self.state.total_fetched,
                    limit,
                    error = %e,
                    "Error searching papers"
                );
                self.stop(StopReason::Aborted(e));
                return None;
            }
        };

        if self.state.total_available.is_none() {
            self.state.total_available = result.total;
        }

        let mut batch = result.data;

        // Never count past the requested limit or the known total.
        let mut keep = limit as usize;
        if let Some(total) = self.state.total_available {
            keep = keep.min(total.saturating_sub(self.state.total_fetched) as usize);
        }
        if batch.len() > keep {
            tracing::warn!(
                received = batch.len(),
                kept = keep,
                "Server returned more papers than expected, truncating batch"
            );
            batch.truncate(keep);
        }

        if batch.is_empty() {
            self.stop(StopReason::Exhausted);
            return None;
        }

        self.state.total_fetched += batch.len() as u64;

        tracing::info!(
            batch_len = batch.len(),
            total_fetched = self.state.total_fetched,
            total_available = ?self.state.total_available,
            "Fetched batch of papers"
        );

        // Without a reported total there is no way to know more pages exist.
        let exhausted =
            self.state.total_available.is_none_or(|total| self.state.total_fetched >= total);
        if exhausted {
            self.stop(StopReason::Exhausted);
        }

        Some(batch)
    }

    /// Borrow the paginator as a stream of batches.
    ///
    /// The stream ends when the paginator stops; inspect
    /// [`Paginator::stop_reason`] afterwards.
    pub fn batches(&mut self) -> impl Stream<Item = Batch> + '_ {
        async_stream::stream! {
            while let Some(batch) = self.next_batch().await {
                yield batch;
            }
        }
    }

    fn stop(&mut self, reason: StopReason) {
        tracing::debug!(
            reason = %reason,
            total_fetched = self.state.total_fetched,
            "Pagination stopped"
        );
        self.stopped = Some(reason);
    }
}

/// Search `query` and return a paginator over its result batches.
#[must_use]
pub fn search<'a>(
    client: &'a SemanticScholarClient,
    query: &str,
    page_size: u32,
    max_results: Option<u64>,
) -> Paginator<'a> {
    let options = SearchOptions {
        page_size,
        max_results,
        fields: crate::config::fields::SEARCH.iter().map(ToString::to_string).collect(),
        fields_of_study: None,
    };
    Paginator::new(client, query, options)
}
