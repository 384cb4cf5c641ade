//! Appends harvested paper titles to a text file.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::client::SemanticScholarClient;
use crate::config::Config;
use crate::error::{SinkError, SinkResult};
use crate::models::Paper;
use crate::paginator::{Paginator, SearchOptions, StopReason};

/// Newline-delimited title file, opened afresh for every batch.
#[derive(Debug, Clone)]
pub struct TitleSink {
    path: PathBuf,
}

impl TitleSink {
    /// Sink writing to `path`. The file is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one title per paper and close the file again.
    ///
    /// Returns the number of lines written.
    pub async fn append_batch(&self, batch: &[Paper]) -> SinkResult<usize> {
        let mut lines = String::new();
        for paper in batch {
            lines.push_str(paper.title_line());
            lines.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| SinkError::io(&self.path, e))?;

        file.write_all(lines.as_bytes()).await.map_err(|e| SinkError::io(&self.path, e))?;
        file.flush().await.map_err(|e| SinkError::io(&self.path, e))?;

        Ok(batch.len())
    }
}

/// Outcome of one harvest run.
#[derive(Debug)]
pub struct HarvestReport {
    /// Batches received from the API.
    pub batches: usize,
    /// Lines appended to the output file.
    pub titles_written: usize,
    /// Why pagination ended.
    pub stop_reason: StopReason,
}

impl HarvestReport {
    /// True unless a request failed mid-run.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.stop_reason.is_clean()
    }
}

/// Drive `paginator` to completion, appending every batch to `sink`.
///
/// Request failures end the run and show up in the report; only file
/// errors are returned as `Err`.
pub async fn drain(mut paginator: Paginator<'_>, sink: &TitleSink) -> SinkResult<HarvestReport> {
    let mut batches = 0;
    let mut titles_written = 0;

    {
        let stream = paginator.batches();
        futures::pin_mut!(stream);

        while let Some(batch) = stream.next().await {
            batches += 1;
            titles_written += sink.append_batch(&batch).await?;
        }
    }

    // The batch stream only ends after a stop reason has been recorded.
    let stop_reason = paginator.into_stop_reason().unwrap_or(StopReason::Exhausted);

    Ok(HarvestReport { batches, titles_written, stop_reason })
}

/// Search `query` and append every result title to `output_path`.
pub async fn consume(
    config: &Config,
    query: &str,
    output_path: impl AsRef<Path>,
    max_results: Option<u64>,
) -> SinkResult<HarvestReport> {
    let client =
        SemanticScholarClient::new(config).map_err(|e| SinkError::Setup(e.to_string()))?;
    let paginator = Paginator::new(&client, query, SearchOptions::from_config(config, max_results));
    let sink = TitleSink::new(output_path.as_ref());

    let report = drain(paginator, &sink).await?;

    tracing::info!(
        query,
        path = %sink.path().display(),
        batches = report.batches,
        titles_written = report.titles_written,
        stop_reason = %report.stop_reason,
        "Harvest finished"
    );

    Ok(report)
}
