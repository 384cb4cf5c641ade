//! Paper Harvest
//!
//! Paginated client for the Semantic Scholar paper search API. Pages through
//! every result for a query (or up to a cap) and appends the paper titles to
//! a newline-delimited text file.
//!
//! # Features
//!
//! - **Offset pagination**: strictly sequential requests driven by the
//!   server-reported total
//! - **Rate-limited**: fixed pause before every request
//! - **Explicit termination**: runs end with a [`StopReason`] that separates
//!   exhaustion from a failed request
//!
//! # Example
//!
//! ```no_run
//! use paper_harvest::{config::Config, sink};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let report = sink::consume(&config, "voltage sensing", "titles.txt", Some(1000)).await?;
//!     println!("wrote {} titles ({})", report.titles_written, report.stop_reason);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod paginator;
pub mod sink;

pub use client::SemanticScholarClient;
pub use config::Config;
pub use error::{ClientError, SinkError};
pub use paginator::{Paginator, StopReason};
pub use sink::{HarvestReport, TitleSink};
