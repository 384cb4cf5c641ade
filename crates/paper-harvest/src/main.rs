//! Paper Harvest - Entry Point
//!
//! Appends the titles of every paper matching a query to a text file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_harvest::{config::Config, sink};

#[derive(Parser, Debug)]
#[command(name = "paper-harvest")]
#[command(about = "Append Semantic Scholar search result titles to a file")]
#[command(version)]
struct Cli {
    /// Search query (keywords or a quoted phrase)
    query: String,

    /// File the titles are appended to
    #[arg(short, long, default_value = "papers.txt")]
    output: PathBuf,

    /// Stop after this many papers (default: everything the API reports)
    #[arg(long)]
    max_results: Option<u64>,

    /// Papers requested per call (the API accepts at most 100)
    #[arg(long, default_value_t = 100)]
    page_size: u32,

    /// Seconds to pause before every request
    #[arg(long, default_value_t = 10)]
    delay_secs: u64,

    /// Restrict results to these fields of study (comma separated)
    #[arg(long, value_delimiter = ',')]
    fields_of_study: Vec<String>,

    /// Semantic Scholar API key (overrides SEMANTIC_SCHOLAR_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key.clone());
        }
        config.page_size = self.page_size;
        config.rate_limit_delay = Duration::from_secs(self.delay_secs);
        config.request_timeout = self.timeout_secs.map(Duration::from_secs);
        if !self.fields_of_study.is_empty() {
            config.fields_of_study = Some(self.fields_of_study.clone());
        }
        Ok(config)
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = cli.config()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        query = %cli.query,
        output = %cli.output.display(),
        max_results = ?cli.max_results,
        has_api_key = config.has_api_key(),
        "Starting paper harvest"
    );

    let report = sink::consume(&config, &cli.query, &cli.output, cli.max_results).await?;

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
