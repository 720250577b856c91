//! schemdex terminal browser.
//!
//! A thin consumer of the catalog service for inspection and debugging:
//! search the archive index, list facet values, or force a refresh.
//! Logging goes to stderr so stdout stays pipeable.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemdex_client::{IndexClient, IndexConfig};
use schemdex_core::record::UNKNOWN_AUTHOR;
use schemdex_core::{AppConfig, CatalogService, Dimensions, IndexSource, QueryResult};

#[derive(Parser)]
#[command(name = "schemdex", about = "Browse the schematic archive index", version)]
struct Cli {
    /// Emit JSON instead of text output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalog.
    Search {
        /// Free text matched against display name, file name, and author.
        #[arg(default_value = "")]
        query: String,

        /// Restrict results to one facet value (author by default).
        #[arg(long)]
        facet: Option<String>,

        /// 1-based page number; out-of-range values clamp.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Records per page (defaults to the configured page size).
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// List facet values with their record counts.
    Facets {
        /// Optional free text to narrow the counted set.
        #[arg(default_value = "")]
        query: String,
    },

    /// Fetch a fresh copy of the index and report its size.
    Refresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    tracing::debug!("using index {}", config.index_url);

    let client = IndexClient::new(IndexConfig::from_app_config(&config))?;
    let service = CatalogService::new(Arc::new(client) as Arc<dyn IndexSource>, config);

    match cli.command {
        Command::Search { query, facet, page, page_size } => {
            let mut criteria = service.default_criteria(query);
            criteria.facet = facet;
            criteria.page = page;
            if let Some(size) = page_size {
                criteria.page_size = size;
            }

            let result = service.search(&criteria).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_results(&result);
            }
        }
        Command::Facets { query } => {
            let criteria = service.default_criteria(query);
            let result = service.search(&criteria).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result.facet_counts)?);
            } else {
                for facet in &result.facet_counts {
                    println!("{:5}  {}", facet.count, facet.value);
                }
            }
        }
        Command::Refresh => {
            let snapshot = service.refresh().await?;
            println!("loaded {} records", snapshot.len());
        }
    }

    Ok(())
}

fn print_results(result: &QueryResult) {
    for record in &result.records {
        let mut line = format!("{}  {}", format_date(record.time_created), record.display_name);
        if record.author != UNKNOWN_AUTHOR {
            line.push_str(&format!("  by {}", record.author));
        }
        if record.dimensions != Dimensions::default() {
            line.push_str(&format!("  ({})", record.dimensions));
        }
        println!("{line}");
    }
    println!("page {}/{} ({} items)", result.page, result.total_pages, result.total_items);
}

fn format_date(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "????-??-??".to_string())
}
