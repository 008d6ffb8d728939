//! Caregiver-resource directory crawler.
//!
//! Crawls a paginated listing site, extracts structured records with an
//! LLM, and writes them to CSV or a gzipped JSON archive.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::num::NonZeroU32;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harvest::output::{write_archive_file, write_csv_file};
use harvest::{
    crawl_listing, sanitize_filename, CrawlConfig, ExtractionStrategy, Extractor, FetcherExt,
    HttpFetcher, OpenAiExtractor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values with a fixed header row
    Csv,
    /// Gzip-compressed JSON array
    Archive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    /// Groq's OpenAI-compatible endpoint (GROQ_API_KEY)
    Groq,
    /// OpenAI (OPENAI_API_KEY)
    Openai,
}

#[derive(Debug, Parser)]
#[command(name = "carepair", about = "Extract caregiver resources from a paginated directory")]
struct Cli {
    /// First page of the listing to crawl
    base_url: String,

    /// Output file; defaults to a name derived from the URL
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// CSS selector scoping the page text sent to the LLM
    #[arg(long, default_value = "body")]
    selector: String,

    /// Stop after this many pages even if results keep coming
    #[arg(long, default_value_t = 50)]
    max_pages: u32,

    /// LLM provider
    #[arg(long, value_enum, default_value_t = Provider::Groq)]
    provider: Provider,

    /// Override the provider's default model
    #[arg(long)]
    model: Option<String>,

    /// Cap on fetch requests per second (must be at least 1)
    #[arg(long)]
    rps: Option<NonZeroU32>,
}

impl Cli {
    fn output_path(&self) -> String {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let stem = sanitize_filename(&self.base_url);
                match self.format {
                    OutputFormat::Csv => format!("{stem}.csv"),
                    OutputFormat::Archive => format!("{stem}.json.gz"),
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,harvest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    // Fail on bad config and missing credentials before touching the network.
    let config = CrawlConfig::new(&cli.base_url)
        .with_selector(&cli.selector)
        .with_max_pages(cli.max_pages);
    config.validate().context("invalid crawl configuration")?;

    let mut extractor = match cli.provider {
        Provider::Groq => OpenAiExtractor::groq_from_env(),
        Provider::Openai => OpenAiExtractor::from_env(),
    }
    .context("missing LLM credentials")?;
    if let Some(model) = &cli.model {
        extractor = extractor.with_model(model.as_str());
    }

    let strategy = ExtractionStrategy::care_resources(extractor.model());
    let output_path = cli.output_path();

    let outcome = match cli.rps {
        Some(rps) => {
            let fetcher = HttpFetcher::new().rate_limited(rps);
            crawl_listing(&config, &strategy, &fetcher, &extractor).await?
        }
        None => {
            let fetcher = HttpFetcher::new();
            crawl_listing(&config, &strategy, &fetcher, &extractor).await?
        }
    };

    match cli.format {
        OutputFormat::Csv => write_csv_file(&output_path, &outcome.records)?,
        OutputFormat::Archive => write_archive_file(&output_path, &outcome.records)?,
    }

    println!("{}", outcome.report);
    println!("LLM usage: {}", extractor.usage());
    println!("Wrote {} records to {}", outcome.records.len(), output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name_follows_url() {
        let cli = Cli::parse_from(["carepair", "https://example.org/resources"]);
        assert_eq!(cli.output_path(), "example.org_resources.csv");
    }

    #[test]
    fn test_archive_format_changes_extension() {
        let cli = Cli::parse_from([
            "carepair",
            "https://example.org/resources",
            "--format",
            "archive",
        ]);
        assert_eq!(cli.output_path(), "example.org_resources.json.gz");
    }

    #[test]
    fn test_explicit_output_wins() {
        let cli = Cli::parse_from(["carepair", "https://e.org", "-o", "out.csv"]);
        assert_eq!(cli.output_path(), "out.csv");
    }

    #[test]
    fn test_zero_rps_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["carepair", "https://e.org", "--rps", "0"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["carepair", "https://e.org", "--rps", "2"]);
        assert_eq!(cli.rps, NonZeroU32::new(2));
    }
}
