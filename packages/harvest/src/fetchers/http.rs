//! HTTP-based fetcher implementation.
//!
//! Fetches listing pages with reqwest, isolates the configured content
//! container with a CSS selector, and detects the site's end-of-results
//! signal.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{FetchOutcome, Fetcher, ListingPage};
use crate::types::config::CrawlConfig;

/// Fetcher that pulls listing pages over HTTP.
///
/// Not a crawler: it only ever requests `config.page_url(n)` and never
/// follows links. JavaScript-rendered listings need a rendering service
/// in front of it.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "CarePairBot/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, config: &CrawlConfig, page: u32) -> FetchResult<FetchOutcome> {
        let url = config.page_url(page);
        debug!(url = %url, page = page, "HTTP fetch starting");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http {
                    url: url.clone(),
                    source: Box::new(e),
                }
            })?;

        let status = response.status();

        // Past the last page many listing sites 404 rather than render a
        // marker; treat that as end-of-results, not a failure.
        if status.as_u16() == 404 {
            debug!(url = %url, "404, treating as end of results");
            return Ok(FetchOutcome::NoMoreResults);
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;

        let text = select_text(&html, &config.css_selector);

        if text.contains(&config.end_marker) {
            debug!(url = %url, "end-of-results marker found");
            return Ok(FetchOutcome::NoMoreResults);
        }

        let listing = ListingPage::new(url, page, text);
        if !listing.has_content() {
            debug!(url = %listing.url, "content container empty, treating as end of results");
            return Ok(FetchOutcome::NoMoreResults);
        }

        debug!(
            url = %listing.url,
            content_length = listing.text.len(),
            "Page fetched successfully"
        );

        if config.page_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(config.page_delay_ms)).await;
        }

        Ok(FetchOutcome::Page(listing))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Text of all nodes matching `selector`, whitespace-normalized.
///
/// An unparseable selector yields empty output; `CrawlConfig::validate`
/// rejects such selectors before a crawl starts.
fn select_text(html: &str, selector: &str) -> String {
    let selector = match scraper::Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    let document = scraper::Html::parse_document(html);
    let mut chunks: Vec<String> = Vec::new();

    for element in document.select(&selector) {
        let text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if !text.is_empty() {
            chunks.push(text);
        }
    }

    chunks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <html>
          <head><title>Listings</title><style>body { color: red; }</style></head>
          <body>
            <nav>Home | About</nav>
            <div class="results">
              <h2>Memory Cafe</h2>
              <p>Monthly gathering for caregivers.</p>
            </div>
          </body>
        </html>
    "#;

    #[test]
    fn test_select_text_scopes_to_selector() {
        let text = select_text(HTML, "div.results");
        assert!(text.contains("Memory Cafe"));
        assert!(text.contains("Monthly gathering"));
        assert!(!text.contains("Home | About"));
    }

    #[test]
    fn test_select_text_body_includes_everything_visible() {
        let text = select_text(HTML, "body");
        assert!(text.contains("Home | About"));
        assert!(text.contains("Memory Cafe"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_select_text_no_match_is_empty() {
        assert_eq!(select_text(HTML, "table.missing"), "");
    }

    #[test]
    fn test_select_text_bad_selector_is_empty() {
        assert_eq!(select_text(HTML, "div[["), "");
    }
}
