//! Crawl configuration.
//!
//! The original deployment kept these as module-level constants; here they
//! are an explicit struct handed to the pipeline at startup.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::types::resource::CareResource;

/// Default required fields a record must carry to be kept.
pub const DEFAULT_REQUIRED_FIELDS: [&str; 4] =
    ["name", "resource_type", "description", "source_url"];

/// Marker text the listing site renders past the last page.
pub const DEFAULT_END_MARKER: &str = "No Results Found";

/// Configuration for a paginated listing crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Listing base URL; page N is `{base_url}?page={N}`
    pub base_url: String,

    /// CSS selector for the content container on each page
    pub css_selector: String,

    /// Fields a record must have, non-empty, to be kept
    pub required_fields: Vec<String>,

    /// Text whose presence on a page signals end-of-results
    pub end_marker: String,

    /// Upper bound on pages fetched in one run
    pub max_pages: u32,

    /// Politeness delay between page fetches, in milliseconds
    pub page_delay_ms: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            css_selector: "body".to_string(),
            required_fields: DEFAULT_REQUIRED_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            max_pages: 50,
            page_delay_ms: 2000,
        }
    }
}

impl CrawlConfig {
    /// Create a config for a listing base URL with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the CSS selector.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.css_selector = selector.into();
        self
    }

    /// Set the required-field list.
    pub fn with_required_fields(
        mut self,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.required_fields = fields.into_iter().map(|f| f.into()).collect();
        self
    }

    /// Set the end-of-results marker text.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }

    /// Set the max pages bound.
    pub fn with_max_pages(mut self, max: u32) -> Self {
        self.max_pages = max;
        self
    }

    /// Set the politeness delay between page fetches.
    pub fn with_page_delay_ms(mut self, ms: u64) -> Self {
        self.page_delay_ms = ms;
        self
    }

    /// URL of the N-th listing page (1-based).
    ///
    /// Page 1 is the base URL itself; later pages carry a `page` query
    /// parameter.
    pub fn page_url(&self, page: u32) -> String {
        if page <= 1 {
            self.base_url.clone()
        } else if self.base_url.contains('?') {
            format!("{}&page={}", self.base_url, page)
        } else {
            format!("{}?page={}", self.base_url, page)
        }
    }

    /// Validate the config before any network activity.
    ///
    /// Checks that the base URL parses, the CSS selector parses, and every
    /// required field names a real record field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url).map_err(|_| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
        })?;

        scraper::Selector::parse(&self.css_selector).map_err(|_| {
            ConfigError::InvalidSelector {
                selector: self.css_selector.clone(),
            }
        })?;

        for field in &self.required_fields {
            if !CareResource::is_known_field(field) {
                return Err(ConfigError::UnknownField {
                    field: field.clone(),
                });
            }
        }

        Ok(())
    }
}
