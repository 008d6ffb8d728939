//! Mock extractor for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractError, ExtractResult};
use crate::pipeline::strategy::ExtractionStrategy;
use crate::traits::extractor::Extractor;
use crate::types::resource::CareResource;
use crate::types::usage::UsageStats;

// Every mock call books this much fake usage.
const MOCK_PROMPT_TOKENS: u64 = 100;
const MOCK_COMPLETION_TOKENS: u64 = 25;

/// Scripted response for one extract call.
enum MockResponse {
    Records(Vec<CareResource>),
    Malformed,
}

/// Mock extractor that replays scripted record batches in call order.
///
/// # Example
///
/// ```rust
/// use harvest::extractors::MockExtractor;
/// use harvest::types::resource::CareResource;
///
/// let mock = MockExtractor::new()
///     .with_batch(vec![CareResource::named("Memory Cafe")])
///     .with_batch(vec![]);
/// ```
#[derive(Default)]
pub struct MockExtractor {
    responses: Arc<RwLock<VecDeque<MockResponse>>>,
    calls: Arc<RwLock<Vec<String>>>,
    usage: Arc<RwLock<UsageStats>>,
}

impl MockExtractor {
    /// Create an empty mock; calls beyond the script return no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a record batch for the next unscripted call (builder).
    pub fn with_batch(self, records: Vec<CareResource>) -> Self {
        self.push_batch(records);
        self
    }

    /// Queue a malformed-response error (builder).
    pub fn with_malformed_response(self) -> Self {
        self.responses
            .write()
            .unwrap()
            .push_back(MockResponse::Malformed);
        self
    }

    /// Queue a record batch.
    pub fn push_batch(&self, records: Vec<CareResource>) {
        self.responses
            .write()
            .unwrap()
            .push_back(MockResponse::Records(records));
    }

    /// Number of extract calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Page texts the extractor was called with.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

impl Clone for MockExtractor {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
            usage: Arc::clone(&self.usage),
        }
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(
        &self,
        page_text: &str,
        _strategy: &ExtractionStrategy,
    ) -> ExtractResult<Vec<CareResource>> {
        self.calls.write().unwrap().push(page_text.to_string());
        self.usage
            .write()
            .unwrap()
            .record(MOCK_PROMPT_TOKENS, MOCK_COMPLETION_TOKENS);

        match self.responses.write().unwrap().pop_front() {
            Some(MockResponse::Records(records)) => Ok(records),
            Some(MockResponse::Malformed) => Err(ExtractError::MalformedResponse {
                reason: "scripted malformed response".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn usage(&self) -> UsageStats {
        *self.usage.read().unwrap()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::strategy::ExtractionStrategy;

    #[tokio::test]
    async fn test_batches_replay_in_order() {
        let mock = MockExtractor::new()
            .with_batch(vec![CareResource::named("First")])
            .with_batch(vec![CareResource::named("Second")]);

        let strategy = ExtractionStrategy::care_resources("test");

        let first = mock.extract("page 1", &strategy).await.unwrap();
        assert_eq!(first[0].name.as_deref(), Some("First"));

        let second = mock.extract("page 2", &strategy).await.unwrap();
        assert_eq!(second[0].name.as_deref(), Some("Second"));

        // Beyond the script: empty, not an error
        let third = mock.extract("page 3", &strategy).await.unwrap();
        assert!(third.is_empty());

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.usage().requests, 3);
    }

    #[tokio::test]
    async fn test_scripted_malformed_response() {
        let mock = MockExtractor::new().with_malformed_response();
        let strategy = ExtractionStrategy::care_resources("test");

        let result = mock.extract("page", &strategy).await;
        assert!(matches!(
            result,
            Err(ExtractError::MalformedResponse { .. })
        ));
    }
}
