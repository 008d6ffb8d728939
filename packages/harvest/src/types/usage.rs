//! LLM token-usage accounting.

use serde::{Deserialize, Serialize};

/// Token usage accumulated across extraction calls, printed at end of run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of LLM API requests made
    pub requests: u64,

    /// Prompt tokens consumed
    pub prompt_tokens: u64,

    /// Completion tokens generated
    pub completion_tokens: u64,
}

impl UsageStats {
    /// Create zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total tokens, prompt plus completion.
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }

    /// Fold one API call's usage into the running totals.
    pub fn record(&mut self, prompt_tokens: u64, completion_tokens: u64) {
        self.requests += 1;
        self.prompt_tokens += prompt_tokens;
        self.completion_tokens += completion_tokens;
    }
}

impl std::fmt::Display for UsageStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requests, {} prompt tokens, {} completion tokens ({} total)",
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens()
        )
    }
}
