//! OpenAI-compatible chat-completions extractor.
//!
//! The production deployment talks to Groq's OpenAI-compatible endpoint;
//! pointing `base_url` at api.openai.com works the same way. Uses the
//! json_schema structured-output mode with the strategy's record schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use harvest::extractors::OpenAiExtractor;
//!
//! let extractor = OpenAiExtractor::groq_from_env()?;
//! let records = extractor.extract(&page.text, &strategy).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::{ConfigError, ExtractError, ExtractResult};
use crate::pipeline::strategy::ExtractionStrategy;
use crate::security::credentials::ApiCredentials;
use crate::traits::extractor::Extractor;
use crate::types::resource::{CareResource, CareResourceBatch};
use crate::types::usage::UsageStats;

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI's endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Groq model, matching the production deployment.
pub const DEFAULT_GROQ_MODEL: &str = "deepseek-r1-distill-llama-70b";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

// Page text beyond this is unlikely to add records and blows the context.
const MAX_PAGE_CHARS: usize = 12_000;

/// Extractor backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiExtractor {
    client: Client,
    credentials: ApiCredentials,
    base_url: String,
    usage: Mutex<UsageStats>,
}

impl OpenAiExtractor {
    /// Create an extractor with explicit credentials, against OpenAI.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            base_url: OPENAI_BASE_URL.to_string(),
            usage: Mutex::new(UsageStats::new()),
        }
    }

    /// Create from `OPENAI_API_KEY`.
    ///
    /// A missing key is a fatal configuration error, before any fetch.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = ApiCredentials::from_env("OPENAI_API_KEY", DEFAULT_OPENAI_MODEL)?;
        Ok(Self::new(credentials))
    }

    /// Create from `GROQ_API_KEY`, against Groq's endpoint.
    pub fn groq_from_env() -> Result<Self, ConfigError> {
        let credentials = ApiCredentials::from_env("GROQ_API_KEY", DEFAULT_GROQ_MODEL)?;
        Ok(Self::new(credentials).with_base_url(GROQ_BASE_URL))
    }

    /// Set a custom base URL (Groq, Azure, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model, overriding the credentials' default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.credentials.model = model.into();
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.credentials.model
    }

    /// Make one structured chat-completions call and return the content.
    async fn chat_structured(
        &self,
        system: &str,
        user: &str,
        model: &str,
        schema: &serde_json::Value,
    ) -> ExtractResult<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "care_resource_batch".to_string(),
                    schema: schema.clone(),
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Api(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api(
                format!("LLM API returned {}: {}", status, error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Api(Box::new(e)))?;

        if let Some(usage) = chat_response.usage {
            let mut stats = self.usage.lock().expect("usage lock poisoned");
            stats.record(usage.prompt_tokens, usage.completion_tokens);
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ExtractError::EmptyResponse)
    }
}

#[async_trait]
impl Extractor for OpenAiExtractor {
    async fn extract(
        &self,
        page_text: &str,
        strategy: &ExtractionStrategy,
    ) -> ExtractResult<Vec<CareResource>> {
        if page_text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let system = format!(
            "{}\n\nReturn JSON matching the provided schema. Use null for fields you cannot find.",
            strategy.instruction
        );
        let user = truncate_chars(page_text, MAX_PAGE_CHARS);

        let content = self
            .chat_structured(&system, &user, &strategy.model, &strategy.schema)
            .await?;

        parse_records(&content)
    }

    fn usage(&self) -> UsageStats {
        *self.usage.lock().expect("usage lock poisoned")
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Parse LLM output into records, tolerating the shapes models actually emit:
/// the batch envelope, a bare array of records, or a single record object.
/// Code fences are stripped first.
pub fn parse_records(content: &str) -> ExtractResult<Vec<CareResource>> {
    let json_str = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let malformed = |json_str: &str| ExtractError::MalformedResponse {
        reason: format!(
            "expected record batch, got: {}",
            truncate_chars(json_str, 200)
        ),
    };

    let value: serde_json::Value =
        serde_json::from_str(json_str).map_err(|_| malformed(json_str))?;

    // Batch envelope, bare array, or single record; models emit all three.
    let parsed = match value {
        serde_json::Value::Object(ref map) if map.contains_key("resources") => {
            serde_json::from_value::<CareResourceBatch>(value).map(|b| b.resources)
        }
        serde_json::Value::Array(_) => serde_json::from_value::<Vec<CareResource>>(value),
        serde_json::Value::Object(_) => {
            serde_json::from_value::<CareResource>(value).map(|r| vec![r])
        }
        _ => return Err(malformed(json_str)),
    };

    parsed.map_err(|_| malformed(json_str))
}

/// Char-boundary-safe prefix of `text`.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// Request/Response types

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}
