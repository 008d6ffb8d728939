//! Extraction strategy: what the LLM is told to fill, and how.

use serde_json::Value;

use crate::types::resource::CareResourceBatch;

/// Default natural-language instruction for caregiver-resource extraction.
pub const CARE_RESOURCE_INSTRUCTION: &str = "Extract any dementia caregiving-related resources \
with fields such as name, resource type, location, contact info, description, schedule, age \
range, cost, eligibility, languages, format (virtual/in-person), and website. If a field is \
not present, omit it. Summarize long text when necessary.";

/// Configuration consumed by the LLM extraction call: which schema to fill
/// and what instruction to follow.
#[derive(Debug, Clone)]
pub struct ExtractionStrategy {
    /// Model identifier (e.g. "llama-3.3-70b-versatile", "gpt-4o-mini")
    pub model: String,

    /// Natural-language extraction instruction
    pub instruction: String,

    /// JSON schema of the record batch the LLM must produce
    pub schema: Value,
}

impl ExtractionStrategy {
    /// Strategy for extracting caregiver resources with the given model.
    pub fn care_resources(model: impl Into<String>) -> Self {
        let schema = schemars::schema_for!(CareResourceBatch);
        Self {
            model: model.into(),
            instruction: CARE_RESOURCE_INSTRUCTION.to_string(),
            schema: serde_json::to_value(&schema).expect("record schema serializes"),
        }
    }

    /// Override the instruction text.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }
}
