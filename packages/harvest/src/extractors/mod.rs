//! Extractor implementations.

pub mod mock;
pub mod openai;

pub use mock::MockExtractor;
pub use openai::OpenAiExtractor;
