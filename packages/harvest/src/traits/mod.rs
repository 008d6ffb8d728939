//! Core trait abstractions (Fetcher, Extractor).

pub mod extractor;
pub mod fetcher;
