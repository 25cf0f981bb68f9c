// src/extractors/mod.rs
pub mod precinct;
pub mod selection;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export key extraction types for convenience
pub use precinct::{CollectionSummary, ExtractedPrecinct, PrecinctExtractor};
pub use selection::PrecinctSelection;
