// src/lib.rs
//! Split multi-precinct election results (EDF JSON) into single-precinct
//! documents.
//!
//! A precinct is rooted at one ballot style. [`PrecinctExtractor`] copies the
//! document, works out every element reachable from that ballot style with a
//! [`PrecinctSelection`], and deletes the rest using the positions recorded by
//! a [`document::Index`].
pub mod document;
pub mod extractors;
pub mod storage;
pub mod utils;

pub use extractors::{ExtractedPrecinct, PrecinctExtractor, PrecinctSelection};
pub use utils::{AppError, ExtractError, StorageError};
