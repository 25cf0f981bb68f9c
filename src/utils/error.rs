// src/utils/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::document::NodePath;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{what} position {position} is out of range ({available} available)")]
    OutOfRange {
        what: &'static str,
        position: usize,
        available: usize,
    },

    #[error("Expected exactly one GpUnit for precinct {precinct}, found {found}")]
    AmbiguousUnit { precinct: usize, found: usize },

    #[error("No item in index with '@id': {0}")]
    IdNotFound(String),

    #[error("No items in index with '@type': {0}")]
    TypeNotFound(String),

    #[error("Duplicate '@id' {id} at {second} (first seen at {first})")]
    DuplicateIdentifier {
        id: String,
        first: NodePath,
        second: NodePath,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("File already exists: {0}")]
    FileExists(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
