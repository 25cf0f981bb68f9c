// src/storage/mod.rs
use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::extractors::{CollectionSummary, ExtractedPrecinct};
use crate::utils::error::StorageError;

// Anything that isn't safe in a file name collapses to a single '-'
static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_.-]+").expect("Failed to compile UNSAFE_FILENAME_CHARS")
});

/// Metadata written next to every extracted precinct.
#[derive(Debug, Serialize)]
struct PrecinctMetadata<'a> {
    source: &'a str,
    election: usize,
    precinct: usize,
    gp_unit_id: &'a str,
    gp_unit_name: Option<&'a str>,
    collections: BTreeMap<String, CollectionSummary>,
    extraction_timestamp: String,
}

/// Reads an EDF JSON document.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value, StorageError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(StorageError::IoError)?;
    let document =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!("Loaded document from {}", path.display());
    Ok(document)
}

/// File-name-safe form of `text`: runs of unsafe characters become '-'.
pub fn slugify(text: &str) -> String {
    let slug = UNSAFE_FILENAME_CHARS.replace_all(text.trim(), "-");
    slug.trim_matches('-').to_string()
}

pub struct StorageManager {
    base_dir: PathBuf,
    overwrite: bool,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
            overwrite: false,
        })
    }

    /// Allows replacing files left by an earlier run.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Base file name (without extension) for a precinct extracted from the
    /// file whose stem is `source_stem`.
    ///
    /// Like: `results_e0_p3_Precinct-12`
    pub fn precinct_file_stem(&self, precinct: &ExtractedPrecinct, source_stem: &str) -> String {
        let label = precinct
            .gp_unit_name
            .as_deref()
            .map(slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| slugify(&precinct.gp_unit_id));
        let mut stem = format!(
            "{}_e{}_p{}",
            slugify(source_stem),
            precinct.election,
            precinct.precinct
        );
        if !label.is_empty() {
            stem.push('_');
            stem.push_str(&label);
        }
        stem
    }

    /// Saves the pruned precinct document as pretty JSON
    pub fn save_precinct(
        &self,
        precinct: &ExtractedPrecinct,
        source_stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .base_dir
            .join(format!("{}.json", self.precinct_file_stem(precinct, source_stem)));
        self.check_writable(&file_path)?;

        let content = serde_json::to_string_pretty(&precinct.document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, content).map_err(StorageError::IoError)?;

        tracing::info!("Saved precinct to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the precinct in JSON format
    pub fn save_precinct_metadata(
        &self,
        precinct: &ExtractedPrecinct,
        source_stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .base_dir
            .join(format!("{}_meta.json", self.precinct_file_stem(precinct, source_stem)));
        self.check_writable(&file_path)?;

        let metadata = PrecinctMetadata {
            source: source_stem,
            election: precinct.election,
            precinct: precinct.precinct,
            gp_unit_id: &precinct.gp_unit_id,
            gp_unit_name: precinct.gp_unit_name.as_deref(),
            collections: precinct
                .summary
                .iter()
                .map(|(collection, counts)| (collection.to_string(), *counts))
                .collect(),
            extraction_timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    fn check_writable(&self, file_path: &Path) -> Result<(), StorageError> {
        if !self.overwrite && file_path.exists() {
            return Err(StorageError::FileExists(file_path.display().to_string()));
        }
        Ok(())
    }
}
