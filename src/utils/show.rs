// src/utils/show.rs
use std::io::Write;

use clap::ValueEnum;
use serde_json::Value;

use crate::document::schema::{self, Collection};
use crate::extractors::PrecinctSelection;
use crate::utils::error::AppError;

/// Contexts to show debugging output in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowContext {
    /// The input document as loaded
    Document,
    /// The elements selected for each precinct
    Selection,
}

/// Pretty-prints a JSON document.
pub fn show_document<W: Write>(document: &Value, out: &mut W) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, document)
        .map_err(|e| AppError::Processing(format!("Failed to render document: {}", e)))?;
    writeln!(out)?;
    Ok(())
}

/// Lists the selected '@id's of every collection, one collection per line.
pub fn show_selection<W: Write>(
    selection: &PrecinctSelection<'_>,
    out: &mut W,
) -> Result<(), AppError> {
    writeln!(
        out,
        "Precinct {} of election {}",
        selection.precinct(),
        selection.election_position()
    )?;
    for collection in Collection::ALL {
        let ids: Vec<&str> = selection
            .elements(collection)?
            .iter()
            .copied()
            .filter_map(schema::id_of)
            .collect();
        writeln!(out, "  {:<10} {}", collection.name(), ids.join(", "))?;
    }
    Ok(())
}
