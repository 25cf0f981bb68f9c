// src/extractors/precinct.rs

// --- Imports ---
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::document::schema::{self, Collection};
use crate::document::{Index, NodePath};
use crate::extractors::selection::PrecinctSelection;
use crate::utils::error::ExtractError;

// --- Data Structures ---
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub kept: usize,
    pub removed: usize,
}

#[derive(Debug, Clone)]
pub struct ExtractedPrecinct {
    pub precinct: usize, // Position of the ballot style in the source election
    pub election: usize, // Position of the election in the source document
    pub gp_unit_id: String, // The precinct's GpUnit
    pub gp_unit_name: Option<String>,
    pub summary: BTreeMap<Collection, CollectionSummary>,
    pub document: Value, // The pruned single-precinct document
}

impl ExtractedPrecinct {
    pub fn into_document(self) -> Value {
        self.document
    }
}

/// What to delete from the working copy, worked out while it is borrowed.
struct PrunePlan {
    doomed: Vec<NodePath>,
    gp_unit_id: String,
    gp_unit_name: Option<String>,
    summary: BTreeMap<Collection, CollectionSummary>,
}

// --- Main Extractor Structure ---
#[derive(Debug, Clone)]
pub struct PrecinctExtractor {
    namespace: String,
}

impl Default for PrecinctExtractor {
    fn default() -> Self {
        Self::new(schema::DEFAULT_NAMESPACE)
    }
}

impl PrecinctExtractor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of precincts (ballot styles) in election `election`.
    pub fn precinct_count(&self, document: &Value, election: usize) -> Result<usize, ExtractError> {
        let elections = schema::list(document, schema::ELECTION);
        let election_node = elections.get(election).ok_or(ExtractError::OutOfRange {
            what: "Election",
            position: election,
            available: elections.len(),
        })?;
        Ok(schema::list(election_node, schema::BALLOT_STYLE).len())
    }

    /// Extracts a single precinct EDF from a combined EDF.
    ///
    /// `document` is left untouched; all pruning happens on a deep copy. The
    /// copy keeps only election `election`, only its ballot style `precinct`,
    /// and, of every pruned collection, only the elements reachable from that
    /// ballot style. Anything else in the document is carried over as is.
    pub fn extract_precinct(
        &self,
        document: &Value,
        precinct: usize,
        election: usize,
    ) -> Result<ExtractedPrecinct, ExtractError> {
        tracing::info!("Extracting precinct {} of election {}", precinct, election);

        // 1. Work on a copy so the original document isn't clobbered
        let mut copy = document.clone();

        // 2. Decide what goes while the copy is borrowed by the index
        let plan = self.plan(&copy, precinct, election)?;

        // 3. Delete unreached elements, last position first
        let mut doomed = plan.doomed;
        doomed.sort();
        doomed.dedup();
        for path in doomed.iter().rev() {
            if path.remove_from(&mut copy).is_none() {
                tracing::warn!("Element at {} vanished before it could be removed", path);
            }
        }

        // 4. Ballot styles and elections have no usable '@id'; keep the selected ones by position
        let election_node = schema_list_mut(&mut copy, schema::ELECTION)
            .and_then(|elections| elections.get_mut(election))
            .ok_or(ExtractError::OutOfRange {
                what: "Election",
                position: election,
                available: 0,
            })?;
        keep_only(election_node, schema::BALLOT_STYLE, precinct)?;
        keep_only(&mut copy, schema::ELECTION, election)?;

        tracing::info!(
            "Extracted precinct {} ({}) of election {}",
            precinct,
            plan.gp_unit_id,
            election
        );
        Ok(ExtractedPrecinct {
            precinct,
            election,
            gp_unit_id: plan.gp_unit_id,
            gp_unit_name: plan.gp_unit_name,
            summary: plan.summary,
            document: copy,
        })
    }

    /// Extracts every precinct of election `election`, in ballot style order.
    /// Stops at the first precinct that fails.
    pub fn extract_all(
        &self,
        document: &Value,
        election: usize,
    ) -> Result<Vec<ExtractedPrecinct>, ExtractError> {
        let count = self.precinct_count(document, election)?;
        tracing::info!("Extracting {} precincts of election {}", count, election);
        (0..count)
            .map(|precinct| self.extract_precinct(document, precinct, election))
            .collect()
    }

    fn plan(
        &self,
        document: &Value,
        precinct: usize,
        election: usize,
    ) -> Result<PrunePlan, ExtractError> {
        let index = Index::build(document, self.namespace.as_str())?;
        tracing::debug!("Pruning under namespace '{}'", index.namespace());
        let selection = PrecinctSelection::new(document, &self.namespace, precinct, election)?;

        let gp_unit = selection
            .gp_units()?
            .first()
            .copied()
            .ok_or(ExtractError::AmbiguousUnit { precinct, found: 0 })?;
        let gp_unit_id = schema::id_of(gp_unit).unwrap_or_default().to_string();
        let gp_unit_name = gp_unit
            .get(schema::NAME)
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut doomed = Vec::new();
        let mut summary = BTreeMap::new();
        for collection in Collection::ALL {
            let reachable = selection.reachable_ids(collection)?;
            let mut counts = CollectionSummary::default();
            for type_name in collection.type_names() {
                for entry in index.by_type(type_name) {
                    if entry.id().map_or(false, |id| reachable.contains(id)) {
                        counts.kept += 1;
                    } else {
                        tracing::trace!("Removing unreached {} at {}", type_name, entry.path);
                        doomed.push(entry.path.clone());
                        counts.removed += 1;
                    }
                }
            }
            tracing::debug!(
                "{}: keeping {}, removing {}",
                collection,
                counts.kept,
                counts.removed
            );
            summary.insert(collection, counts);
        }

        Ok(PrunePlan {
            doomed,
            gp_unit_id,
            gp_unit_name,
            summary,
        })
    }
}

fn schema_list_mut<'a>(node: &'a mut Value, field: &str) -> Option<&'a mut Vec<Value>> {
    node.get_mut(field).and_then(Value::as_array_mut)
}

/// Replaces the list under `field` with a one-item list holding its item at
/// `position`.
fn keep_only(node: &mut Value, field: &'static str, position: usize) -> Result<(), ExtractError> {
    let items = schema_list_mut(node, field).ok_or(ExtractError::OutOfRange {
        what: field,
        position,
        available: 0,
    })?;
    if position >= items.len() {
        return Err(ExtractError::OutOfRange {
            what: field,
            position,
            available: items.len(),
        });
    }
    let kept = items.swap_remove(position);
    *items = vec![kept];
    Ok(())
}
