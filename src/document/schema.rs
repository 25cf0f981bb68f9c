// src/document/schema.rs
//! Field names and type tags of the election results format.
//!
//! Everything that depends on the shape of an EDF document is named here, so
//! the walker and index stay schema-agnostic.

use std::fmt;

use serde_json::Value;

// --- Element markers ---
pub const ID: &str = "@id";
pub const TYPE: &str = "@type";
pub const DEFAULT_NAMESPACE: &str = "ElectionResults";

// --- Top-level lists ---
pub const ELECTION: &str = "Election";
pub const GP_UNIT: &str = "GpUnit";
pub const HEADER: &str = "Header";
pub const OFFICE: &str = "Office";
pub const PARTY: &str = "Party";
pub const PERSON: &str = "Person";

// --- Election lists ---
pub const BALLOT_STYLE: &str = "BallotStyle";
pub const CONTEST: &str = "Contest";
pub const CANDIDATE: &str = "Candidate";

// --- Reference fields ---
pub const GP_UNIT_IDS: &str = "GpUnitIds";
pub const ORDERED_CONTENT: &str = "OrderedContent";
pub const HEADER_ID: &str = "HeaderId";
pub const CONTEST_ID: &str = "ContestId";
pub const CONTEST_SELECTION: &str = "ContestSelection";
pub const CANDIDATE_IDS: &str = "CandidateIds";
pub const OFFICE_IDS: &str = "OfficeIds";
pub const PARTY_ID: &str = "PartyId";
pub const PERSON_ID: &str = "PersonId";

pub const NAME: &str = "Name";

/// Local type tag of contests that reference candidates and offices.
pub const CANDIDATE_CONTEST: &str = "CandidateContest";

/// Element collections pruned down to a single precinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Contest,
    Candidate,
    GpUnit,
    Header,
    Office,
    Party,
    Person,
}

impl Collection {
    /// Extraction order. Each collection's reachable set only depends on the
    /// ones before it.
    pub const ALL: [Collection; 7] = [
        Self::Contest,
        Self::Candidate,
        Self::GpUnit,
        Self::Header,
        Self::Office,
        Self::Party,
        Self::Person,
    ];

    /// Local type tags catalogued for this collection.
    ///
    /// Lists hold concrete subtypes (a `GpUnit` entry is tagged
    /// `ReportingUnit`, a `Contest` entry `CandidateContest`, ...).
    pub fn type_names(self) -> &'static [&'static str] {
        match self {
            Self::Contest => &[
                "Contest",
                "BallotMeasureContest",
                "CandidateContest",
                "PartyContest",
                "RetentionContest",
            ],
            Self::Candidate => &["Candidate"],
            Self::GpUnit => &["ReportingUnit"],
            Self::Header => &["Header"],
            Self::Office => &["Office"],
            Self::Party => &["Party", "Coalition"],
            Self::Person => &["Person"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Contest => CONTEST,
            Self::Candidate => CANDIDATE,
            Self::GpUnit => GP_UNIT,
            Self::Header => HEADER,
            Self::Office => OFFICE,
            Self::Party => PARTY,
            Self::Person => PERSON,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Accessors ---

pub fn id_of(element: &Value) -> Option<&str> {
    element.get(ID).and_then(Value::as_str)
}

pub fn type_of(element: &Value) -> Option<&str> {
    element.get(TYPE).and_then(Value::as_str)
}

/// Items of the array stored under `field`. Absent or non-array fields yield
/// nothing.
pub fn list<'a>(node: &'a Value, field: &str) -> &'a [Value] {
    node.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// String references stored under `field`, either a list of ids or a single
/// id. Non-string entries are skipped.
pub fn refs<'a>(node: &'a Value, field: &str) -> Vec<&'a str> {
    match node.get(field) {
        Some(Value::String(id)) => vec![id.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// Prefixes `type_name` with `namespace` unless it is already qualified.
pub fn qualify(namespace: &str, type_name: &str) -> String {
    if type_name.contains('.') {
        type_name.to_string()
    } else {
        format!("{}.{}", namespace, type_name)
    }
}
