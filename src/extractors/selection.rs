// src/extractors/selection.rs

// --- Imports ---
use std::collections::HashSet;

use once_cell::unsync::OnceCell;
use serde_json::Value;

use crate::document::schema::{self, Collection};
use crate::utils::error::ExtractError;

// --- Data Structures ---

/// Every element of an EDF that belongs to one precinct.
///
/// The precinct is rooted at a ballot style, picked by position because ballot
/// styles carry no `@id`. Everything else is found by chasing references out
/// of that ballot style:
///
/// ```text
/// BallotStyle ─GpUnitIds──────────────▶ GpUnit
///     └─OrderedContent (nested) ─HeaderId─▶ Header   (direct entries only)
///                               └ContestId▶ Contest ─OfficeIds──▶ Office
///                                              └ContestSelection
///                                                 └CandidateIds─▶ Candidate ─PartyId──▶ Party
///                                                                           └PersonId─▶ Person
/// ```
///
/// Each derived list is computed on first access and cached; results keep
/// document order. Missing optional references contribute nothing.
pub struct PrecinctSelection<'a> {
    document: &'a Value,
    namespace: String,
    precinct: usize,
    election_position: usize,
    election: &'a Value,
    ballot_style: &'a Value,
    gp_units: OnceCell<Vec<&'a Value>>,
    contests: OnceCell<Vec<&'a Value>>,
    headers: OnceCell<Vec<&'a Value>>,
    candidates: OnceCell<Vec<&'a Value>>,
    offices: OnceCell<Vec<&'a Value>>,
    parties: OnceCell<Vec<&'a Value>>,
    persons: OnceCell<Vec<&'a Value>>,
}

impl<'a> PrecinctSelection<'a> {
    /// Selects ballot style `precinct` of election `election`.
    ///
    /// Both positions are checked here; an unknown one is
    /// [`ExtractError::OutOfRange`].
    pub fn new(
        document: &'a Value,
        namespace: &str,
        precinct: usize,
        election: usize,
    ) -> Result<Self, ExtractError> {
        let elections = schema::list(document, schema::ELECTION);
        let election_node = elections.get(election).ok_or(ExtractError::OutOfRange {
            what: "Election",
            position: election,
            available: elections.len(),
        })?;

        let ballot_styles = schema::list(election_node, schema::BALLOT_STYLE);
        let ballot_style = ballot_styles.get(precinct).ok_or(ExtractError::OutOfRange {
            what: "BallotStyle",
            position: precinct,
            available: ballot_styles.len(),
        })?;

        tracing::debug!("Selected ballot style {} of election {}", precinct, election);
        Ok(Self {
            document,
            namespace: namespace.to_string(),
            precinct,
            election_position: election,
            election: election_node,
            ballot_style,
            gp_units: OnceCell::new(),
            contests: OnceCell::new(),
            headers: OnceCell::new(),
            candidates: OnceCell::new(),
            offices: OnceCell::new(),
            parties: OnceCell::new(),
            persons: OnceCell::new(),
        })
    }

    pub fn precinct(&self) -> usize {
        self.precinct
    }

    pub fn election_position(&self) -> usize {
        self.election_position
    }

    pub fn election(&self) -> &'a Value {
        self.election
    }

    /// The root of the selection.
    pub fn ballot_style(&self) -> &'a Value {
        self.ballot_style
    }

    /// The precinct's geo-political unit.
    ///
    /// Exactly one unit has to match the ballot style's `GpUnitIds`; zero or
    /// several is [`ExtractError::AmbiguousUnit`].
    pub fn gp_units(&self) -> Result<&[&'a Value], ExtractError> {
        self.gp_units
            .get_or_try_init(|| {
                let ids: HashSet<&str> = schema::refs(self.ballot_style, schema::GP_UNIT_IDS)
                    .into_iter()
                    .collect();
                let units = select_by_id(schema::list(self.document, schema::GP_UNIT), &ids);
                if units.len() != 1 {
                    tracing::error!(
                        "Precinct {} resolves to {} GpUnits ({:?})",
                        self.precinct,
                        units.len(),
                        ids
                    );
                    return Err(ExtractError::AmbiguousUnit {
                        precinct: self.precinct,
                        found: units.len(),
                    });
                }
                Ok(units)
            })
            .map(Vec::as_slice)
    }

    /// Contests referenced anywhere in the ballot style's content, however
    /// deeply nested in headers.
    pub fn contests(&self) -> &[&'a Value] {
        self.contests.get_or_init(|| {
            let mut ids = HashSet::new();
            let mut pending: Vec<&'a Value> =
                schema::list(self.ballot_style, schema::ORDERED_CONTENT).iter().collect();
            while let Some(entry) = pending.pop() {
                ids.extend(schema::refs(entry, schema::CONTEST_ID));
                pending.extend(schema::list(entry, schema::ORDERED_CONTENT));
            }
            select_by_id(schema::list(self.election, schema::CONTEST), &ids)
        })
    }

    /// Headers listed directly in the ballot style's content.
    ///
    /// Headers nested inside another header's content are not included.
    pub fn headers(&self) -> &[&'a Value] {
        self.headers.get_or_init(|| {
            let ids: HashSet<&str> = schema::list(self.ballot_style, schema::ORDERED_CONTENT)
                .iter()
                .flat_map(|entry| schema::refs(entry, schema::HEADER_ID))
                .collect();
            select_by_id(schema::list(self.document, schema::HEADER), &ids)
        })
    }

    /// Candidates named by the selections of the precinct's candidate
    /// contests. Write-in selections have no `CandidateIds` and add nothing.
    pub fn candidates(&self) -> &[&'a Value] {
        self.candidates.get_or_init(|| {
            let ids: HashSet<&str> = self
                .candidate_contests()
                .flat_map(|contest| schema::list(contest, schema::CONTEST_SELECTION))
                .flat_map(|selection| schema::refs(selection, schema::CANDIDATE_IDS))
                .collect();
            select_by_id(schema::list(self.election, schema::CANDIDATE), &ids)
        })
    }

    /// Offices of the precinct's candidate contests.
    pub fn offices(&self) -> &[&'a Value] {
        self.offices.get_or_init(|| {
            let ids: HashSet<&str> = self
                .candidate_contests()
                .flat_map(|contest| schema::refs(contest, schema::OFFICE_IDS))
                .collect();
            select_by_id(schema::list(self.document, schema::OFFICE), &ids)
        })
    }

    /// Parties of the selected candidates. Candidates without a party add
    /// nothing.
    pub fn parties(&self) -> &[&'a Value] {
        self.parties.get_or_init(|| {
            let ids: HashSet<&str> = self
                .candidates()
                .iter()
                .flat_map(|candidate| schema::refs(candidate, schema::PARTY_ID))
                .collect();
            select_by_id(schema::list(self.document, schema::PARTY), &ids)
        })
    }

    /// Persons of the selected candidates. A dangling `PersonId` is tolerated.
    pub fn persons(&self) -> &[&'a Value] {
        self.persons.get_or_init(|| {
            let ids: HashSet<&str> = self
                .candidates()
                .iter()
                .flat_map(|candidate| schema::refs(candidate, schema::PERSON_ID))
                .collect();
            select_by_id(schema::list(self.document, schema::PERSON), &ids)
        })
    }

    /// Selected elements of `collection`.
    pub fn elements(&self, collection: Collection) -> Result<&[&'a Value], ExtractError> {
        Ok(match collection {
            Collection::Contest => self.contests(),
            Collection::Candidate => self.candidates(),
            Collection::GpUnit => self.gp_units()?,
            Collection::Header => self.headers(),
            Collection::Office => self.offices(),
            Collection::Party => self.parties(),
            Collection::Person => self.persons(),
        })
    }

    /// Identifiers of the selected elements of `collection`.
    pub fn reachable_ids(&self, collection: Collection) -> Result<HashSet<&'a str>, ExtractError> {
        Ok(self
            .elements(collection)?
            .iter()
            .copied()
            .filter_map(schema::id_of)
            .collect())
    }

    fn candidate_contests(&self) -> impl Iterator<Item = &'a Value> + '_ {
        let tag = schema::qualify(&self.namespace, schema::CANDIDATE_CONTEST);
        self.contests()
            .iter()
            .copied()
            .filter(move |contest| schema::type_of(contest) == Some(tag.as_str()))
    }
}

/// Items whose `@id` is in `ids`, in list order.
fn select_by_id<'a>(items: &'a [Value], ids: &HashSet<&str>) -> Vec<&'a Value> {
    items
        .iter()
        .filter(|item| schema::id_of(item).map_or(false, |id| ids.contains(id)))
        .collect()
}
