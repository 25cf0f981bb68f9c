// src/extractors/fixtures.rs
// Shared EDF documents for the extractor tests.
use serde_json::{json, Value};

pub fn ordered_contest(contest_id: &str) -> Value {
    json!({"@type": "ElectionResults.OrderedContest", "ContestId": contest_id})
}

pub fn ordered_header(header_id: &str, content: Vec<Value>) -> Value {
    json!({
        "@type": "ElectionResults.OrderedHeader",
        "HeaderId": header_id,
        "OrderedContent": content,
    })
}

fn reporting_unit(id: &str, name: &str) -> Value {
    json!({"@id": id, "@type": "ElectionResults.ReportingUnit", "Name": name, "Type": "precinct"})
}

fn header(id: &str) -> Value {
    json!({"@id": id, "@type": "ElectionResults.Header", "Name": format!("Header {}", id)})
}

fn candidate_contest(id: &str, office_ids: &[&str], selections: Vec<Value>) -> Value {
    json!({
        "@id": id,
        "@type": "ElectionResults.CandidateContest",
        "Name": format!("Contest {}", id),
        "OfficeIds": office_ids,
        "ContestSelection": selections,
    })
}

fn candidate_selection(id: &str, candidate_ids: &[&str]) -> Value {
    json!({"@id": id, "@type": "ElectionResults.CandidateSelection", "CandidateIds": candidate_ids})
}

fn write_in(id: &str) -> Value {
    json!({"@id": id, "@type": "ElectionResults.CandidateSelection", "IsWriteIn": true})
}

fn measure_selection(id: &str, selection: &str) -> Value {
    json!({"@id": id, "@type": "ElectionResults.BallotMeasureSelection", "Selection": selection})
}

fn candidate(id: &str, party_id: Option<&str>, person_id: &str) -> Value {
    let mut candidate = json!({
        "@id": id,
        "@type": "ElectionResults.Candidate",
        "BallotName": {"@type": "ElectionResults.InternationalizedText", "Text": [{"Content": id}]},
        "PersonId": person_id,
    });
    if let Some(party_id) = party_id {
        candidate["PartyId"] = json!(party_id);
    }
    candidate
}

fn simple(type_name: &str, id: &str) -> Value {
    json!({"@id": id, "@type": format!("ElectionResults.{}", type_name), "Name": id})
}

pub fn ballot_style(gp_unit_ids: &[&str], content: Vec<Value>) -> Value {
    json!({
        "@type": "ElectionResults.BallotStyle",
        "GpUnitIds": gp_unit_ids,
        "OrderedContent": content,
    })
}

/// Two elections with two precincts each. Every precinct references its own
/// disjoint set of elements.
///
/// Election 0, precinct 0: `ru-a`, `h-a` -> `c-a` (candidate `cand-a` plus a
/// write-in), office `o-a`, party `par-a`, person `per-a`.
///
/// Election 0, precinct 1: `ru-b`, `h-b` -> `c-b`, plus the direct ballot
/// measure `c-b2`; candidates `cand-b1` (party `par-b`) and `cand-b2` (no
/// party); office `o-b`; persons `per-b1`, `per-b2`.
///
/// Election 1 mirrors this with the `c`/`d` suffixes.
pub fn two_elections() -> Value {
    json!({
        "@type": "ElectionResults.ElectionReport",
        "Format": "precinct-level",
        "GeneratedDate": "2024-11-05T20:00:00Z",
        "Election": [
            {
                "@id": "e-0",
                "@type": "ElectionResults.Election",
                "Name": "General",
                "BallotStyle": [
                    ballot_style(&["ru-a"], vec![
                        ordered_header("h-a", vec![ordered_contest("c-a")]),
                    ]),
                    ballot_style(&["ru-b"], vec![
                        ordered_header("h-b", vec![ordered_contest("c-b")]),
                        ordered_contest("c-b2"),
                    ]),
                ],
                "Candidate": [
                    candidate("cand-a", Some("par-a"), "per-a"),
                    candidate("cand-b1", Some("par-b"), "per-b1"),
                    candidate("cand-b2", None, "per-b2"),
                ],
                "Contest": [
                    candidate_contest("c-a", &["o-a"], vec![
                        candidate_selection("cs-a", &["cand-a"]),
                        write_in("cs-a-wi"),
                    ]),
                    candidate_contest("c-b", &["o-b"], vec![
                        candidate_selection("cs-b1", &["cand-b1"]),
                        candidate_selection("cs-b2", &["cand-b2"]),
                    ]),
                    {
                        "@id": "c-b2",
                        "@type": "ElectionResults.BallotMeasureContest",
                        "Name": "Measure B",
                        "ContestSelection": [
                            measure_selection("bms-yes", "Yes"),
                            measure_selection("bms-no", "No"),
                        ],
                    },
                ],
            },
            {
                "@id": "e-1",
                "@type": "ElectionResults.Election",
                "Name": "Special",
                "BallotStyle": [
                    ballot_style(&["ru-c"], vec![
                        ordered_header("h-c", vec![ordered_contest("c-c")]),
                    ]),
                    ballot_style(&["ru-d"], vec![
                        ordered_header("h-d", vec![ordered_contest("c-d")]),
                    ]),
                ],
                "Candidate": [
                    candidate("cand-c", Some("par-c"), "per-c"),
                    candidate("cand-d", Some("par-d"), "per-d"),
                ],
                "Contest": [
                    candidate_contest("c-c", &["o-c"], vec![
                        candidate_selection("cs-c", &["cand-c"]),
                    ]),
                    candidate_contest("c-d", &["o-d"], vec![
                        candidate_selection("cs-d", &["cand-d"]),
                    ]),
                ],
            },
        ],
        "GpUnit": [
            reporting_unit("ru-a", "Precinct A"),
            reporting_unit("ru-b", "Precinct B"),
            reporting_unit("ru-c", "Precinct C"),
            reporting_unit("ru-d", "Precinct D"),
        ],
        "Header": [header("h-a"), header("h-b"), header("h-c"), header("h-d")],
        "Office": [
            simple("Office", "o-a"),
            simple("Office", "o-b"),
            simple("Office", "o-c"),
            simple("Office", "o-d"),
        ],
        "Party": [
            simple("Party", "par-a"),
            simple("Party", "par-b"),
            simple("Party", "par-c"),
            simple("Party", "par-d"),
        ],
        "Person": [
            simple("Person", "per-a"),
            simple("Person", "per-b1"),
            simple("Person", "per-b2"),
            simple("Person", "per-c"),
            simple("Person", "per-d"),
        ],
    })
}

/// One precinct whose ballot style reaches `c-deep` through two levels of
/// headers (`h-outer` -> `h-inner` -> `c-deep`). `c-other` is unreachable.
pub fn nested_headers() -> Value {
    json!({
        "@type": "ElectionResults.ElectionReport",
        "Election": [{
            "@id": "e-0",
            "@type": "ElectionResults.Election",
            "BallotStyle": [
                ballot_style(&["ru-1"], vec![
                    ordered_header("h-outer", vec![
                        ordered_header("h-inner", vec![ordered_contest("c-deep")]),
                    ]),
                ]),
            ],
            "Candidate": [candidate("cand-1", Some("par-1"), "per-1")],
            "Contest": [
                candidate_contest("c-other", &["o-2"], vec![]),
                candidate_contest("c-deep", &["o-1"], vec![
                    candidate_selection("cs-1", &["cand-1"]),
                ]),
            ],
        }],
        "GpUnit": [reporting_unit("ru-1", "Precinct 1")],
        "Header": [header("h-outer"), header("h-inner")],
        "Office": [simple("Office", "o-1"), simple("Office", "o-2")],
        "Party": [simple("Party", "par-1")],
        "Person": [simple("Person", "per-1")],
    })
}

/// One precinct whose only candidate points at a person and a party that do
/// not exist. The document's `Person` and `Party` lists hold other elements.
pub fn dangling_candidate_refs() -> Value {
    json!({
        "Election": [{
            "BallotStyle": [ballot_style(&["ru-1"], vec![ordered_contest("c-1")])],
            "Candidate": [candidate("cand-1", Some("nope"), "ghost")],
            "Contest": [
                candidate_contest("c-1", &["o-1"], vec![candidate_selection("cs-1", &["cand-1"])]),
            ],
        }],
        "GpUnit": [reporting_unit("ru-1", "Precinct 1")],
        "Office": [simple("Office", "o-1")],
        "Party": [simple("Party", "par-other")],
        "Person": [simple("Person", "per-other")],
    })
}

/// A single candidate contest whose only selections are write-ins.
pub fn write_ins_only() -> Value {
    json!({
        "Election": [{
            "BallotStyle": [ballot_style(&["ru-1"], vec![ordered_contest("c-1")])],
            "Candidate": [candidate("cand-1", None, "per-1")],
            "Contest": [
                candidate_contest("c-1", &["o-1"], vec![write_in("wi-1"), write_in("wi-2")]),
            ],
        }],
        "GpUnit": [reporting_unit("ru-1", "Precinct 1")],
        "Office": [simple("Office", "o-1")],
        "Person": [simple("Person", "per-1")],
    })
}
