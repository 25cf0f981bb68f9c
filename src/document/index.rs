// src/document/index.rs
use std::collections::HashMap;

use serde_json::Value;

use super::path::NodePath;
use super::schema;
use super::walker::walk;
use crate::utils::error::ExtractError;

/// A catalogued element together with where it lives.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    /// Containing object or array. `None` only for an element at the root.
    pub parent: Option<&'a Value>,
    pub path: NodePath,
    pub node: &'a Value,
}

impl<'a> Entry<'a> {
    pub fn id(&self) -> Option<&'a str> {
        schema::id_of(self.node)
    }
}

/// Catalog of every element in a document by `@id` and by `@type`.
///
/// Built once per document; borrows it immutably. Each entry keeps its
/// [`NodePath`] so the element can be deleted later from a mutable document
/// once this index is dropped.
#[derive(Debug)]
pub struct Index<'a> {
    namespace: String,
    by_id: HashMap<&'a str, Entry<'a>>,
    by_type: HashMap<&'a str, Vec<Entry<'a>>>,
}

impl<'a> Index<'a> {
    /// Walks `document` once and catalogs every object carrying a string
    /// `@id` and/or `@type`.
    ///
    /// Identifiers must be unique across the document: a repeated `@id` is
    /// rejected with [`ExtractError::DuplicateIdentifier`].
    pub fn build(document: &'a Value, namespace: impl Into<String>) -> Result<Self, ExtractError> {
        let namespace = namespace.into();
        let mut by_id: HashMap<&'a str, Entry<'a>> = HashMap::new();
        let mut by_type: HashMap<&'a str, Vec<Entry<'a>>> = HashMap::new();

        for visit in walk(document) {
            if !visit.node.is_object() {
                continue;
            }
            let id = schema::id_of(visit.node);
            let type_name = schema::type_of(visit.node);
            if id.is_none() && type_name.is_none() {
                continue;
            }

            let entry = Entry {
                parent: visit.parent,
                path: visit.path,
                node: visit.node,
            };

            if let Some(id) = id {
                if let Some(first) = by_id.get(id) {
                    return Err(ExtractError::DuplicateIdentifier {
                        id: id.to_string(),
                        first: first.path.clone(),
                        second: entry.path,
                    });
                }
                by_id.insert(id, entry.clone());
            }
            if let Some(type_name) = type_name {
                by_type.entry(type_name).or_default().push(entry);
            }
        }

        tracing::debug!(
            "Indexed {} elements by '@id' across {} '@type's",
            by_id.len(),
            by_type.len()
        );
        Ok(Self {
            namespace,
            by_id,
            by_type,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fully qualified form of `type_name` under this index's namespace.
    pub fn qualify(&self, type_name: &str) -> String {
        schema::qualify(&self.namespace, type_name)
    }

    pub fn by_id(&self, id: &str) -> Option<&Entry<'a>> {
        self.by_id.get(id)
    }

    /// Like [`Index::by_id`], but a missing element is an error.
    pub fn require_id(&self, id: &str) -> Result<&Entry<'a>, ExtractError> {
        self.by_id(id)
            .ok_or_else(|| ExtractError::IdNotFound(id.to_string()))
    }

    /// Elements whose `@type` is `type_name`, in document order.
    ///
    /// A bare name (no `.`) is qualified with the namespace first.
    pub fn by_type(&self, type_name: &str) -> &[Entry<'a>] {
        self.by_type_exact(&self.qualify(type_name))
    }

    /// Elements whose `@type` is exactly `type_tag`, in document order.
    pub fn by_type_exact(&self, type_tag: &str) -> &[Entry<'a>] {
        self.by_type
            .get(type_tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Like [`Index::by_type`], but an empty result is an error.
    pub fn require_type(&self, type_name: &str) -> Result<&[Entry<'a>], ExtractError> {
        let qualified = self.qualify(type_name);
        let entries = self.by_type_exact(&qualified);
        if entries.is_empty() {
            return Err(ExtractError::TypeNotFound(qualified));
        }
        Ok(entries)
    }

    /// Number of elements catalogued by `@id`.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::path::Segment;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "@type": "ElectionResults.ElectionReport",
            "Party": [
                {"@id": "p2", "@type": "ElectionResults.Party", "Name": "Second"},
                {"@id": "p1", "@type": "ElectionResults.Party", "Name": "First"},
            ],
            "Person": [
                {"@id": "per1", "@type": "ElectionResults.Person"},
            ],
            "Note": {"@id": "n1"},
            "Untyped": [{"Name": "no id, no type"}],
        })
    }

    #[test]
    fn test_by_id_records_position() {
        let doc = sample();
        let index = Index::build(&doc, "ElectionResults").unwrap();
        assert_eq!(index.namespace(), "ElectionResults");
        let entry = index.by_id("p1").expect("p1 should be indexed");
        assert_eq!(entry.path.to_string(), "/Party/1");
        assert_eq!(entry.path.key(), Some(&Segment::Index(1)));
        assert_eq!(entry.parent, doc.get("Party"));
        assert_eq!(entry.node["Name"], "First");
        assert_eq!(entry.id(), Some("p1"));
    }

    #[test]
    fn test_by_id_missing() {
        let doc = sample();
        let index = Index::build(&doc, "ElectionResults").unwrap();
        assert!(index.by_id("nope").is_none());
        let err = index.require_id("nope").unwrap_err();
        assert!(matches!(err, ExtractError::IdNotFound(ref id) if id == "nope"));
    }

    #[test]
    fn test_by_type_qualifies_and_keeps_document_order() {
        let doc = sample();
        let index = Index::build(&doc, "ElectionResults").unwrap();
        let ids: Vec<&str> = index.by_type("Party").iter().filter_map(Entry::id).collect();
        assert_eq!(ids, ["p2", "p1"], "Document order, not id order");
        assert_eq!(index.by_type("ElectionResults.Party").len(), 2);
        assert_eq!(index.by_type_exact("Party").len(), 0, "Exact lookup skips the namespace");
    }

    #[test]
    fn test_require_type_on_empty() {
        let doc = sample();
        let index = Index::build(&doc, "ElectionResults").unwrap();
        assert!(index.require_type("Person").is_ok());
        let err = index.require_type("Office").unwrap_err();
        assert!(matches!(err, ExtractError::TypeNotFound(ref t) if t == "ElectionResults.Office"));
    }

    #[test]
    fn test_root_and_untyped_elements() {
        let doc = sample();
        let index = Index::build(&doc, "ElectionResults").unwrap();
        let reports = index.by_type("ElectionReport");
        assert_eq!(reports.len(), 1);
        assert!(reports[0].parent.is_none(), "Root element has no parent");
        assert!(index.by_id("n1").is_some(), "Id without type is still indexed by id");
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_duplicate_identifier_is_rejected() {
        let doc = json!({
            "Party": [{"@id": "dup"}],
            "Person": [{"@id": "dup"}],
        });
        let err = Index::build(&doc, "ElectionResults").unwrap_err();
        match err {
            ExtractError::DuplicateIdentifier { id, first, second } => {
                assert_eq!(id, "dup");
                assert_eq!(first.to_string(), "/Party/0");
                assert_eq!(second.to_string(), "/Person/0");
            }
            other => panic!("Expected DuplicateIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_id_is_not_catalogued() {
        let doc = json!({"Party": [{"@id": 5, "@type": "ElectionResults.Party"}]});
        let index = Index::build(&doc, "ElectionResults").unwrap();
        assert!(index.is_empty());
        assert_eq!(index.by_type("Party").len(), 1);
    }
}
