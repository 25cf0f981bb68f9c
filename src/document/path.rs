// src/document/path.rs
use std::fmt;

use serde_json::Value;

/// One step from a container to a child: a field name or an array position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // JSON pointer escaping (RFC 6901)
            Self::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1")),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Position of a node, as the chain of segments from the document root.
///
/// The last segment is the key used to reach the node from its containing
/// node; everything before it addresses the containing node. Paths are owned,
/// so they survive the end of the borrow they were recorded under and can be
/// replayed against a mutable document.
///
/// Ordering is lexicographic by segment. Removing paths in descending order
/// never invalidates a path that is still pending: later siblings go before
/// earlier ones and descendants go before their ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<Segment>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The key used to reach this node from its parent. `None` for the root.
    pub fn key(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Path of the containing node. `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        match self.0.split_last() {
            Some((_, rest)) => Some(Self(rest.to_vec())),
            None => None,
        }
    }

    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(document, |node, segment| match (node, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Array(items), Segment::Index(index)) => items.get(*index),
            _ => None,
        })
    }

    pub fn resolve_mut<'a>(&self, document: &'a mut Value) -> Option<&'a mut Value> {
        self.0.iter().try_fold(document, |node, segment| match (node, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get_mut(key),
            (Value::Array(items), Segment::Index(index)) => items.get_mut(*index),
            _ => None,
        })
    }

    /// Deletes the node at this path from `document` and returns it.
    ///
    /// Object fields are removed without disturbing the order of the remaining
    /// fields. Array items are removed positionally, which shifts every later
    /// sibling down by one. Returns `None` when the path no longer resolves
    /// (or is the root, which cannot be removed from itself).
    pub fn remove_from(&self, document: &mut Value) -> Option<Value> {
        let (key, parent_segments) = self.0.split_last()?;
        let parent = Self(parent_segments.to_vec()).resolve_mut(document)?;
        match (parent, key) {
            (Value::Object(map), Segment::Key(key)) => map.shift_remove(key),
            (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
                Some(items.remove(*index))
            }
            _ => None,
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for NodePath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}
