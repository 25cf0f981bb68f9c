// src/document/walker.rs
use std::iter::Enumerate;
use std::slice;

use serde_json::{map, Value};

use super::path::{NodePath, Segment};

/// One node reached by [`walk`].
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    /// Containing node. `None` for the node the walk started from.
    pub parent: Option<&'a Value>,
    /// Position of `node` relative to the walk's starting node.
    pub path: NodePath,
    pub node: &'a Value,
}

impl<'a> Visit<'a> {
    /// Field name or array position used to reach `node` from `parent`.
    pub fn key(&self) -> Option<&Segment> {
        self.path.key()
    }
}

enum Children<'a> {
    Object(map::Iter<'a>),
    Array(Enumerate<slice::Iter<'a, Value>>),
}

impl<'a> Children<'a> {
    fn of(node: &'a Value) -> Option<Self> {
        match node {
            Value::Object(fields) => Some(Self::Object(fields.iter())),
            Value::Array(items) => Some(Self::Array(items.iter().enumerate())),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<(Segment, &'a Value)> {
        match self {
            Self::Object(fields) => fields
                .next()
                .map(|(name, value)| (Segment::Key(name.clone()), value)),
            Self::Array(items) => items
                .next()
                .map(|(index, value)| (Segment::Index(index), value)),
        }
    }
}

struct Frame<'a> {
    container: &'a Value,
    path: NodePath,
    children: Children<'a>,
}

/// Depth-first, document-order iterator over every node of a JSON tree.
///
/// Created by [`walk`]. Uses an explicit stack, so nesting depth is bounded by
/// memory only.
pub struct Walk<'a> {
    start: Option<&'a Value>,
    stack: Vec<Frame<'a>>,
}

/// Walks `root` and everything below it.
///
/// The root is yielded first with no parent and an empty path. Each other node
/// is yielded exactly once, immediately before its own descendants, with its
/// containing object or array as `parent`. Object fields come in field order,
/// array items by position. Scalars have no children; a scalar root is
/// yielded as itself and the walk ends.
pub fn walk(root: &Value) -> Walk<'_> {
    Walk {
        start: Some(root),
        stack: Vec::new(),
    }
}

impl<'a> Walk<'a> {
    fn descend(&mut self, node: &'a Value, path: &NodePath) {
        if let Some(children) = Children::of(node) {
            self.stack.push(Frame {
                container: node,
                path: path.clone(),
                children,
            });
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.start.take() {
            let path = NodePath::root();
            self.descend(root, &path);
            return Some(Visit {
                parent: None,
                path,
                node: root,
            });
        }

        loop {
            let frame = self.stack.last_mut()?;
            match frame.children.next() {
                Some((segment, node)) => {
                    let parent = frame.container;
                    let path = frame.path.child(segment);
                    self.descend(node, &path);
                    return Some(Visit {
                        parent: Some(parent),
                        path,
                        node,
                    });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
