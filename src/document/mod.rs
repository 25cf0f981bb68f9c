// src/document/mod.rs
pub mod index;
pub mod path;
pub mod schema;
pub mod walker;

// Re-export key document types for convenience
pub use index::{Entry, Index};
pub use path::{NodePath, Segment};
pub use schema::Collection;
pub use walker::{walk, Visit, Walk};
