//! # SchemaForm Schema
//!
//! Typed model of the JSON Schema subset the editor works on.
//!
//! ```text
//! JSON text ──parse──▶ serde_json::Value ──try_from──▶ SchemaNode
//!     ▲                                                    │
//!     └──────────────────── Serializer ◀───────────────────┘
//! ```
//!
//! - [`SchemaNode`] is a recursive sum type keyed by [`SchemaType`]
//! - [`SchemaPath`] addresses nodes with explicit segments
//! - [`generate_sample`] builds example instances

pub mod error;
pub mod node;
pub mod parser;
pub mod path;
pub mod sample;
pub mod serializer;
pub mod visitor;

pub use error::{ParseError, ParseResult, SchemaError};
#[cfg(feature = "pretty-errors")]
pub use error::format_parse_error;
pub use node::{
    coerce_default, ArrayConstraints, NodeKind, NumberConstraints, ObjectConstraints, SchemaNode,
    SchemaType, StringConstraints,
};
pub use parser::{parse, parse_schema};
pub use path::{PathParseError, PathSegment, SchemaPath};
pub use sample::generate_sample;
pub use serializer::{serialize, Serializer};
pub use visitor::{walk_node, walk_tree, ObjectPathCollector, Visitor};

/// Deepest nesting the editor lets a tree reach through structural moves
pub const MAX_DEPTH: usize = 10;
