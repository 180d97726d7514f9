//! # Schema Nodes
//!
//! A schema tree is a recursive sum type: every node carries the fields common
//! to all JSON Schema types plus a [`NodeKind`] holding the constraints of its
//! `type`. Object nodes own their properties in display order; array nodes own
//! at most one item schema.
//!
//! Nodes are plain values. `Clone` produces a fully independent copy, which is
//! what snapshot/rollback relies on.

use crate::error::SchemaError;
use crate::path::{PathSegment, SchemaPath};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// The `type` keyword values the editor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    pub const ALL: [SchemaType; 6] = [
        SchemaType::String,
        SchemaType::Number,
        SchemaType::Integer,
        SchemaType::Boolean,
        SchemaType::Array,
        SchemaType::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnsupportedType {
                path: SchemaPath::root(),
                found: s.to_string(),
            })
    }
}

/// Constraints of a `string` node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringConstraints {
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub pattern: Option<String>,
    pub format: Option<String>,
}

/// Constraints shared by `number` and `integer` nodes
///
/// Bounds keep their JSON number representation so `10` never turns into `10.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberConstraints {
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: Option<Number>,
    pub exclusive_maximum: Option<Number>,
    pub multiple_of: Option<Number>,
}

/// Constraints of an `array` node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayConstraints {
    pub items: Option<Box<SchemaNode>>,
    pub min_items: Option<i64>,
    pub max_items: Option<i64>,
    pub unique_items: Option<bool>,
}

/// Constraints of an `object` node
///
/// Equality includes property order.
#[derive(Debug, Clone, Default)]
pub struct ObjectConstraints {
    /// Child schemas in display order
    pub properties: IndexMap<String, SchemaNode>,
    pub required: Vec<String>,
    pub additional_properties: Option<bool>,
    pub min_properties: Option<i64>,
    pub max_properties: Option<i64>,
}

impl PartialEq for ObjectConstraints {
    fn eq(&self, other: &Self) -> bool {
        self.properties.iter().eq(other.properties.iter())
            && self.required == other.required
            && self.additional_properties == other.additional_properties
            && self.min_properties == other.min_properties
            && self.max_properties == other.max_properties
    }
}

impl ObjectConstraints {
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|r| r == key)
    }

    /// First free key of the form `base`, `base1`, `base2`, ...
    pub fn unique_key(&self, base: &str) -> String {
        if !self.properties.contains_key(base) {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{}{}", base, counter);
            if !self.properties.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// First free key of the form `base`, `base_1`, `base_2`, ...
    pub fn suffixed_key(&self, base: &str) -> String {
        if !self.properties.contains_key(base) {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{}_{}", base, counter);
            if !self.properties.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Type-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    String(StringConstraints),
    Number(NumberConstraints),
    Integer(NumberConstraints),
    Boolean,
    Array(ArrayConstraints),
    Object(ObjectConstraints),
}

impl NodeKind {
    /// Kind with no constraints at all (used when reading text)
    pub fn empty(schema_type: SchemaType) -> Self {
        match schema_type {
            SchemaType::String => NodeKind::String(StringConstraints::default()),
            SchemaType::Number => NodeKind::Number(NumberConstraints::default()),
            SchemaType::Integer => NodeKind::Integer(NumberConstraints::default()),
            SchemaType::Boolean => NodeKind::Boolean,
            SchemaType::Array => NodeKind::Array(ArrayConstraints::default()),
            SchemaType::Object => NodeKind::Object(ObjectConstraints::default()),
        }
    }

    pub fn schema_type(&self) -> SchemaType {
        match self {
            NodeKind::String(_) => SchemaType::String,
            NodeKind::Number(_) => SchemaType::Number,
            NodeKind::Integer(_) => SchemaType::Integer,
            NodeKind::Boolean => SchemaType::Boolean,
            NodeKind::Array(_) => SchemaType::Array,
            NodeKind::Object(_) => SchemaType::Object,
        }
    }
}

/// One typed unit of a JSON Schema tree
///
/// Two nodes are equal only if their properties and `extra` keywords also
/// appear in the same order.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub kind: NodeKind,
    /// Keywords the structured editor does not model, kept for lossless round trips
    pub extra: IndexMap<String, Value>,
}

impl PartialEq for SchemaNode {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.default == other.default
            && self.kind == other.kind
            && self.extra.iter().eq(other.extra.iter())
    }
}

impl SchemaNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            title: None,
            description: None,
            default: None,
            kind,
            extra: IndexMap::new(),
        }
    }

    /// Default shape created when a type is chosen or a property is added
    pub fn default_for(schema_type: SchemaType) -> Self {
        let kind = match schema_type {
            SchemaType::Array => NodeKind::Array(ArrayConstraints {
                items: Some(Box::new(SchemaNode::default_for(SchemaType::String))),
                ..ArrayConstraints::default()
            }),
            other => NodeKind::empty(other),
        };
        Self::new(kind)
    }

    pub fn schema_type(&self) -> SchemaType {
        self.kind.schema_type()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Object node builder helper: append a property
    ///
    /// Has no effect on non-object nodes.
    pub fn with_property(mut self, key: impl Into<String>, node: SchemaNode) -> Self {
        if let NodeKind::Object(object) = &mut self.kind {
            object.properties.insert(key.into(), node);
        }
        self
    }

    /// Object node builder helper: mark a property required
    pub fn with_required(mut self, key: impl Into<String>) -> Self {
        if let NodeKind::Object(object) = &mut self.kind {
            let key = key.into();
            if !object.is_required(&key) {
                object.required.push(key);
            }
        }
        self
    }

    /// Array node builder helper: set the item schema
    pub fn with_items(mut self, items: SchemaNode) -> Self {
        if let NodeKind::Array(array) = &mut self.kind {
            array.items = Some(Box::new(items));
        }
        self
    }

    /// Switch this node to another type
    ///
    /// Type-specific fields and unmodelled keywords are discarded and the
    /// type's default shape is regenerated. `title` and `description` are
    /// kept; `default` is converted best-effort and dropped when it cannot be.
    pub fn with_type(&self, schema_type: SchemaType) -> SchemaNode {
        if self.schema_type() == schema_type {
            return self.clone();
        }

        let mut node = SchemaNode::default_for(schema_type);
        node.title = self.title.clone();
        node.description = self.description.clone();
        node.default = self
            .default
            .as_ref()
            .and_then(|value| coerce_default(value, schema_type));
        node
    }

    pub fn as_object(&self) -> Option<&ObjectConstraints> {
        match &self.kind {
            NodeKind::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectConstraints> {
        match &mut self.kind {
            NodeKind::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayConstraints> {
        match &self.kind {
            NodeKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayConstraints> {
        match &mut self.kind {
            NodeKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object(_))
    }

    fn child(&self, segment: &PathSegment) -> Option<&SchemaNode> {
        match (segment, &self.kind) {
            (PathSegment::Property(key), NodeKind::Object(object)) => object.properties.get(key),
            (PathSegment::Items, NodeKind::Array(array)) => array.items.as_deref(),
            _ => None,
        }
    }

    fn child_mut(&mut self, segment: &PathSegment) -> Option<&mut SchemaNode> {
        match (segment, &mut self.kind) {
            (PathSegment::Property(key), NodeKind::Object(object)) => {
                object.properties.get_mut(key)
            }
            (PathSegment::Items, NodeKind::Array(array)) => array.items.as_deref_mut(),
            _ => None,
        }
    }

    /// Find the node at `path`
    pub fn node_at(&self, path: &SchemaPath) -> Option<&SchemaNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Find the node at `path` mutably
    pub fn node_at_mut(&mut self, path: &SchemaPath) -> Option<&mut SchemaNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child_mut(segment))
    }

    /// Number of levels below this node (0 for a leaf)
    pub fn height(&self) -> usize {
        match &self.kind {
            NodeKind::Object(object) => object
                .properties
                .values()
                .map(|child| child.height() + 1)
                .max()
                .unwrap_or(0),
            NodeKind::Array(array) => array
                .items
                .as_ref()
                .map(|items| items.height() + 1)
                .unwrap_or(0),
            _ => 0,
        }
    }
}

/// Best-effort conversion of a `default` value to another type
///
/// Never fails: anything that cannot be converted yields `None`, except for
/// arrays and objects which fall back to an empty container.
pub fn coerce_default(value: &Value, schema_type: SchemaType) -> Option<Value> {
    match schema_type {
        SchemaType::String => match value {
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        SchemaType::Number => to_number(value).map(Value::Number),
        SchemaType::Integer => to_number(value)
            .and_then(|n| truncate_number(&n))
            .map(Value::Number),
        SchemaType::Boolean => match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
            Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
            _ => None,
        },
        SchemaType::Array => match value {
            Value::Array(_) => Some(value.clone()),
            _ => Some(Value::Array(Vec::new())),
        },
        SchemaType::Object => match value {
            Value::Object(_) => Some(value.clone()),
            _ => Some(Value::Object(serde_json::Map::new())),
        },
    }
}

fn to_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                Some(Number::from(i))
            } else {
                trimmed.parse::<f64>().ok().and_then(Number::from_f64)
            }
        }
        Value::Bool(b) => Some(Number::from(u8::from(*b))),
        _ => None,
    }
}

fn truncate_number(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return Some(n.clone());
    }
    let truncated = n.as_f64()?.trunc();
    if truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
        Some(Number::from(truncated as i64))
    } else {
        None
    }
}
