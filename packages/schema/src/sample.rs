//! Example-data generation: one JSON value per schema node

use crate::node::{NodeKind, SchemaNode};
use serde_json::{Map, Value};

pub const SAMPLE_STRING: &str = "example string";
pub const SAMPLE_NUMBER: i64 = 42;

/// Produce an example instance of `node`
///
/// Explicit `default` values win, then the first `examples` entry (or a
/// legacy `example`), then a literal per type. Arrays get a single item
/// generated from their item schema; objects map every property.
pub fn generate_sample(node: &SchemaNode) -> Value {
    match &node.kind {
        NodeKind::String(_) => declared_example(node).unwrap_or_else(|| Value::from(SAMPLE_STRING)),
        NodeKind::Number(_) | NodeKind::Integer(_) => {
            declared_example(node).unwrap_or_else(|| Value::from(SAMPLE_NUMBER))
        }
        NodeKind::Boolean => node.default.clone().unwrap_or(Value::Bool(true)),
        NodeKind::Array(array) => match &array.items {
            Some(items) => Value::Array(vec![generate_sample(items)]),
            None => Value::Array(Vec::new()),
        },
        NodeKind::Object(object) => {
            let map: Map<String, Value> = object
                .properties
                .iter()
                .map(|(key, child)| (key.clone(), generate_sample(child)))
                .collect();
            Value::Object(map)
        }
    }
}

fn declared_example(node: &SchemaNode) -> Option<Value> {
    if let Some(default) = &node.default {
        return Some(default.clone());
    }
    if let Some(first) = node
        .extra
        .get("examples")
        .and_then(Value::as_array)
        .and_then(|examples| examples.first())
    {
        return Some(first.clone());
    }
    node.extra.get("example").cloned()
}
