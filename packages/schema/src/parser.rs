//! Text → JSON value → schema tree

use crate::error::{ParseError, ParseResult, SchemaError};
use crate::node::{
    ArrayConstraints, NodeKind, NumberConstraints, ObjectConstraints, SchemaNode, SchemaType,
    StringConstraints,
};
use crate::path::SchemaPath;
use serde_json::{Map, Number, Value};

/// Parse JSON text, keeping object keys in source order
pub fn parse(source: &str) -> ParseResult<Value> {
    serde_json::from_str(source).map_err(|e| ParseError::from_json(source, &e))
}

/// Parse JSON text all the way to a schema tree
pub fn parse_schema(source: &str) -> Result<SchemaNode, SchemaError> {
    let value = parse(source)?;
    SchemaNode::try_from(&value)
}

impl TryFrom<&Value> for SchemaNode {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        node_from_value(value, &SchemaPath::root())
    }
}

impl TryFrom<Value> for SchemaNode {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        node_from_value(&value, &SchemaPath::root())
    }
}

impl<'de> serde::Deserialize<'de> for SchemaNode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        SchemaNode::try_from(&value).map_err(serde::de::Error::custom)
    }
}

fn node_from_value(value: &Value, path: &SchemaPath) -> Result<SchemaNode, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject { path: path.clone() })?;

    let schema_type = match map.get("type") {
        None => return Err(SchemaError::MissingType { path: path.clone() }),
        Some(Value::String(name)) => name.parse::<SchemaType>().map_err(|_| {
            SchemaError::UnsupportedType {
                path: path.clone(),
                found: name.clone(),
            }
        })?,
        Some(other) => {
            return Err(SchemaError::UnsupportedType {
                path: path.clone(),
                found: other.to_string(),
            })
        }
    };

    let mut node = SchemaNode::new(NodeKind::empty(schema_type));

    for (key, val) in map {
        match key.as_str() {
            "type" => {}
            "title" => node.title = Some(expect_string(val, path, key)?),
            "description" => node.description = Some(expect_string(val, path, key)?),
            "default" => node.default = Some(val.clone()),
            _ => {
                if !read_keyword(&mut node.kind, key, val, path)? {
                    node.extra.insert(key.clone(), val.clone());
                }
            }
        }
    }

    Ok(node)
}

/// Store a type-specific keyword; `Ok(false)` means it is not modelled
fn read_keyword(
    kind: &mut NodeKind,
    key: &str,
    value: &Value,
    path: &SchemaPath,
) -> Result<bool, SchemaError> {
    match kind {
        NodeKind::String(c) => read_string_keyword(c, key, value, path),
        NodeKind::Number(c) | NodeKind::Integer(c) => read_number_keyword(c, key, value, path),
        NodeKind::Boolean => Ok(false),
        NodeKind::Array(c) => read_array_keyword(c, key, value, path),
        NodeKind::Object(c) => read_object_keyword(c, key, value, path),
    }
}

fn read_string_keyword(
    c: &mut StringConstraints,
    key: &str,
    value: &Value,
    path: &SchemaPath,
) -> Result<bool, SchemaError> {
    match key {
        "minLength" => c.min_length = Some(expect_count(value, path, key)?),
        "maxLength" => c.max_length = Some(expect_count(value, path, key)?),
        "pattern" => c.pattern = Some(expect_string(value, path, key)?),
        "format" => c.format = Some(expect_string(value, path, key)?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_number_keyword(
    c: &mut NumberConstraints,
    key: &str,
    value: &Value,
    path: &SchemaPath,
) -> Result<bool, SchemaError> {
    match key {
        "minimum" => c.minimum = Some(expect_number(value, path, key)?),
        "maximum" => c.maximum = Some(expect_number(value, path, key)?),
        "multipleOf" => c.multiple_of = Some(expect_number(value, path, key)?),
        // Draft-4 boolean exclusive bounds are kept verbatim as extra keywords
        "exclusiveMinimum" => match value {
            Value::Number(n) => c.exclusive_minimum = Some(n.clone()),
            _ => return Ok(false),
        },
        "exclusiveMaximum" => match value {
            Value::Number(n) => c.exclusive_maximum = Some(n.clone()),
            _ => return Ok(false),
        },
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_array_keyword(
    c: &mut ArrayConstraints,
    key: &str,
    value: &Value,
    path: &SchemaPath,
) -> Result<bool, SchemaError> {
    match key {
        "items" => match value {
            Value::Object(_) => {
                c.items = Some(Box::new(node_from_value(value, &path.items())?));
            }
            // Tuple validation is not edited structurally
            Value::Array(_) => return Ok(false),
            _ => return Err(SchemaError::invalid_keyword(path, key, "a schema object")),
        },
        "minItems" => c.min_items = Some(expect_count(value, path, key)?),
        "maxItems" => c.max_items = Some(expect_count(value, path, key)?),
        "uniqueItems" => c.unique_items = Some(expect_bool(value, path, key)?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_object_keyword(
    c: &mut ObjectConstraints,
    key: &str,
    value: &Value,
    path: &SchemaPath,
) -> Result<bool, SchemaError> {
    match key {
        "properties" => {
            let properties: &Map<String, Value> = value
                .as_object()
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "an object"))?;
            for (name, child) in properties {
                let child = node_from_value(child, &path.child(name.clone()))?;
                c.properties.insert(name.clone(), child);
            }
        }
        "required" => {
            let entries = value
                .as_array()
                .ok_or_else(|| SchemaError::invalid_keyword(path, key, "an array of strings"))?;
            c.required = entries
                .iter()
                .map(|entry| {
                    entry
                        .as_str()
                        .map(str::to_string)
                        .ok_or_else(|| SchemaError::invalid_keyword(path, key, "an array of strings"))
                })
                .collect::<Result<_, _>>()?;
        }
        "additionalProperties" => match value {
            Value::Bool(b) => c.additional_properties = Some(*b),
            _ => return Ok(false),
        },
        "minProperties" => c.min_properties = Some(expect_count(value, path, key)?),
        "maxProperties" => c.max_properties = Some(expect_count(value, path, key)?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn expect_string(value: &Value, path: &SchemaPath, key: &str) -> Result<String, SchemaError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::invalid_keyword(path, key, "a string"))
}

fn expect_number(value: &Value, path: &SchemaPath, key: &str) -> Result<Number, SchemaError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(SchemaError::invalid_keyword(path, key, "a number")),
    }
}

fn expect_count(value: &Value, path: &SchemaPath, key: &str) -> Result<i64, SchemaError> {
    value
        .as_i64()
        .ok_or_else(|| SchemaError::invalid_keyword(path, key, "an integer"))
}

fn expect_bool(value: &Value, path: &SchemaPath, key: &str) -> Result<bool, SchemaError> {
    value
        .as_bool()
        .ok_or_else(|| SchemaError::invalid_keyword(path, key, "a boolean"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_schema() {
        let node = parse_schema(
            r#"{
                "type": "object",
                "title": "Person",
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "age": { "type": "integer", "minimum": 0 }
                },
                "required": ["name"]
            }"#,
        )
        .unwrap();

        assert_eq!(node.title.as_deref(), Some("Person"));
        let object = node.as_object().unwrap();
        let keys: Vec<_> = object.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(object.required, vec!["name"]);
    }

    #[test]
    fn test_unmodelled_keywords_are_kept() {
        let node = SchemaNode::try_from(&json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "string",
            "enum": ["a", "b"],
            "examples": ["a"]
        }))
        .unwrap();

        assert!(node.extra.contains_key("$schema"));
        assert_eq!(node.extra.get("enum"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let err = SchemaNode::try_from(&json!({
            "type": "object",
            "properties": { "a": { "description": "untyped" } }
        }))
        .unwrap_err();

        assert_eq!(
            err,
            SchemaError::MissingType {
                path: SchemaPath::from_keys(["a"])
            }
        );
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        let err = SchemaNode::try_from(&json!({ "type": "null" })).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedType { found, .. } if found == "null"));
    }

    #[test]
    fn test_invalid_keyword_value() {
        let err = SchemaNode::try_from(&json!({ "type": "string", "minLength": "3" })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidKeyword { keyword, .. } if keyword == "minLength"));
    }

    #[test]
    fn test_array_without_items_is_tolerated() {
        let node = SchemaNode::try_from(&json!({ "type": "array" })).unwrap();
        assert!(node.as_array().unwrap().items.is_none());
    }

    #[test]
    fn test_malformed_text_is_parse_error() {
        assert!(matches!(parse_schema("{ \"type\": "), Err(SchemaError::Parse(_))));
    }
}
