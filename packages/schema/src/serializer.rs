use crate::node::{NodeKind, NumberConstraints, SchemaNode};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Serializer converts a schema tree back to JSON text
///
/// Keywords are emitted in a fixed order: `$`-prefixed keywords, `type`,
/// `title`, `description`, type constraints, `default`, then the remaining
/// unmodelled keywords in their original order. Output is pretty-printed and
/// has no trailing newline.
#[derive(Debug, Clone)]
pub struct Serializer {
    indent_string: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            indent_string: "  ".to_string(), // 2 spaces
        }
    }

    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_string: indent.to_string(),
        }
    }

    /// Serialize a schema tree to text
    pub fn serialize(&self, node: &SchemaNode) -> String {
        self.serialize_value(&node.to_value())
    }

    /// Serialize any JSON value with this serializer's indentation
    pub fn serialize_value(&self, value: &Value) -> String {
        let mut output = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent_string.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut output, formatter);

        // Writing a Value into a Vec has no failure path
        if value.serialize(&mut ser).is_err() {
            return String::new();
        }

        String::from_utf8(output).unwrap_or_default()
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize with the default 2-space indentation
pub fn serialize(node: &SchemaNode) -> String {
    Serializer::new().serialize(node)
}

impl SchemaNode {
    /// Structural JSON value of this tree
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();

        for (key, value) in self.extra.iter().filter(|(k, _)| k.starts_with('$')) {
            map.insert(key.clone(), value.clone());
        }

        map.insert(
            "type".to_string(),
            Value::String(self.schema_type().as_str().to_string()),
        );
        if let Some(title) = &self.title {
            map.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            map.insert("description".to_string(), Value::String(description.clone()));
        }

        write_constraints(&self.kind, &mut map);

        if let Some(default) = &self.default {
            map.insert("default".to_string(), default.clone());
        }

        for (key, value) in self.extra.iter().filter(|(k, _)| !k.starts_with('$')) {
            map.insert(key.clone(), value.clone());
        }

        Value::Object(map)
    }
}

impl From<&SchemaNode> for Value {
    fn from(node: &SchemaNode) -> Self {
        node.to_value()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

fn insert_opt<T: Into<Value> + Clone>(map: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.clone().into());
    }
}

fn write_number_constraints(c: &NumberConstraints, map: &mut Map<String, Value>) {
    insert_opt(map, "minimum", &c.minimum);
    insert_opt(map, "maximum", &c.maximum);
    insert_opt(map, "exclusiveMinimum", &c.exclusive_minimum);
    insert_opt(map, "exclusiveMaximum", &c.exclusive_maximum);
    insert_opt(map, "multipleOf", &c.multiple_of);
}

fn write_constraints(kind: &NodeKind, map: &mut Map<String, Value>) {
    match kind {
        NodeKind::String(c) => {
            insert_opt(map, "minLength", &c.min_length);
            insert_opt(map, "maxLength", &c.max_length);
            insert_opt(map, "pattern", &c.pattern);
            insert_opt(map, "format", &c.format);
        }
        NodeKind::Number(c) | NodeKind::Integer(c) => write_number_constraints(c, map),
        NodeKind::Boolean => {}
        NodeKind::Array(c) => {
            if let Some(items) = &c.items {
                map.insert("items".to_string(), items.to_value());
            }
            insert_opt(map, "minItems", &c.min_items);
            insert_opt(map, "maxItems", &c.max_items);
            insert_opt(map, "uniqueItems", &c.unique_items);
        }
        NodeKind::Object(c) => {
            let properties: Map<String, Value> = c
                .properties
                .iter()
                .map(|(key, child)| (key.clone(), child.to_value()))
                .collect();
            map.insert("properties".to_string(), Value::Object(properties));
            if !c.required.is_empty() {
                map.insert(
                    "required".to_string(),
                    Value::Array(c.required.iter().cloned().map(Value::String).collect()),
                );
            }
            insert_opt(map, "additionalProperties", &c.additional_properties);
            insert_opt(map, "minProperties", &c.min_properties);
            insert_opt(map, "maxProperties", &c.max_properties);
        }
    }
}
