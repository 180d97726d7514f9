//! Recursive shape walker
//!
//! Runs every registered rule on each schema object, descending into array
//! `items` and object `properties`. Works on the raw JSON value so it also
//! reports things the typed tree cannot represent.

use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, RuleRegistry};
use schemaform_schema::SchemaPath;
use serde_json::Value;

/// Check a whole schema document and return all diagnostics
pub fn check_shape(schema: &Value, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_node(schema, &SchemaPath::root(), true, registry, &mut diagnostics);
    diagnostics
}

fn check_node(
    schema: &Value,
    path: &SchemaPath,
    is_root: bool,
    registry: &RuleRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let map = match schema {
        Value::Object(map) => map,
        // Boolean schemas are valid everywhere
        Value::Bool(_) => return,
        _ => {
            diagnostics.push(Diagnostic::error(
                "shape",
                "Schema must be an object",
                path,
            ));
            return;
        }
    };

    let context = NodeContext {
        schema: map,
        path,
        is_root,
    };
    for rule in registry.rules() {
        diagnostics.extend(rule.check(&context));
    }

    match map.get("items") {
        Some(items @ Value::Object(_)) => {
            check_node(items, &path.items(), false, registry, diagnostics);
        }
        Some(Value::Array(tuple)) => {
            // Positional items have no tree path of their own
            for items in tuple {
                check_node(items, &path.items(), false, registry, diagnostics);
            }
        }
        _ => {}
    }

    if let Some(Value::Object(properties)) = map.get("properties") {
        for (key, child) in properties {
            check_node(child, &path.child(key.clone()), false, registry, diagnostics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_walks_nested_properties_and_items() {
        let schema = json!({
            "type": "object",
            "properties": {
                "list": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "code": {"type": "string", "pattern": "("}
                        }
                    }
                }
            }
        });

        let diagnostics = check_shape(&schema, &RuleRegistry::new());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].path,
            SchemaPath::from_keys(["list"]).items().child("code")
        );
    }

    #[test]
    fn test_non_object_schema() {
        let diagnostics = check_shape(
            &json!({"type": "object", "properties": {"a": 3, "b": true}}),
            &RuleRegistry::new(),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "shape");
    }

    #[test]
    fn test_empty_registry_reports_nothing() {
        let diagnostics = check_shape(&json!({"type": "nope"}), &RuleRegistry::empty());
        assert!(diagnostics.is_empty());
    }
}
