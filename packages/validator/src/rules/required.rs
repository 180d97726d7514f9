use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};
use serde_json::Value;

/// `required` entries should name declared properties
pub struct RequiredRule;

impl ShapeRule for RequiredRule {
    fn name(&self) -> &'static str {
        "required"
    }

    fn description(&self) -> &'static str {
        "Required entries should reference properties"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let Some(required) = node.schema.get("required") else {
            return Vec::new();
        };

        let Some(entries) = required.as_array() else {
            return vec![Diagnostic::error(
                self.name(),
                "required must be an array of property names",
                node.path,
            )];
        };

        let properties = node.schema.get("properties").and_then(Value::as_object);
        let mut diagnostics = Vec::new();

        for entry in entries {
            match entry.as_str() {
                Some(key) => {
                    if !properties.is_some_and(|p| p.contains_key(key)) {
                        diagnostics.push(Diagnostic::warning(
                            self.name(),
                            format!("Required property '{}' is not defined in properties", key),
                            node.path,
                        ));
                    }
                }
                None => diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!("required entry {} is not a string", entry),
                    node.path,
                )),
            }
        }

        diagnostics
    }
}
