use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};
use serde_json::Value;

pub struct ObjectPropertiesRule;

impl ShapeRule for ObjectPropertiesRule {
    fn name(&self) -> &'static str {
        "object-properties"
    }

    fn description(&self) -> &'static str {
        "Property counts must be ordered and properties must be a map of schemas"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let min_properties = node.integer("minProperties");
        let max_properties = node.integer("maxProperties");

        if let Some(min) = min_properties.filter(|min| *min < 0) {
            diagnostics.push(Diagnostic::error(
                self.name(),
                format!("minProperties ({}) cannot be negative", min),
                node.path,
            ));
        }
        if let (Some(min), Some(max)) = (min_properties, max_properties) {
            if min > max {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!("minProperties ({}) is greater than maxProperties ({})", min, max),
                    node.path,
                ));
            }
        }
        if let Some(properties) = node.schema.get("properties") {
            if !matches!(properties, Value::Object(_)) {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    "properties must be an object",
                    node.path,
                ));
            }
        }

        diagnostics
    }
}
