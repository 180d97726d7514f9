use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};
use serde_json::Value;

pub struct EnumValuesRule;

impl ShapeRule for EnumValuesRule {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn description(&self) -> &'static str {
        "enum must list at least one value"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        match node.schema.get("enum") {
            Some(Value::Array(values)) if values.is_empty() => vec![Diagnostic::error(
                self.name(),
                "enum must contain at least one value",
                node.path,
            )],
            Some(Value::Array(_)) | None => Vec::new(),
            Some(_) => vec![Diagnostic::error(self.name(), "enum must be an array", node.path)],
        }
    }
}
