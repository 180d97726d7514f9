use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};

pub struct ArrayItemsRule;

impl ShapeRule for ArrayItemsRule {
    fn name(&self) -> &'static str {
        "array-items"
    }

    fn description(&self) -> &'static str {
        "Array item counts must be ordered and arrays should describe their items"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let min_items = node.integer("minItems");
        let max_items = node.integer("maxItems");

        if let Some(min) = min_items.filter(|min| *min < 0) {
            diagnostics.push(Diagnostic::error(
                self.name(),
                format!("minItems ({}) cannot be negative", min),
                node.path,
            ));
        }
        if let (Some(min), Some(max)) = (min_items, max_items) {
            if min > max {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!("minItems ({}) is greater than maxItems ({})", min, max),
                    node.path,
                ));
            }
        }
        if node.type_name() == Some("array") && !node.schema.contains_key("items") {
            diagnostics.push(Diagnostic::warning(
                self.name(),
                "Array schema has no items definition",
                node.path,
            ));
        }

        diagnostics
    }
}
