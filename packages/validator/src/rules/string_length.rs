use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};

pub struct StringLengthRule;

impl ShapeRule for StringLengthRule {
    fn name(&self) -> &'static str {
        "string-length"
    }

    fn description(&self) -> &'static str {
        "String length limits must be non-negative and ordered"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let min_length = node.integer("minLength");
        let max_length = node.integer("maxLength");

        if let Some(min) = min_length.filter(|min| *min < 0) {
            diagnostics.push(Diagnostic::error(
                self.name(),
                format!("minLength ({}) cannot be negative", min),
                node.path,
            ));
        }
        if let Some(max) = max_length.filter(|max| *max < 0) {
            diagnostics.push(Diagnostic::error(
                self.name(),
                format!("maxLength ({}) cannot be negative", max),
                node.path,
            ));
        }
        if let (Some(min), Some(max)) = (min_length, max_length) {
            if min > max {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!("minLength ({}) is greater than maxLength ({})", min, max),
                    node.path,
                ));
            }
        }

        diagnostics
    }
}
