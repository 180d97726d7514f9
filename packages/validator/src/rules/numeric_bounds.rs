use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};

/// Checks `minimum`/`maximum`, their exclusive forms and `multipleOf`
pub struct NumericBoundsRule;

impl ShapeRule for NumericBoundsRule {
    fn name(&self) -> &'static str {
        "numeric-bounds"
    }

    fn description(&self) -> &'static str {
        "Numeric bounds must describe a non-empty range"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let minimum = node.number("minimum");
        let maximum = node.number("maximum");
        let exclusive_minimum = node.number("exclusiveMinimum");
        let exclusive_maximum = node.number("exclusiveMaximum");

        let pairs = [
            (("minimum", minimum), ("maximum", maximum), false),
            (("exclusiveMinimum", exclusive_minimum), ("exclusiveMaximum", exclusive_maximum), true),
            (("minimum", minimum), ("exclusiveMaximum", exclusive_maximum), true),
            (("exclusiveMinimum", exclusive_minimum), ("maximum", maximum), true),
        ];

        for ((low_name, low), (high_name, high), strict) in pairs {
            let (Some(low), Some(high)) = (low, high) else {
                continue;
            };
            let (Some(low_f), Some(high_f)) = (low.as_f64(), high.as_f64()) else {
                continue;
            };

            if strict && low_f >= high_f {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!(
                        "{} ({}) must be less than {} ({})",
                        low_name, low, high_name, high
                    ),
                    node.path,
                ));
            } else if !strict && low_f > high_f {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!(
                        "{} ({}) is greater than {} ({})",
                        low_name, low, high_name, high
                    ),
                    node.path,
                ));
            }
        }

        if let Some(multiple_of) = node.number("multipleOf") {
            if multiple_of.as_f64().map_or(true, |m| m <= 0.0) {
                diagnostics.push(Diagnostic::error(
                    self.name(),
                    format!("multipleOf ({}) must be greater than 0", multiple_of),
                    node.path,
                ));
            }
        }

        diagnostics
    }
}
