use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};
use regex::Regex;
use serde_json::Value;

/// `pattern` must be a compilable regular expression
pub struct PatternRule;

impl ShapeRule for PatternRule {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn description(&self) -> &'static str {
        "Disallow invalid regular expressions in pattern"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        match node.schema.get("pattern") {
            Some(Value::String(pattern)) => match Regex::new(pattern) {
                Ok(_) => Vec::new(),
                Err(err) => vec![Diagnostic::error(
                    self.name(),
                    format!("Invalid regular expression '{}': {}", pattern, first_line(&err.to_string())),
                    node.path,
                )],
            },
            Some(_) => vec![Diagnostic::error(
                self.name(),
                "pattern must be a string",
                node.path,
            )],
            None => Vec::new(),
        }
    }
}

/// regex errors render a multi-line caret diagram; keep the summary
fn first_line(message: &str) -> &str {
    message
        .lines()
        .rev()
        .find(|line| line.starts_with("error:"))
        .map(|line| line.trim_start_matches("error:").trim())
        .unwrap_or(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::check;
    use serde_json::json;

    #[test]
    fn test_detects_invalid_pattern() {
        let diagnostics = check(&PatternRule, json!({"type": "string", "pattern": "("}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "pattern");
    }

    #[test]
    fn test_allows_valid_pattern() {
        assert!(check(&PatternRule, json!({"pattern": "^[A-Z]{2}\\d+$"})).is_empty());
    }

    #[test]
    fn test_non_string_pattern() {
        assert_eq!(check(&PatternRule, json!({"pattern": 3})).len(), 1);
    }
}
