use crate::diagnostic::Diagnostic;
use crate::rules::{NodeContext, ShapeRule};
use schemaform_schema::SchemaType;
use serde_json::Value;

const COMPOSITION_KEYWORDS: [&str; 4] = ["$ref", "allOf", "anyOf", "oneOf"];

/// Rejects `type` values the editor cannot handle
///
/// A root schema that has neither a `type` nor a reference/composition
/// keyword only gets a warning.
pub struct TypeRule;

impl ShapeRule for TypeRule {
    fn name(&self) -> &'static str {
        "type"
    }

    fn description(&self) -> &'static str {
        "Require a supported type on every schema"
    }

    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match node.schema.get("type") {
            Some(Value::String(name)) => {
                if name.parse::<SchemaType>().is_err() {
                    diagnostics.push(unsupported(node, name));
                }
            }
            Some(other) => diagnostics.push(unsupported(node, &other.to_string())),
            None => {
                let composed = COMPOSITION_KEYWORDS
                    .iter()
                    .any(|keyword| node.schema.contains_key(*keyword));
                if node.is_root && !composed {
                    diagnostics.push(Diagnostic::warning(
                        self.name(),
                        "Root schema should declare a type, $ref, allOf, anyOf or oneOf",
                        node.path,
                    ));
                }
            }
        }

        diagnostics
    }
}

fn unsupported(node: &NodeContext<'_>, found: &str) -> Diagnostic {
    let expected: Vec<&str> = SchemaType::ALL.iter().map(SchemaType::as_str).collect();
    Diagnostic::error(
        "type",
        format!(
            "Unsupported type '{}'. Expected one of: {}",
            found.trim_matches('"'),
            expected.join(", ")
        ),
        node.path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticLevel;
    use crate::rules::test_support::{check, check_at};
    use serde_json::json;

    #[test]
    fn test_rejects_unknown_type() {
        let diagnostics = check(&TypeRule, json!({"type": "date"}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Error);
        assert!(diagnostics[0].message.contains("'date'"));
    }

    #[test]
    fn test_rejects_type_arrays() {
        let diagnostics = check(&TypeRule, json!({"type": ["string", "null"]}));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_root_without_type_is_warning() {
        let diagnostics = check_at(&TypeRule, json!({"properties": {}}), true);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Warning);

        assert!(check_at(&TypeRule, json!({"$ref": "#/definitions/a"}), true).is_empty());
        assert!(check_at(&TypeRule, json!({"description": "x"}), false).is_empty());
    }
}
