use crate::compile::{compile_check, Draft};
use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use crate::rules::RuleRegistry;
use crate::shape::check_shape;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Options for configuring the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorOptions {
    /// Draft used by the compile check
    pub draft: Draft,

    /// Run the jsonschema compile check after the shape rules
    pub compile: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            draft: Draft::default(),
            compile: true,
        }
    }
}

/// Outcome of validating one schema document
///
/// `valid` is true iff `errors` is empty; warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let mut report = Self {
            valid: true,
            ..Self::default()
        };
        for diagnostic in diagnostics {
            report.push(diagnostic);
        }
        report
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Error => self.errors.push(diagnostic.to_string()),
            DiagnosticLevel::Warning => self.warnings.push(diagnostic.to_string()),
        }
        self.diagnostics.push(diagnostic);
        self.valid = self.errors.is_empty();
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Shape rules plus the compile check, composed
#[derive(Debug)]
pub struct SchemaValidator {
    registry: RuleRegistry,
    options: ValidatorOptions,
}

impl SchemaValidator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self::with_registry(RuleRegistry::new(), options)
    }

    pub fn with_registry(registry: RuleRegistry, options: ValidatorOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Shape rules only
    pub fn check_shape(&self, schema: &Value) -> ValidationReport {
        ValidationReport::from_diagnostics(check_shape(schema, &self.registry))
    }

    /// Shape rules, then the compile check when enabled
    pub fn validate(&self, schema: &Value) -> ValidationReport {
        let mut report = self.check_shape(schema);

        if self.options.compile {
            for diagnostic in compile_check(schema, self.options.draft) {
                report.push(diagnostic);
            }
        }

        debug!(
            valid = report.valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Schema validation complete"
        );

        report
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

/// Validate a schema document with the built-in rules
pub fn validate(schema: &Value, options: ValidatorOptions) -> ValidationReport {
    SchemaValidator::new(options).validate(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inverted_number_bounds_are_invalid() {
        let report = validate(
            &json!({"type": "number", "minimum": 10, "maximum": 5}),
            ValidatorOptions::default(),
        );
        assert!(!report.valid);
        assert!(!report.errors.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_invalid() {
        let report = validate(
            &json!({"type": "string", "pattern": "("}),
            ValidatorOptions::default(),
        );
        assert!(!report.valid);
    }

    #[test]
    fn test_missing_required_property_only_warns() {
        let report = validate(
            &json!({"type": "object", "properties": {"a": {"type": "string"}}, "required": ["b"]}),
            ValidatorOptions::default(),
        );
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_empty_enum_is_invalid() {
        let report = validate(
            &json!({"type": "string", "enum": []}),
            ValidatorOptions {
                compile: false,
                ..ValidatorOptions::default()
            },
        );
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_root_without_type_is_still_valid() {
        let report = validate(&json!({"properties": {}}), ValidatorOptions::default());
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_messages_carry_paths() {
        let report = validate(
            &json!({"type": "object", "properties": {"age": {"type": "integer", "minimum": 9, "maximum": 1}}}),
            ValidatorOptions {
                compile: false,
                ..ValidatorOptions::default()
            },
        );
        assert_eq!(
            report.errors,
            vec!["/properties/age: minimum (9) is greater than maximum (1)".to_string()]
        );
    }
}
