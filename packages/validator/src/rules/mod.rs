mod array_items;
mod enum_values;
mod numeric_bounds;
mod object_properties;
mod pattern;
mod required;
mod string_length;
mod type_rule;

pub use array_items::ArrayItemsRule;
pub use enum_values::EnumValuesRule;
pub use numeric_bounds::NumericBoundsRule;
pub use object_properties::ObjectPropertiesRule;
pub use pattern::PatternRule;
pub use required::RequiredRule;
pub use string_length::StringLengthRule;
pub use type_rule::TypeRule;

use crate::diagnostic::Diagnostic;
use schemaform_schema::SchemaPath;
use serde_json::{Map, Number, Value};

/// One schema object as seen by the rules
pub struct NodeContext<'a> {
    pub schema: &'a Map<String, Value>,
    pub path: &'a SchemaPath,
    pub is_root: bool,
}

impl<'a> NodeContext<'a> {
    pub fn number(&self, key: &str) -> Option<&'a Number> {
        match self.schema.get(key) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.schema.get(key).and_then(Value::as_i64)
    }

    pub fn type_name(&self) -> Option<&'a str> {
        self.schema.get("type").and_then(Value::as_str)
    }
}

/// Trait for implementing shape rules
pub trait ShapeRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a single schema object (children are visited by the walker)
    fn check(&self, node: &NodeContext<'_>) -> Vec<Diagnostic>;
}

/// Registry of all available shape rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ShapeRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(TypeRule),
                Box::new(NumericBoundsRule),
                Box::new(StringLengthRule),
                Box::new(PatternRule),
                Box::new(ArrayItemsRule),
                Box::new(ObjectPropertiesRule),
                Box::new(RequiredRule),
                Box::new(EnumValuesRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ShapeRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ShapeRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Run one rule against a schema literal at the root
    pub fn check(rule: &dyn ShapeRule, schema: Value) -> Vec<Diagnostic> {
        check_at(rule, schema, false)
    }

    pub fn check_at(rule: &dyn ShapeRule, schema: Value, is_root: bool) -> Vec<Diagnostic> {
        let map = schema.as_object().cloned().unwrap_or_default();
        let path = SchemaPath::root();
        rule.check(&NodeContext {
            schema: &map,
            path: &path,
            is_root,
        })
    }
}
