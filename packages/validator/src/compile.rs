use crate::diagnostic::Diagnostic;
use crate::error::ValidatorError;
use schemaform_schema::SchemaPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// JSON Schema draft used for the compile check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Draft {
    #[serde(rename = "draft-04")]
    Draft4,
    #[serde(rename = "draft-06")]
    Draft6,
    #[default]
    #[serde(rename = "draft-07")]
    Draft7,
    #[serde(rename = "2019-09")]
    Draft201909,
    #[serde(rename = "2020-12")]
    Draft202012,
}

impl Draft {
    pub fn as_str(&self) -> &'static str {
        match self {
            Draft::Draft4 => "draft-04",
            Draft::Draft6 => "draft-06",
            Draft::Draft7 => "draft-07",
            Draft::Draft201909 => "2019-09",
            Draft::Draft202012 => "2020-12",
        }
    }

    /// Meta-schema URI written into new documents
    pub fn meta_schema_uri(&self) -> &'static str {
        match self {
            Draft::Draft4 => "http://json-schema.org/draft-04/schema#",
            Draft::Draft6 => "http://json-schema.org/draft-06/schema#",
            Draft::Draft7 => "http://json-schema.org/draft-07/schema#",
            Draft::Draft201909 => "https://json-schema.org/draft/2019-09/schema",
            Draft::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }
}

impl fmt::Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Draft {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft-04" | "4" => Ok(Draft::Draft4),
            "draft-06" | "6" => Ok(Draft::Draft6),
            "draft-07" | "7" => Ok(Draft::Draft7),
            "2019-09" => Ok(Draft::Draft201909),
            "2020-12" => Ok(Draft::Draft202012),
            other => Err(ValidatorError::UnknownDraft(other.to_string())),
        }
    }
}

impl From<Draft> for jsonschema::Draft {
    fn from(draft: Draft) -> Self {
        match draft {
            Draft::Draft4 => jsonschema::Draft::Draft4,
            Draft::Draft6 => jsonschema::Draft::Draft6,
            Draft::Draft7 => jsonschema::Draft::Draft7,
            Draft::Draft201909 => jsonschema::Draft::Draft201909,
            Draft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Compile the schema with the jsonschema crate
///
/// Compilation exceptions become error diagnostics at the root.
pub fn compile_check(schema: &Value, draft: Draft) -> Vec<Diagnostic> {
    match jsonschema::options().with_draft(draft.into()).build(schema) {
        Ok(_) => Vec::new(),
        Err(err) => vec![Diagnostic::error(
            "compile",
            format!("Schema compilation failed: {}", err),
            &SchemaPath::root(),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compiles_valid_schema() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "string"}}});
        assert!(compile_check(&schema, Draft::Draft7).is_empty());
    }

    #[test]
    fn test_rejects_malformed_keyword() {
        let schema = json!({"type": "string", "minLength": "three"});
        let diagnostics = compile_check(&schema, Draft::Draft7);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "compile");
    }

    #[test]
    fn test_draft_names() {
        assert_eq!("2020-12".parse::<Draft>().unwrap(), Draft::Draft202012);
        assert_eq!(Draft::default().as_str(), "draft-07");
        assert!("draft-99".parse::<Draft>().is_err());
    }
}
