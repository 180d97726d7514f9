use schemaform_schema::SchemaPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
///
/// Errors make a schema invalid; warnings never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A single finding of the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// The rule that generated this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Schema node the finding is about
    pub path: SchemaPath,
}

impl Diagnostic {
    pub fn error(rule: impl Into<String>, message: impl Into<String>, path: &SchemaPath) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            rule: rule.into(),
            message: message.into(),
            path: path.clone(),
        }
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, path: &SchemaPath) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            rule: rule.into(),
            message: message.into(),
            path: path.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
