use crate::path::SchemaPath;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Malformed JSON text
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid JSON at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    /// Byte offset into the source, clamped to its length
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn from_json(source: &str, error: &serde_json::Error) -> Self {
        let line = error.line();
        let column = error.column();

        Self {
            line,
            column,
            offset: byte_offset(source, line, column),
            message: strip_position(&error.to_string()),
        }
    }
}

/// serde_json appends " at line X column Y" to its messages
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// A JSON value that cannot be represented as a schema tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Schema at {path} must be a JSON object")]
    NotAnObject { path: SchemaPath },

    #[error("Schema at {path} has no type")]
    MissingType { path: SchemaPath },

    #[error("Unsupported type '{found}' at {path}")]
    UnsupportedType { path: SchemaPath, found: String },

    #[error("Invalid value for '{keyword}' at {path}: expected {expected}")]
    InvalidKeyword {
        path: SchemaPath,
        keyword: String,
        expected: &'static str,
    },
}

impl SchemaError {
    pub fn invalid_keyword(path: &SchemaPath, keyword: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidKeyword {
            path: path.clone(),
            keyword: keyword.into(),
            expected,
        }
    }
}

/// Pretty-print a parse error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_parse_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut output = Vec::new();
    let start = error.offset.min(source.len().saturating_sub(1));
    let end = (start + 1).min(source.len()).max(start);

    let report = Report::build(ReportKind::Error, filename, start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_color(Color::Red)
                .with_message(error.message.clone()),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_position() {
        let source = "{\n  \"type\": \"string\",\n}";
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let parse_error = ParseError::from_json(source, &err);

        assert_eq!(parse_error.line, 3);
        assert!(parse_error.offset <= source.len());
        assert!(!parse_error.message.contains("at line"));
    }

    #[test]
    fn test_byte_offset_first_line() {
        assert_eq!(byte_offset("abc", 1, 2), 1);
        assert_eq!(byte_offset("ab\ncd", 2, 1), 3);
        assert_eq!(byte_offset("ab", 5, 9), 2);
    }

    #[cfg(feature = "pretty-errors")]
    #[test]
    fn test_format_parse_error_mentions_message() {
        let source = "{\"type\": }";
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let parse_error = ParseError::from_json(source, &err);

        let rendered = format_parse_error(source, "schema.json", &parse_error);
        assert!(rendered.contains("schema.json"));
    }
}
