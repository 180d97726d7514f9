//! Tree locations as explicit segment lists.
//!
//! A path never joins keys into a single string, so property names that
//! contain `.` or `/` stay unambiguous. Paths display as JSON pointers into
//! the schema document (`/properties/address/properties/street`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step from a node to a child node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathSegment {
    /// Named property of an object node
    Property(String),
    /// Item schema of an array node
    Items,
}

/// Location of a node in the schema tree, root first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaPath(Vec<PathSegment>);

impl SchemaPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path that walks object properties only
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            keys.into_iter()
                .map(|key| PathSegment::Property(key.into()))
                .collect(),
        )
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Number of segments between the root and this node
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Property(key.into()));
        Self(segments)
    }

    pub fn items(&self) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Items);
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Property name of the last segment, if it names a property
    pub fn last_key(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Property(key)) => Some(key),
            _ => None,
        }
    }

    /// True if `self` equals `other` or is one of its ancestors
    pub fn starts_with(&self, other: &SchemaPath) -> bool {
        self.0.starts_with(&other.0)
    }

    /// True if `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &SchemaPath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<PathSegment>> for SchemaPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape_pointer_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            match segment {
                PathSegment::Property(key) => {
                    write!(f, "/properties/{}", escape_pointer_token(key))?
                }
                PathSegment::Items => f.write_str("/items")?,
            }
        }
        Ok(())
    }
}

/// Error returned when a JSON pointer does not address a schema node
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid schema pointer '{pointer}': {reason}")]
pub struct PathParseError {
    pub pointer: String,
    pub reason: String,
}

impl FromStr for SchemaPath {
    type Err = PathParseError;

    /// Parse a JSON pointer made of `/properties/<name>` and `/items` steps
    fn from_str(pointer: &str) -> Result<Self, Self::Err> {
        let trimmed = pointer.strip_prefix('#').unwrap_or(pointer);
        if trimmed.is_empty() || trimmed == "/" {
            return Ok(Self::root());
        }

        let rest = trimmed.strip_prefix('/').ok_or_else(|| PathParseError {
            pointer: pointer.to_string(),
            reason: "pointer must start with '/'".to_string(),
        })?;

        let mut tokens = rest.split('/');
        let mut segments = Vec::new();
        while let Some(token) = tokens.next() {
            match token {
                "properties" => {
                    let key = tokens.next().ok_or_else(|| PathParseError {
                        pointer: pointer.to_string(),
                        reason: "'properties' must be followed by a property name".to_string(),
                    })?;
                    segments.push(PathSegment::Property(unescape_pointer_token(key)));
                }
                "items" => segments.push(PathSegment::Items),
                other => {
                    return Err(PathParseError {
                        pointer: pointer.to_string(),
                        reason: format!("unexpected segment '{}'", other),
                    })
                }
            }
        }

        Ok(Self(segments))
    }
}
