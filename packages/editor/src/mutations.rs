//! # Tree Mutations
//!
//! Semantic edit operations on a schema tree.
//!
//! ## Design Principles
//!
//! 1. **Node replacement**: every edit produces a new value at a [`SchemaPath`]
//! 2. **Validated**: preconditions are checked before anything is written, so
//!    a failed mutation leaves the tree untouched
//! 3. **All-or-nothing nesting**: a nest move that leaves the tree with shape
//!    errors is rolled back to a full snapshot
//!
//! ## Mutation Semantics
//!
//! ### RenameProperty
//! - Renaming onto an existing key is a no-op
//! - The value keeps its position; `required` is updated in place
//!
//! ### SortProperty
//! - Source and target share a parent
//! - Source is removed, then reinserted next to the target
//!
//! ### NestProperty
//! - Refused if the target is the moved property or one of its descendants
//! - Colliding keys are suffixed (`key_1`, `key_2`, ...)

use crate::options::EditorOptions;
use schemaform_schema::{NodeKind, ObjectConstraints, SchemaNode, SchemaPath, SchemaType};
use schemaform_validator::{check_shape, RuleRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Base key for properties added without a name
pub const NEW_PROPERTY_KEY: &str = "newProperty";

/// Keyword editable through [`Mutation::SetField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    Default,
    MinLength,
    MaxLength,
    Pattern,
    Format,
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    MultipleOf,
    MinItems,
    MaxItems,
    UniqueItems,
    MinProperties,
    MaxProperties,
    AdditionalProperties,
    Enum,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::Title,
        Field::Description,
        Field::Default,
        Field::MinLength,
        Field::MaxLength,
        Field::Pattern,
        Field::Format,
        Field::Minimum,
        Field::Maximum,
        Field::ExclusiveMinimum,
        Field::ExclusiveMaximum,
        Field::MultipleOf,
        Field::MinItems,
        Field::MaxItems,
        Field::UniqueItems,
        Field::MinProperties,
        Field::MaxProperties,
        Field::AdditionalProperties,
        Field::Enum,
    ];

    /// JSON Schema keyword this field edits
    pub fn keyword(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Default => "default",
            Field::MinLength => "minLength",
            Field::MaxLength => "maxLength",
            Field::Pattern => "pattern",
            Field::Format => "format",
            Field::Minimum => "minimum",
            Field::Maximum => "maximum",
            Field::ExclusiveMinimum => "exclusiveMinimum",
            Field::ExclusiveMaximum => "exclusiveMaximum",
            Field::MultipleOf => "multipleOf",
            Field::MinItems => "minItems",
            Field::MaxItems => "maxItems",
            Field::UniqueItems => "uniqueItems",
            Field::MinProperties => "minProperties",
            Field::MaxProperties => "maxProperties",
            Field::AdditionalProperties => "additionalProperties",
            Field::Enum => "enum",
        }
    }

    pub fn applies_to(&self, schema_type: SchemaType) -> bool {
        match self {
            Field::Title | Field::Description | Field::Default | Field::Enum => true,
            Field::MinLength | Field::MaxLength | Field::Pattern | Field::Format => {
                schema_type == SchemaType::String
            }
            Field::Minimum
            | Field::Maximum
            | Field::ExclusiveMinimum
            | Field::ExclusiveMaximum
            | Field::MultipleOf => {
                matches!(schema_type, SchemaType::Number | SchemaType::Integer)
            }
            Field::MinItems | Field::MaxItems | Field::UniqueItems => {
                schema_type == SchemaType::Array
            }
            Field::MinProperties | Field::MaxProperties | Field::AdditionalProperties => {
                schema_type == SchemaType::Object
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Field {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.keyword() == s)
            .ok_or_else(|| MutationError::UnknownField(s.to_string()))
    }
}

/// Side of the target a sorted property lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
}

/// Semantic mutations on the schema tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Set a keyword on a node; `None`, `null` or `""` deletes it
    SetField {
        path: SchemaPath,
        field: Field,
        value: Option<Value>,
    },

    /// Switch a node's type (title and description survive)
    ChangeType {
        path: SchemaPath,
        schema_type: SchemaType,
    },

    /// Replace a node wholesale
    ReplaceNode { path: SchemaPath, node: SchemaNode },

    /// Add a property with the type's default shape
    AddProperty {
        path: SchemaPath,
        name: Option<String>,
        schema_type: SchemaType,
    },

    /// Remove a property and its `required` entry
    RemoveProperty { path: SchemaPath, name: String },

    RenameProperty {
        path: SchemaPath,
        from: String,
        to: String,
    },

    SetRequired {
        path: SchemaPath,
        name: String,
        required: bool,
    },

    /// Replace an array's `items` with the type's default shape
    SetItemType {
        path: SchemaPath,
        schema_type: SchemaType,
    },

    /// Reorder a property among its siblings
    SortProperty {
        parent: SchemaPath,
        key: String,
        target: String,
        position: DropPosition,
    },

    /// Move property `key` of object `from` into object `to`
    NestProperty {
        from: SchemaPath,
        key: String,
        to: SchemaPath,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(SchemaPath),

    #[error("Node at {0} is not an object")]
    NotAnObject(SchemaPath),

    #[error("Node at {0} is not an array")]
    NotAnArray(SchemaPath),

    #[error("Property '{key}' not found at {path}")]
    PropertyNotFound { path: SchemaPath, key: String },

    #[error("Property '{key}' already exists at {path}")]
    PropertyExists { path: SchemaPath, key: String },

    #[error("Property name cannot be empty")]
    EmptyName,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' does not apply to {schema_type} schemas")]
    FieldNotApplicable {
        field: Field,
        schema_type: SchemaType,
    },

    #[error("Invalid value for '{field}': expected {expected}")]
    InvalidFieldValue {
        field: Field,
        expected: &'static str,
    },

    #[error("Properties can only be sorted within the same parent")]
    SameParentRequired,

    #[error("Cannot move {from} into {to}: target is the property itself or one of its descendants")]
    CycleDetected { from: SchemaPath, to: SchemaPath },

    #[error("Object at {path} already has a property named '{key}'")]
    Collision { path: SchemaPath, key: String },

    #[error("Move would exceed the maximum nesting depth of {max}")]
    DepthLimitExceeded { max: usize },

    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}

/// What a successful mutation did to the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The tree changed; `path` locates the node the edit produced
    Applied { path: SchemaPath },
    /// The mutation was accepted but had no effect
    Unchanged,
}

/// Result of applying a mutation to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    pub outcome: MutationOutcome,
}

impl MutationResult {
    pub fn changed(&self) -> bool {
        matches!(self.outcome, MutationOutcome::Applied { .. })
    }
}

impl Mutation {
    /// Apply mutation to the tree with validation
    pub fn apply(
        &self,
        root: &mut SchemaNode,
        options: &EditorOptions,
    ) -> Result<MutationOutcome, MutationError> {
        // Validate first
        self.validate(root, options)?;

        match self {
            Mutation::SetField { path, field, value } => {
                let node = node_mut(root, path)?;
                let before = node.clone();
                set_field(node, *field, value.as_ref())?;
                Ok(applied_if(*node != before, path.clone()))
            }

            Mutation::ChangeType { path, schema_type } => {
                let node = node_mut(root, path)?;
                if node.schema_type() == *schema_type {
                    return Ok(MutationOutcome::Unchanged);
                }
                *node = node.with_type(*schema_type);
                Ok(MutationOutcome::Applied { path: path.clone() })
            }

            Mutation::ReplaceNode { path, node: replacement } => {
                let node = node_mut(root, path)?;
                let changed = *node != *replacement;
                *node = replacement.clone();
                Ok(applied_if(changed, path.clone()))
            }

            Mutation::AddProperty {
                path,
                name,
                schema_type,
            } => {
                let object = object_mut(root, path)?;
                let key = match name {
                    Some(name) => name.clone(),
                    None => object.unique_key(NEW_PROPERTY_KEY),
                };
                object
                    .properties
                    .insert(key.clone(), SchemaNode::default_for(*schema_type));
                Ok(MutationOutcome::Applied {
                    path: path.child(key),
                })
            }

            Mutation::RemoveProperty { path, name } => {
                let object = object_mut(root, path)?;
                object.properties.shift_remove(name);
                object.required.retain(|required| required != name);
                Ok(MutationOutcome::Applied { path: path.clone() })
            }

            Mutation::RenameProperty { path, from, to } => {
                let object = object_mut(root, path)?;
                if from == to || object.properties.contains_key(to) {
                    debug!(%path, from = %from, to = %to, "Rename target exists, ignoring");
                    return Ok(MutationOutcome::Unchanged);
                }
                rename_property(object, from, to);
                Ok(MutationOutcome::Applied {
                    path: path.child(to.clone()),
                })
            }

            Mutation::SetRequired {
                path,
                name,
                required,
            } => {
                let object = object_mut(root, path)?;
                if object.is_required(name) == *required {
                    return Ok(MutationOutcome::Unchanged);
                }
                if *required {
                    object.required.push(name.clone());
                } else {
                    object.required.retain(|r| r != name);
                }
                Ok(MutationOutcome::Applied { path: path.clone() })
            }

            Mutation::SetItemType { path, schema_type } => {
                let array = node_mut(root, path)?
                    .as_array_mut()
                    .ok_or_else(|| MutationError::NotAnArray(path.clone()))?;
                let items = SchemaNode::default_for(*schema_type);
                let changed = array.items.as_deref() != Some(&items);
                array.items = Some(Box::new(items));
                Ok(applied_if(changed, path.items()))
            }

            Mutation::SortProperty {
                parent,
                key,
                target,
                position,
            } => {
                let object = object_mut(root, parent)?;
                Ok(applied_if(
                    sort_property(object, parent, key, target, *position)?,
                    parent.child(key.clone()),
                ))
            }

            Mutation::NestProperty { from, key, to } => nest_property(root, from, key, to),
        }
    }

    /// Validate mutation preconditions without applying
    fn validate(&self, root: &SchemaNode, options: &EditorOptions) -> Result<(), MutationError> {
        match self {
            Mutation::SetField { path, field, .. } => {
                let node = node(root, path)?;
                if !field.applies_to(node.schema_type()) {
                    return Err(MutationError::FieldNotApplicable {
                        field: *field,
                        schema_type: node.schema_type(),
                    });
                }
            }

            Mutation::ChangeType { path, .. } | Mutation::ReplaceNode { path, .. } => {
                node(root, path)?;
            }

            Mutation::AddProperty { path, name, .. } => {
                let object = object(root, path)?;
                if let Some(name) = name {
                    check_name(name)?;
                    if object.properties.contains_key(name) {
                        return Err(MutationError::PropertyExists {
                            path: path.clone(),
                            key: name.clone(),
                        });
                    }
                }
            }

            Mutation::RemoveProperty { path, name } => {
                require_property(object(root, path)?, path, name)?;
            }

            Mutation::RenameProperty { path, from, to } => {
                require_property(object(root, path)?, path, from)?;
                check_name(to)?;
            }

            Mutation::SetRequired {
                path,
                name,
                required,
            } => {
                let object = object(root, path)?;
                if *required {
                    require_property(object, path, name)?;
                }
            }

            Mutation::SetItemType { path, .. } => {
                if node(root, path)?.as_array().is_none() {
                    return Err(MutationError::NotAnArray(path.clone()));
                }
            }

            Mutation::SortProperty {
                parent,
                key,
                target,
                ..
            } => {
                let object = object(root, parent)?;
                require_property(object, parent, key)?;
                require_property(object, parent, target)?;
            }

            Mutation::NestProperty { from, key, to } => {
                let source = object(root, from)?;
                require_property(source, from, key)?;

                // The parent already holds the key
                if to == from {
                    return Err(MutationError::Collision {
                        path: to.clone(),
                        key: key.clone(),
                    });
                }

                let moved = from.child(key.clone());
                if to.starts_with(&moved) {
                    return Err(MutationError::CycleDetected {
                        from: moved,
                        to: to.clone(),
                    });
                }

                object(root, to)?;

                let height = source
                    .properties
                    .get(key)
                    .map(SchemaNode::height)
                    .unwrap_or(0);
                if !fits_depth(to, height, options.max_depth) {
                    return Err(MutationError::DepthLimitExceeded {
                        max: options.max_depth,
                    });
                }
            }
        }

        Ok(())
    }

    /// Short human-readable summary, used for undo history
    pub fn describe(&self) -> String {
        match self {
            Mutation::SetField { path, field, value } => match value {
                Some(_) => format!("Set {} at {}", field, path),
                None => format!("Clear {} at {}", field, path),
            },
            Mutation::ChangeType { path, schema_type } => {
                format!("Change type of {} to {}", path, schema_type)
            }
            Mutation::ReplaceNode { path, .. } => format!("Replace {}", path),
            Mutation::AddProperty { path, name, .. } => match name {
                Some(name) => format!("Add property '{}' to {}", name, path),
                None => format!("Add property to {}", path),
            },
            Mutation::RemoveProperty { path, name } => {
                format!("Remove property '{}' from {}", name, path)
            }
            Mutation::RenameProperty { from, to, .. } => {
                format!("Rename property '{}' to '{}'", from, to)
            }
            Mutation::SetRequired { name, required, .. } => {
                if *required {
                    format!("Require '{}'", name)
                } else {
                    format!("Make '{}' optional", name)
                }
            }
            Mutation::SetItemType { path, schema_type } => {
                format!("Set item type of {} to {}", path, schema_type)
            }
            Mutation::SortProperty { key, target, .. } => {
                format!("Move '{}' next to '{}'", key, target)
            }
            Mutation::NestProperty { key, to, .. } => format!("Move '{}' into {}", key, to),
        }
    }
}

/// True if a subtree of `height` placed directly under `target` stays within `max_depth`
pub fn fits_depth(target: &SchemaPath, height: usize, max_depth: usize) -> bool {
    target.depth() + 1 + height <= max_depth
}

fn applied_if(changed: bool, path: SchemaPath) -> MutationOutcome {
    if changed {
        MutationOutcome::Applied { path }
    } else {
        MutationOutcome::Unchanged
    }
}

fn node<'a>(root: &'a SchemaNode, path: &SchemaPath) -> Result<&'a SchemaNode, MutationError> {
    root.node_at(path)
        .ok_or_else(|| MutationError::NodeNotFound(path.clone()))
}

fn node_mut<'a>(
    root: &'a mut SchemaNode,
    path: &SchemaPath,
) -> Result<&'a mut SchemaNode, MutationError> {
    root.node_at_mut(path)
        .ok_or_else(|| MutationError::NodeNotFound(path.clone()))
}

fn object<'a>(
    root: &'a SchemaNode,
    path: &SchemaPath,
) -> Result<&'a ObjectConstraints, MutationError> {
    node(root, path)?
        .as_object()
        .ok_or_else(|| MutationError::NotAnObject(path.clone()))
}

fn object_mut<'a>(
    root: &'a mut SchemaNode,
    path: &SchemaPath,
) -> Result<&'a mut ObjectConstraints, MutationError> {
    node_mut(root, path)?
        .as_object_mut()
        .ok_or_else(|| MutationError::NotAnObject(path.clone()))
}

fn require_property(
    object: &ObjectConstraints,
    path: &SchemaPath,
    key: &str,
) -> Result<(), MutationError> {
    if object.properties.contains_key(key) {
        Ok(())
    } else {
        Err(MutationError::PropertyNotFound {
            path: path.clone(),
            key: key.to_string(),
        })
    }
}

fn check_name(name: &str) -> Result<(), MutationError> {
    if name.trim().is_empty() {
        Err(MutationError::EmptyName)
    } else {
        Ok(())
    }
}

fn rename_property(object: &mut ObjectConstraints, from: &str, to: &str) {
    object.properties = object
        .properties
        .drain(..)
        .map(|(key, value)| {
            if key == from {
                (to.to_string(), value)
            } else {
                (key, value)
            }
        })
        .collect();

    for required in object.required.iter_mut() {
        if required == from {
            *required = to.to_string();
        }
    }
}

/// Returns whether the order changed
fn sort_property(
    object: &mut ObjectConstraints,
    parent: &SchemaPath,
    key: &str,
    target: &str,
    position: DropPosition,
) -> Result<bool, MutationError> {
    let not_found = |key: &str| MutationError::PropertyNotFound {
        path: parent.clone(),
        key: key.to_string(),
    };
    let from = object
        .properties
        .get_index_of(key)
        .ok_or_else(|| not_found(key))?;
    let mut to = object
        .properties
        .get_index_of(target)
        .ok_or_else(|| not_found(target))?;

    if from == to {
        return Ok(false);
    }

    // Removing the source shifts everything after it one slot left
    if from < to {
        to -= 1;
    }
    let destination = match position {
        DropPosition::Before => to,
        DropPosition::After => to + 1,
    };

    if destination == from {
        return Ok(false);
    }
    object.properties.move_index(from, destination);
    Ok(true)
}

fn nest_property(
    root: &mut SchemaNode,
    from: &SchemaPath,
    key: &str,
    to: &SchemaPath,
) -> Result<MutationOutcome, MutationError> {
    let snapshot = root.clone();

    let source = object_mut(root, from)?;
    let moved = source
        .properties
        .shift_remove(key)
        .ok_or_else(|| MutationError::PropertyNotFound {
            path: from.clone(),
            key: key.to_string(),
        })?;
    source.required.retain(|required| required != key);

    let inserted_key = match object_mut(root, to) {
        Ok(target) => {
            let inserted_key = target.suffixed_key(key);
            target.properties.insert(inserted_key.clone(), moved);
            inserted_key
        }
        Err(err) => {
            *root = snapshot;
            return Err(err);
        }
    };

    // The whole tree must still pass the shape rules
    let errors: Vec<String> = check_shape(&root.to_value(), &RuleRegistry::new())
        .into_iter()
        .filter(|diagnostic| diagnostic.is_error())
        .map(|diagnostic| diagnostic.to_string())
        .collect();
    if !errors.is_empty() {
        warn!(%from, key, %to, errors = errors.len(), "Nest move failed validation, rolling back");
        *root = snapshot;
        return Err(MutationError::ValidationFailed(errors));
    }

    if inserted_key != key {
        debug!(key, inserted = %inserted_key, "Renamed nested property to avoid a collision");
    }

    Ok(MutationOutcome::Applied {
        path: to.child(inserted_key),
    })
}

/// Write one field; the value is parsed before anything is touched
fn set_field(node: &mut SchemaNode, field: Field, value: Option<&Value>) -> Result<(), MutationError> {
    let value = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    };
    let schema_type = node.schema_type();

    match field {
        Field::Title => {
            node.title = string_value(field, value)?;
            return Ok(());
        }
        Field::Description => {
            node.description = string_value(field, value)?;
            return Ok(());
        }
        Field::Default => {
            node.default = value.cloned();
            return Ok(());
        }
        Field::Enum => {
            match value {
                None => {
                    node.extra.shift_remove("enum");
                }
                Some(values @ Value::Array(_)) => {
                    node.extra.insert("enum".to_string(), values.clone());
                }
                Some(_) => {
                    return Err(MutationError::InvalidFieldValue {
                        field,
                        expected: "an array",
                    })
                }
            }
            return Ok(());
        }
        _ => {}
    }

    match (field, &mut node.kind) {
        (Field::MinLength, NodeKind::String(s)) => s.min_length = count_value(field, value)?,
        (Field::MaxLength, NodeKind::String(s)) => s.max_length = count_value(field, value)?,
        (Field::Pattern, NodeKind::String(s)) => s.pattern = string_value(field, value)?,
        (Field::Format, NodeKind::String(s)) => s.format = string_value(field, value)?,

        (Field::Minimum, NodeKind::Number(n) | NodeKind::Integer(n)) => {
            n.minimum = number_value(field, value)?
        }
        (Field::Maximum, NodeKind::Number(n) | NodeKind::Integer(n)) => {
            n.maximum = number_value(field, value)?
        }
        (Field::ExclusiveMinimum, NodeKind::Number(n) | NodeKind::Integer(n)) => {
            n.exclusive_minimum = number_value(field, value)?
        }
        (Field::ExclusiveMaximum, NodeKind::Number(n) | NodeKind::Integer(n)) => {
            n.exclusive_maximum = number_value(field, value)?
        }
        (Field::MultipleOf, NodeKind::Number(n) | NodeKind::Integer(n)) => {
            n.multiple_of = number_value(field, value)?
        }

        (Field::MinItems, NodeKind::Array(a)) => a.min_items = count_value(field, value)?,
        (Field::MaxItems, NodeKind::Array(a)) => a.max_items = count_value(field, value)?,
        (Field::UniqueItems, NodeKind::Array(a)) => a.unique_items = bool_value(field, value)?,

        (Field::MinProperties, NodeKind::Object(o)) => o.min_properties = count_value(field, value)?,
        (Field::MaxProperties, NodeKind::Object(o)) => o.max_properties = count_value(field, value)?,
        (Field::AdditionalProperties, NodeKind::Object(o)) => {
            o.additional_properties = bool_value(field, value)?
        }

        _ => return Err(MutationError::FieldNotApplicable { field, schema_type }),
    }

    Ok(())
}

fn string_value(field: Field, value: Option<&Value>) -> Result<Option<String>, MutationError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(MutationError::InvalidFieldValue {
            field,
            expected: "a string",
        }),
    }
}

/// Form inputs arrive as strings, so numeric text is accepted too
fn count_value(field: Field, value: Option<&Value>) -> Result<Option<i64>, MutationError> {
    let invalid = MutationError::InvalidFieldValue {
        field,
        expected: "an integer",
    };
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(Some)
            .ok_or(invalid),
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}

fn number_value(field: Field, value: Option<&Value>) -> Result<Option<Number>, MutationError> {
    let invalid = MutationError::InvalidFieldValue {
        field,
        expected: "a number",
    };
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(Value::String(s)) => serde_json::from_str::<Number>(s.trim())
            .map(Some)
            .map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}

fn bool_value(field: Field, value: Option<&Value>) -> Result<Option<bool>, MutationError> {
    match value {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(_) => Err(MutationError::InvalidFieldValue {
            field,
            expected: "a boolean",
        }),
    }
}
