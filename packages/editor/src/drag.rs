//! # Drag-and-Drop Controller
//!
//! State machine over a single active property drag.
//!
//! ```text
//! Idle ──start──▶ Dragging ──drop / cancel──▶ Idle
//!                   │  ▲
//!                   └──┘ hover
//! ```
//!
//! Drop targets are computed once when the drag starts, from a snapshot of
//! the tree. Hovering classifies the cursor position inside the target row:
//! the top and bottom quartiles sort, the middle half nests. Leaving the
//! dragging state by any route clears every piece of transient state.

use crate::mutations::fits_depth;
use crate::{Document, DropPosition, Mutation, MutationError, MutationResult};
use schemaform_schema::{walk_tree, ObjectPathCollector, SchemaNode, SchemaPath};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Fraction of the row height at each edge that counts as a sort zone
const SORT_ZONE: f64 = 0.25;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DragError {
    #[error("A drag is already in progress")]
    AlreadyDragging,

    #[error("No drag in progress")]
    NotDragging,

    #[error("Only object properties can be dragged: {0}")]
    NotAProperty(SchemaPath),

    #[error("No drop target")]
    NoTarget,

    #[error("The schema changed while dragging")]
    DocumentChanged,

    #[error("Drop refused: {0}")]
    Refused(#[from] MutationError),
}

/// Vertical extent of a rendered target row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Cursor position as a fraction of the height, clamped to 0..=1
    fn offset(&self, cursor_y: f64) -> f64 {
        if self.height > 0.0 {
            ((cursor_y - self.top) / self.height).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

/// What a drop at the current hover position would do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropIntent {
    Sort(DropPosition),
    Nest,
}

/// Pending-drop indicator for the host to render
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub target: SchemaPath,
    pub intent: DropIntent,
}

/// Transient state of an active drag
#[derive(Debug, Clone)]
pub struct DragState {
    /// Dragged property key
    pub key: String,

    /// Object the property lives in
    pub parent: SchemaPath,

    /// Path of the dragged property
    pub source: SchemaPath,

    /// Deep copy of the dragged node
    pub node: SchemaNode,

    /// Deep copy of the whole tree when the drag started
    pub tree: SchemaNode,

    /// Document version when the drag started
    pub version: u64,

    pub nest_targets: Vec<SchemaPath>,
    pub sort_targets: Vec<SchemaPath>,

    /// Target currently under the cursor
    pub hover: Option<SchemaPath>,

    pub placeholder: Option<Placeholder>,

    /// Why the hovered target cannot take the drop
    refusal: Option<MutationError>,

    max_depth: usize,
}

impl DragState {
    pub fn can_nest_into(&self, path: &SchemaPath) -> bool {
        self.nest_targets.contains(path)
    }

    pub fn can_sort_against(&self, path: &SchemaPath) -> bool {
        self.sort_targets.contains(path)
    }

    pub fn refusal(&self) -> Option<&MutationError> {
        self.refusal.as_ref()
    }

    fn sort_refusal(&self, target: &SchemaPath) -> Option<MutationError> {
        if *target == self.source {
            return None;
        }
        if target.parent().as_ref() != Some(&self.parent) {
            return Some(MutationError::SameParentRequired);
        }
        Some(MutationError::NodeNotFound(target.clone()))
    }

    fn nest_refusal(&self, target: &SchemaPath) -> Option<MutationError> {
        if target.starts_with(&self.source) {
            return Some(MutationError::CycleDetected {
                from: self.source.clone(),
                to: target.clone(),
            });
        }

        let Some(node) = self.tree.node_at(target) else {
            return Some(MutationError::NodeNotFound(target.clone()));
        };
        let Some(object) = node.as_object() else {
            return Some(MutationError::NotAnObject(target.clone()));
        };
        if object.properties.contains_key(&self.key) {
            return Some(MutationError::Collision {
                path: target.clone(),
                key: self.key.clone(),
            });
        }
        if !fits_depth(target, self.node.height(), self.max_depth) {
            return Some(MutationError::DepthLimitExceeded {
                max: self.max_depth,
            });
        }
        None
    }
}

#[derive(Debug, Clone, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(Box<DragState>),
}

/// Drag-and-drop controller for one editor instance
#[derive(Debug, Default)]
pub struct DragController {
    phase: DragPhase,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn state(&self) -> Option<&DragState> {
        match &self.phase {
            DragPhase::Dragging(state) => Some(state),
            DragPhase::Idle => None,
        }
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.state().and_then(|state| state.placeholder.as_ref())
    }

    /// Begin dragging the object property at `path`
    pub fn start(&mut self, document: &Document, path: SchemaPath) -> Result<(), DragError> {
        if self.is_dragging() {
            return Err(DragError::AlreadyDragging);
        }

        let not_a_property = || DragError::NotAProperty(path.clone());
        let (parent, key) = match (path.parent(), path.last_key()) {
            (Some(parent), Some(key)) => (parent, key.to_string()),
            _ => return Err(not_a_property()),
        };

        let tree = document.root().clone();
        let siblings = tree
            .node_at(&parent)
            .and_then(SchemaNode::as_object)
            .ok_or_else(not_a_property)?;
        let node = siblings
            .properties
            .get(&key)
            .cloned()
            .ok_or_else(not_a_property)?;

        let sort_targets: Vec<SchemaPath> = siblings
            .properties
            .keys()
            .filter(|sibling| **sibling != key)
            .map(|sibling| parent.child(sibling.clone()))
            .collect();

        let max_depth = document.options().max_depth;
        let height = node.height();
        let mut collector = ObjectPathCollector::default();
        walk_tree(&mut collector, &tree);
        let nest_targets: Vec<SchemaPath> = collector
            .paths
            .into_iter()
            .filter(|candidate| {
                // Not the property itself and not anything below it
                !candidate.starts_with(&path)
                    && tree
                        .node_at(candidate)
                        .and_then(SchemaNode::as_object)
                        .is_some_and(|object| !object.properties.contains_key(&key))
                    && fits_depth(candidate, height, max_depth)
            })
            .collect();

        debug!(
            source = %path,
            nest_targets = nest_targets.len(),
            sort_targets = sort_targets.len(),
            "Drag started"
        );

        self.phase = DragPhase::Dragging(Box::new(DragState {
            key,
            parent,
            source: path,
            node,
            tree,
            version: document.version(),
            nest_targets,
            sort_targets,
            hover: None,
            placeholder: None,
            refusal: None,
            max_depth,
        }));

        Ok(())
    }

    /// Classify the drop intent for the cursor over `target`
    ///
    /// Returns `None` when a drop here is disallowed.
    pub fn hover(
        &mut self,
        target: &SchemaPath,
        cursor_y: f64,
        bounds: Bounds,
    ) -> Result<Option<DropIntent>, DragError> {
        let DragPhase::Dragging(state) = &mut self.phase else {
            return Err(DragError::NotDragging);
        };

        let offset = bounds.offset(cursor_y);
        let edge = if offset < SORT_ZONE {
            Some(DropPosition::Before)
        } else if offset > 1.0 - SORT_ZONE {
            Some(DropPosition::After)
        } else {
            None
        };

        let (intent, refusal) = match edge {
            Some(position) if state.can_sort_against(target) => {
                (Some(DropIntent::Sort(position)), None)
            }
            Some(_) => (None, state.sort_refusal(target)),
            None if state.can_nest_into(target) => (Some(DropIntent::Nest), None),
            None => (None, state.nest_refusal(target)),
        };

        state.hover = Some(target.clone());
        state.placeholder = intent.map(|intent| Placeholder {
            target: target.clone(),
            intent,
        });
        state.refusal = refusal;

        Ok(intent)
    }

    /// The cursor left every target
    pub fn leave(&mut self) {
        if let DragPhase::Dragging(state) = &mut self.phase {
            state.hover = None;
            state.placeholder = None;
            state.refusal = None;
        }
    }

    /// Abandon the drag; returns whether one was active
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        if was_dragging {
            debug!("Drag cancelled");
        }
        was_dragging
    }

    /// End the drag and build the mutation for the hovered intent
    ///
    /// The controller is idle afterwards whatever the result.
    pub fn drop_mutation(&mut self, document: &Document) -> Result<Mutation, DragError> {
        let state = match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(state) => *state,
            DragPhase::Idle => return Err(DragError::NotDragging),
        };

        if document.version() != state.version {
            return Err(DragError::DocumentChanged);
        }

        let target = state.hover.ok_or(DragError::NoTarget)?;

        match state.placeholder.map(|placeholder| placeholder.intent) {
            Some(DropIntent::Sort(position)) => {
                if target.parent().as_ref() != Some(&state.parent) {
                    return Err(MutationError::SameParentRequired.into());
                }
                let target_key = target
                    .last_key()
                    .ok_or_else(|| DragError::NotAProperty(target.clone()))?;
                Ok(Mutation::SortProperty {
                    parent: state.parent,
                    key: state.key,
                    target: target_key.to_string(),
                    position,
                })
            }
            Some(DropIntent::Nest) => Ok(Mutation::NestProperty {
                from: state.parent,
                key: state.key,
                to: target,
            }),
            None => {
                let err = state.refusal.map(DragError::Refused).unwrap_or(DragError::NoTarget);
                warn!(error = %err, "Drop refused");
                Err(err)
            }
        }
    }

    /// End the drag and apply the hovered intent to `document`
    pub fn drop(&mut self, document: &mut Document) -> Result<MutationResult, DragError> {
        let mutation = self.drop_mutation(document)?;
        document.apply(&mutation).map_err(|err| {
            warn!(error = %err, "Drop refused");
            DragError::Refused(err)
        })
    }
}
