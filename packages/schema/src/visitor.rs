use crate::node::{NodeKind, SchemaNode};
use crate::path::SchemaPath;

/// Visitor pattern for traversing a schema tree immutably
///
/// The default implementation walks every object property (in display order)
/// and every array item schema. Override `visit_node` to act on nodes and
/// call [`walk_node`] to keep descending.
pub trait Visitor: Sized {
    fn visit_node(&mut self, path: &SchemaPath, node: &SchemaNode) {
        walk_node(self, path, node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, path: &SchemaPath, node: &SchemaNode) {
    match &node.kind {
        NodeKind::Object(object) => {
            for (key, child) in &object.properties {
                visitor.visit_node(&path.child(key.clone()), child);
            }
        }
        NodeKind::Array(array) => {
            if let Some(items) = &array.items {
                visitor.visit_node(&path.items(), items);
            }
        }
        NodeKind::String(_) | NodeKind::Number(_) | NodeKind::Integer(_) | NodeKind::Boolean => {
            // Leaf node, no children to walk
        }
    }
}

/// Visit `root` and everything below it
pub fn walk_tree<V: Visitor>(visitor: &mut V, root: &SchemaNode) {
    visitor.visit_node(&SchemaPath::root(), root);
}

/// Collects the paths of every object node in a tree
#[derive(Debug, Default)]
pub struct ObjectPathCollector {
    pub paths: Vec<SchemaPath>,
}

impl Visitor for ObjectPathCollector {
    fn visit_node(&mut self, path: &SchemaPath, node: &SchemaNode) {
        if node.is_object() {
            self.paths.push(path.clone());
        }
        walk_node(self, path, node);
    }
}
