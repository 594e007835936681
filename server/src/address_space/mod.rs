//! The address-space index: lookup of nodes by id and by browse-name path, and the subtype
//! test used throughout the Browse engine.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use opcua_types::prelude::*;

mod builder;

pub use self::builder::AddressSpaceBuilder;

/// Class-array precedence used by `lookup_by_node_id`: the same numeric id may legally appear
/// in more than one class array, and the first hit wins.
const CLASS_PRECEDENCE: usize = 6;

/// An in-memory node/reference graph. The graph itself (nodes, references, browse names) is
/// built once via `AddressSpaceBuilder` and never mutated again. Variable *values* are the
/// exception: they live in `values`, behind a per-node `Mutex`, so the Read/Write service (out
/// of scope) can update them concurrently with Browse and the subscription scheduler reading
/// them — the graph's immutability is what lets every other `&self` method here run lock-free.
#[derive(Debug, Default)]
pub struct AddressSpace {
    object_types: Vec<NodeType>,
    objects: Vec<NodeType>,
    reference_types: Vec<NodeType>,
    variables: Vec<NodeType>,
    variable_types: Vec<NodeType>,
    data_types: Vec<NodeType>,
    methods: Vec<NodeType>,
    views: Vec<NodeType>,
    values: HashMap<NodeId, Mutex<DataValue>>,
}

impl AddressSpace {
    pub fn new() -> AddressSpace {
        AddressSpace::default()
    }

    /// The current value of a Variable node, or `None` if `node_id` doesn't name a Variable.
    pub fn read_value(&self, node_id: &NodeId) -> Option<DataValue> {
        self.values.get(node_id).map(|cell| cell.lock().unwrap().clone())
    }

    /// Writes a new value into a Variable node, stamping `server_timestamp`. Stands in for the
    /// Write service; `BadNodeIdUnknown` if `node_id` isn't a known Variable.
    pub fn write_value(&self, node_id: &NodeId, value: Variant, now: DateTime<Utc>) -> Result<(), StatusCode> {
        match self.values.get(node_id) {
            Some(cell) => {
                let mut data_value = cell.lock().unwrap();
                data_value.value = value;
                data_value.server_timestamp = Some(now);
                Ok(())
            }
            None => Err(StatusCode::BadNodeIdUnknown),
        }
    }

    /// Inserts a Variable node and seeds its initial value, keeping the graph and the value
    /// table in sync. Only `AddressSpaceBuilder` calls this, while the graph is still being
    /// assembled.
    pub(crate) fn insert_variable(&mut self, attributes: NodeAttributes, value: DataValue) {
        let node_id = attributes.node_id.clone();
        self.variables.push(NodeType::Variable(attributes));
        self.values.insert(node_id, Mutex::new(value));
    }

    fn class_arrays(&self) -> [&[NodeType]; CLASS_PRECEDENCE] {
        [
            &self.object_types,
            &self.objects,
            &self.reference_types,
            &self.variables,
            &self.variable_types,
            &self.data_types,
        ]
    }

    fn bucket_for(&mut self, class: NodeClass) -> &mut Vec<NodeType> {
        match class {
            NodeClass::Object => &mut self.objects,
            NodeClass::ObjectType => &mut self.object_types,
            NodeClass::Variable => &mut self.variables,
            NodeClass::VariableType => &mut self.variable_types,
            NodeClass::ReferenceType => &mut self.reference_types,
            NodeClass::DataType => &mut self.data_types,
            NodeClass::Method => &mut self.methods,
            NodeClass::View => &mut self.views,
        }
    }

    /// Linear search over the concatenation of per-class node arrays, in class-array
    /// precedence order (ObjectType, Object, ReferenceType, Variable, VariableType, DataType).
    /// Method and View nodes are outside this precedence list but are still searched, after
    /// it, so every node remains reachable by id.
    pub fn lookup_by_node_id(&self, id: &NodeId) -> Option<&NodeType> {
        for array in &self.class_arrays() {
            if let Some(node) = array.iter().find(|n| n.node_id() == id) {
                return Some(node);
            }
        }
        self.methods.iter().chain(self.views.iter()).find(|n| n.node_id() == id)
    }

    pub fn lookup_by_node_id_mut(&mut self, id: &NodeId) -> Option<&mut NodeType> {
        let id = id.clone();
        for array in [
            &mut self.object_types,
            &mut self.objects,
            &mut self.reference_types,
            &mut self.variables,
            &mut self.variable_types,
            &mut self.data_types,
            &mut self.methods,
            &mut self.views,
        ] {
            if let Some(node) = array.iter_mut().find(|n| *n.node_id() == id) {
                return Some(node);
            }
        }
        None
    }

    fn all_nodes(&self) -> impl Iterator<Item = &NodeType> {
        self.object_types.iter()
            .chain(self.objects.iter())
            .chain(self.reference_types.iter())
            .chain(self.variables.iter())
            .chain(self.variable_types.iter())
            .chain(self.data_types.iter())
            .chain(self.methods.iter())
            .chain(self.views.iter())
    }

    /// Root-level nodes, searched by `lookup_child_by_browse_name` when `parent` is `None`:
    /// every node that is not the target of any other node's outgoing reference.
    fn root_nodes(&self) -> impl Iterator<Item = &NodeType> {
        let targets: std::collections::HashSet<NodeId> = self.all_nodes()
            .flat_map(|n| n.references().iter().map(|r| r.target_node_id.clone()))
            .collect();
        self.all_nodes().filter(move |n| !targets.contains(n.node_id()))
    }

    /// If `parent` is `None`, searches root-level nodes; otherwise enumerates `parent`'s
    /// outgoing references and returns the first target whose browse-name matches literally.
    pub fn lookup_child_by_browse_name(&self, parent: Option<&NodeId>, name: &QualifiedName) -> Option<&NodeType> {
        match parent {
            None => self.root_nodes().find(|n| n.browse_name() == name),
            Some(parent_id) => {
                let parent = self.lookup_by_node_id(parent_id)?;
                parent.references().iter()
                    .filter(|r| !r.is_inverse)
                    .find_map(|r| {
                        let target = self.lookup_by_node_id(&r.target_node_id)?;
                        if target.browse_name() == name { Some(target) } else { None }
                    })
            }
        }
    }

    /// True if `candidate == ancestor`, or (when `include_subtypes`) if `ancestor` is
    /// reachable from `candidate` transitively through outgoing references. A numeric-0
    /// `ancestor` means "any" and returns true unconditionally. The traversal carries a
    /// visited set so a cyclic reference graph cannot loop forever.
    pub fn is_subtype(&self, candidate: &NodeId, ancestor: &NodeId, include_subtypes: bool) -> bool {
        if ancestor.is_numeric_zero() {
            return true;
        }
        if candidate == ancestor {
            return true;
        }
        if !include_subtypes {
            return false;
        }
        let mut visited = std::collections::HashSet::new();
        self.is_subtype_transitive(candidate, ancestor, &mut visited)
    }

    fn is_subtype_transitive(&self, candidate: &NodeId, ancestor: &NodeId, visited: &mut std::collections::HashSet<NodeId>) -> bool {
        if !visited.insert(candidate.clone()) {
            return false;
        }
        let Some(node) = self.lookup_by_node_id(candidate) else {
            return false;
        };
        for r in node.references() {
            if r.target_node_id == *ancestor {
                return true;
            }
            if self.is_subtype_transitive(&r.target_node_id, ancestor, visited) {
                return true;
            }
        }
        false
    }
}
