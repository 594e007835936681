use crate::node_id::NodeId;

/// A typed, directed edge between two nodes.
#[derive(Debug, Clone, Serialize)]
pub struct Reference {
    pub reference_type_id: NodeId,
    pub is_inverse: bool,
    pub target_node_id: NodeId,
}

impl Reference {
    pub fn new(reference_type_id: NodeId, is_inverse: bool, target_node_id: NodeId) -> Reference {
        Reference { reference_type_id, is_inverse, target_node_id }
    }

    /// Convenience constructor for a forward reference, which is by far the common case when
    /// building a test/demo address space.
    pub fn forward(reference_type_id: NodeId, target_node_id: NodeId) -> Reference {
        Reference::new(reference_type_id, false, target_node_id)
    }

    pub fn inverse(reference_type_id: NodeId, target_node_id: NodeId) -> Reference {
        Reference::new(reference_type_id, true, target_node_id)
    }
}

/// Well-known reference type numeric identifiers from the OPC UA base namespace, used to build
/// `NodeId`s for the standard reference-type hierarchy (`References` is the root; everything
/// else is a `HasSubtype` descendant of it, directly or indirectly).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReferenceTypeId {
    References = 31,
    NonHierarchicalReferences = 32,
    HierarchicalReferences = 33,
    HasChild = 34,
    Organizes = 35,
    HasEventSource = 36,
    HasModellingRule = 37,
    HasEncoding = 38,
    HasDescription = 39,
    HasTypeDefinition = 40,
    GeneratesEvent = 41,
    Aggregates = 44,
    HasSubtype = 45,
    HasProperty = 46,
    HasComponent = 47,
    HasNotifier = 48,
    HasOrderedComponent = 49,
}

impl From<ReferenceTypeId> for NodeId {
    fn from(id: ReferenceTypeId) -> NodeId {
        NodeId::new_numeric(0, id as u32)
    }
}
