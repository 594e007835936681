//! A small builder for constructing test/demo address spaces. The real node arrays are
//! supplied externally in production; this exists so the crate itself, and its own test suite,
//! can stand up a graph without a second implementation.

use opcua_types::prelude::*;

use super::AddressSpace;

pub struct AddressSpaceBuilder {
    address_space: AddressSpace,
}

impl AddressSpaceBuilder {
    pub fn new() -> AddressSpaceBuilder {
        AddressSpaceBuilder { address_space: AddressSpace::new() }
    }

    /// Resumes building on top of an already-built address space, so tests can add more nodes
    /// in a second pass without constructing everything in one chain.
    pub fn from_address_space(address_space: AddressSpace) -> AddressSpaceBuilder {
        AddressSpaceBuilder { address_space }
    }

    pub fn add_node(mut self, node: NodeType) -> Self {
        self.address_space.bucket_for(node.node_class()).push(node);
        self
    }

    pub fn add_object(self, node_id: NodeId, browse_name: &str, display_name: &str) -> Self {
        self.add_node(NodeType::Object(NodeAttributes::new(node_id, browse_name, display_name)))
    }

    pub fn add_variable(mut self, node_id: NodeId, browse_name: &str, display_name: &str, value: Variant) -> Self {
        let attributes = NodeAttributes::new(node_id, browse_name, display_name);
        self.address_space.insert_variable(attributes, DataValue { value, ..DataValue::default() });
        self
    }

    pub fn add_reference_type(self, node_id: NodeId, browse_name: &str) -> Self {
        self.add_node(NodeType::ReferenceType(NodeAttributes::new(node_id, browse_name, browse_name)))
    }

    /// Adds `reference_type_id` as a forward reference from `from` to `to`, and its inverse
    /// counterpart from `to` back to `from` — matching how a real address space stores both
    /// directions so that either endpoint's `references()` is walkable.
    pub fn add_reference(mut self, from: &NodeId, reference_type_id: impl Into<NodeId>, to: &NodeId) -> Self {
        let reference_type_id = reference_type_id.into();
        if let Some(node) = self.address_space.lookup_by_node_id_mut(from) {
            node.references_mut().push(Reference::forward(reference_type_id.clone(), to.clone()));
        }
        if let Some(node) = self.address_space.lookup_by_node_id_mut(to) {
            node.references_mut().push(Reference::inverse(reference_type_id, from.clone()));
        }
        self
    }

    pub fn add_type_definition(self, node: &NodeId, type_definition: &NodeId) -> Self {
        self.add_reference(node, ReferenceTypeId::HasTypeDefinition, type_definition)
    }

    pub fn build(self) -> AddressSpace {
        self.address_space
    }
}

impl Default for AddressSpaceBuilder {
    fn default() -> Self {
        AddressSpaceBuilder::new()
    }
}
