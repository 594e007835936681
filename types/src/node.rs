use crate::node_id::NodeId;
use crate::qualified_name::{LocalizedText, QualifiedName};
use crate::reference::Reference;

/// The NodeClass mask bits. Re-used both as the per-node class tag and,
/// OR'd together, as a `BrowseDescription::node_class_mask` filter value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NodeClass {
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

impl NodeClass {
    pub fn bit(self) -> u32 {
        self as u32
    }
}

/// Fields common to every node class.
#[derive(Debug, Clone, Serialize)]
pub struct NodeAttributes {
    pub node_id: NodeId,
    pub browse_name: QualifiedName,
    pub display_name: LocalizedText,
    pub references: Vec<Reference>,
}

impl NodeAttributes {
    pub fn new(node_id: NodeId, browse_name: impl Into<QualifiedName>, display_name: impl Into<LocalizedText>) -> NodeAttributes {
        NodeAttributes {
            node_id,
            browse_name: browse_name.into(),
            display_name: display_name.into(),
            references: Vec::new(),
        }
    }
}

/// One node in the address-space graph. Modeled as a sum type over the eight OPC UA node
/// classes. A Variable node's current value is not carried here: it lives in `AddressSpace`'s
/// own value table, behind interior mutability, since the node/reference graph is fixed at
/// build time but variable values are not (the Read/Write service writes them, out of scope;
/// the subscription scheduler only reads them).
#[derive(Debug, Clone, Serialize)]
pub enum NodeType {
    Object(NodeAttributes),
    ObjectType(NodeAttributes),
    Variable(NodeAttributes),
    VariableType(NodeAttributes),
    ReferenceType(NodeAttributes),
    DataType(NodeAttributes),
    Method(NodeAttributes),
    View(NodeAttributes),
}

impl NodeType {
    pub fn node_class(&self) -> NodeClass {
        match self {
            NodeType::Object(_) => NodeClass::Object,
            NodeType::ObjectType(_) => NodeClass::ObjectType,
            NodeType::Variable(_) => NodeClass::Variable,
            NodeType::VariableType(_) => NodeClass::VariableType,
            NodeType::ReferenceType(_) => NodeClass::ReferenceType,
            NodeType::DataType(_) => NodeClass::DataType,
            NodeType::Method(_) => NodeClass::Method,
            NodeType::View(_) => NodeClass::View,
        }
    }

    pub fn attributes(&self) -> &NodeAttributes {
        match self {
            NodeType::Object(a) => a,
            NodeType::ObjectType(a) => a,
            NodeType::Variable(a) => a,
            NodeType::VariableType(a) => a,
            NodeType::ReferenceType(a) => a,
            NodeType::DataType(a) => a,
            NodeType::Method(a) => a,
            NodeType::View(a) => a,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut NodeAttributes {
        match self {
            NodeType::Object(a) => a,
            NodeType::ObjectType(a) => a,
            NodeType::Variable(a) => a,
            NodeType::VariableType(a) => a,
            NodeType::ReferenceType(a) => a,
            NodeType::DataType(a) => a,
            NodeType::Method(a) => a,
            NodeType::View(a) => a,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.attributes().node_id
    }

    pub fn browse_name(&self) -> &QualifiedName {
        &self.attributes().browse_name
    }

    pub fn display_name(&self) -> &LocalizedText {
        &self.attributes().display_name
    }

    pub fn references(&self) -> &[Reference] {
        &self.attributes().references
    }

    pub fn references_mut(&mut self) -> &mut Vec<Reference> {
        &mut self.attributes_mut().references
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, NodeType::Variable(_))
    }

    pub fn is_object_or_variable(&self) -> bool {
        matches!(self, NodeType::Object(_) | NodeType::Variable(_))
    }
}
