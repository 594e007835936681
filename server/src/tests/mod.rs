//! Shared fixtures for the service test suites below: a small but representative address
//! space (root/objects/types/views folders, a reference-type hierarchy, and a run of sample
//! variables) and a `ServiceTest` that wraps it in a `ServerCore` with one activated session.

use std::sync::Arc;

use crate::prelude::*;


pub fn root_folder_id() -> NodeId {
    NodeId::new_numeric(0, 84)
}

pub fn objects_folder_id() -> NodeId {
    NodeId::new_numeric(0, 85)
}

pub fn types_folder_id() -> NodeId {
    NodeId::new_numeric(0, 86)
}

pub fn views_folder_id() -> NodeId {
    NodeId::new_numeric(0, 87)
}

/// Builds Root/Objects/Types/Views plus the slice of the standard reference-type hierarchy
/// used by subtype tests: References -> HierarchicalReferences -> {Organizes, HasComponent}.
pub fn sample_address_space() -> AddressSpace {
    let references: NodeId = ReferenceTypeId::References.into();
    let hierarchical_references: NodeId = ReferenceTypeId::HierarchicalReferences.into();
    let organizes: NodeId = ReferenceTypeId::Organizes.into();
    let has_component: NodeId = ReferenceTypeId::HasComponent.into();

    AddressSpaceBuilder::new()
        .add_object(root_folder_id(), "Root", "Root")
        .add_object(objects_folder_id(), "Objects", "Objects")
        .add_object(types_folder_id(), "Types", "Types")
        .add_object(views_folder_id(), "Views", "Views")
        .add_reference(&root_folder_id(), ReferenceTypeId::Organizes, &objects_folder_id())
        .add_reference(&root_folder_id(), ReferenceTypeId::Organizes, &types_folder_id())
        .add_reference(&root_folder_id(), ReferenceTypeId::Organizes, &views_folder_id())
        .add_reference_type(references.clone(), "References")
        .add_reference_type(hierarchical_references.clone(), "HierarchicalReferences")
        .add_reference_type(organizes.clone(), "Organizes")
        .add_reference_type(has_component.clone(), "HasComponent")
        .add_reference(&hierarchical_references, ReferenceTypeId::HasSubtype, &references)
        .add_reference(&organizes, ReferenceTypeId::HasSubtype, &hierarchical_references)
        .add_reference(&has_component, ReferenceTypeId::HasSubtype, &hierarchical_references)
        .build()
}

/// Adds `count` variables named `v0`..`v{count-1}` under `parent`, organized in order, and
/// returns their node ids in the same order the Browse engine should return them in.
pub fn add_many_vars(address_space: AddressSpace, parent: &NodeId, count: usize) -> (AddressSpace, Vec<NodeId>) {
    let mut builder = AddressSpaceBuilder::from_address_space(address_space);
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let id = NodeId::new_string(1, format!("v{}", i));
        builder = builder
            .add_variable(id.clone(), &format!("v{}", i), &format!("v{}", i), Variant::Int16(i as i16))
            .add_reference(parent, ReferenceTypeId::Organizes, &id);
        ids.push(id);
    }
    (builder.build(), ids)
}

pub struct ServiceTest {
    pub core: Arc<ServerCore>,
    pub session_token: NodeId,
}

impl ServiceTest {
    pub fn new(address_space: AddressSpace) -> ServiceTest {
        let core = ServerCore::new(address_space, ServerConfig::default());
        let session_token = NodeId::new_numeric(1, 1);
        core.create_session(session_token.clone());
        core.sessions().activate(&session_token);
        ServiceTest { core, session_token }
    }
}
