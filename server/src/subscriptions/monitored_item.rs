//! A single monitored item: one sampled attribute of one node, owned by exactly one
//! subscription.

use opcua_types::prelude::*;

#[derive(Debug, Clone)]
pub struct MonitoredItem {
    pub id: u32,
    pub attribute_id: AttributeId,
    pub node_id: NodeId,
    pub client_handle: u32,
    pub dirty: bool,
    pub last_value: DataValue,
    pub timestamps_to_return: TimestampsToReturn,
}

impl MonitoredItem {
    /// `dirty` starts true for a `Value` item so the first scheduler pass emits a baseline
    /// notification even though nothing has changed yet. `attribute_id` has already been
    /// decoded from the request's wire-level attribute id by the caller.
    pub fn new(id: u32, attribute_id: AttributeId, request: &MonitoredItemCreateRequest) -> MonitoredItem {
        MonitoredItem {
            id,
            attribute_id,
            node_id: request.node_id.clone(),
            client_handle: request.client_handle,
            dirty: attribute_id == AttributeId::Value,
            last_value: DataValue::default(),
            timestamps_to_return: request.timestamps_to_return,
        }
    }
}
