//! `fill_data_value` stands in for the Read service collaborator that would otherwise sample a
//! Variable node's current value and stamp it with timestamps. The scheduler only ever asks for
//! server-side timestamps, so this is a thin reader of the address space rather than a pluggable
//! trait.

use chrono::{DateTime, Utc};

use opcua_types::prelude::*;

use crate::address_space::AddressSpace;

/// Reads the current value of `node_id`, stamping only `server_timestamp`. Returns `None` when
/// the node is missing or is not a Variable, matching the scheduler's "skip" rule.
pub fn fill_data_value(address_space: &AddressSpace, node_id: &NodeId, now: DateTime<Utc>) -> Option<DataValue> {
    let current = address_space.read_value(node_id)?;
    Some(DataValue {
        value: current.value,
        status: current.status,
        source_timestamp: None,
        server_timestamp: Some(now),
        source_picoseconds: 0,
        server_picoseconds: 0,
    })
}
