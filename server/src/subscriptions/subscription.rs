//! The subscription state machine. Monitored items are kept in an insertion-order container:
//! an ordered id vec paired with a `HashMap` for O(1) lookup.

use std::collections::HashMap;
use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use log::{debug, trace};

use opcua_types::prelude::*;

use crate::address_space::AddressSpace;
use crate::fill_data_value::fill_data_value;
use crate::subscriptions::monitored_item::MonitoredItem;

/// What a scheduler pass should do after consulting a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A notification or keepalive should be sent; `lifetime_counter` has already been left at
    /// whatever post-decrement value it had — the caller resets it to `lifetime_count` on this
    /// outcome.
    Notify,
    /// `lifetime_counter` reached zero; the subscription must be destroyed.
    Expired,
    Idle,
}

#[derive(Debug)]
pub struct Subscription {
    pub id: u32,
    pub session_id: NodeId,
    pub seq_num: u32,
    pub last_ack_seq: u32,
    pub publishing_enabled: bool,
    pub lifetime_counter: u32,
    pub notifications_available: u32,
    pub late_publish_request: bool,
    monitored_item_order: Vec<u32>,
    monitored_items: HashMap<u32, MonitoredItem>,
    next_monitored_item_id: u32,
}

impl Subscription {
    pub fn new(id: u32, session_id: NodeId, publishing_enabled: bool, lifetime_count: u32) -> Subscription {
        debug!("creating subscription {} for session {}", id, session_id);
        Subscription {
            id,
            session_id,
            seq_num: 0,
            last_ack_seq: 0,
            publishing_enabled,
            lifetime_counter: lifetime_count,
            notifications_available: 0,
            late_publish_request: false,
            monitored_item_order: Vec::new(),
            monitored_items: HashMap::new(),
            next_monitored_item_id: 1,
        }
    }

    /// Rejects any `attribute_id` other than `Value`/`EventNotifier` and any unknown node;
    /// both checks happen before an id is allocated so a failed create never burns a
    /// monitored-item id.
    pub fn create_monitored_item(&mut self, address_space: &AddressSpace, request: &MonitoredItemCreateRequest) -> MonitoredItemCreateResult {
        let attribute_id = match AttributeId::try_from(request.attribute_id) {
            Ok(attribute_id) => attribute_id,
            Err(status_code) => return MonitoredItemCreateResult::error(status_code),
        };
        if address_space.lookup_by_node_id(&request.node_id).is_none() {
            return MonitoredItemCreateResult::error(StatusCode::BadNodeIdUnknown);
        }
        let id = self.next_monitored_item_id;
        self.next_monitored_item_id += 1;
        let item = MonitoredItem::new(id, attribute_id, request);
        self.monitored_item_order.push(id);
        self.monitored_items.insert(id, item);
        MonitoredItemCreateResult { status_code: StatusCode::Good, monitored_item_id: id }
    }

    pub fn delete_monitored_item(&mut self, id: u32) -> StatusCode {
        if self.monitored_items.remove(&id).is_some() {
            self.monitored_item_order.retain(|&item_id| item_id != id);
            StatusCode::Good
        } else {
            StatusCode::BadMonitoredItemIdInvalid
        }
    }

    pub fn find_monitored_item(&self, id: u32) -> Option<&MonitoredItem> {
        self.monitored_items.get(&id)
    }

    pub fn set_publishing_mode(&mut self, enabled: bool) {
        self.publishing_enabled = enabled;
    }

    /// Consults and advances subscription state for one scheduler pass. Lifetime bookkeeping
    /// runs unconditionally on a real tick so a disabled subscription still expires on
    /// schedule; the notify/keepalive decision below is gated on `publishing_enabled`.
    pub fn on_tick(&mut self, tick: bool, address_space: &AddressSpace, now: DateTime<Utc>, max_keep_alive_count: u32) -> TickOutcome {
        if tick {
            self.lifetime_counter = self.lifetime_counter.saturating_sub(1);
            if self.lifetime_counter == 0 {
                return TickOutcome::Expired;
            }
        }

        if !self.publishing_enabled {
            return TickOutcome::Idle;
        }

        self.recompute_notifications_available(address_space, now);
        if self.notifications_available > 0 {
            return TickOutcome::Notify;
        }
        if self.seq_num == 0 {
            return TickOutcome::Notify;
        }
        if max_keep_alive_count > 0 && self.lifetime_counter % max_keep_alive_count == 0 {
            return TickOutcome::Notify;
        }
        TickOutcome::Idle
    }

    fn recompute_notifications_available(&mut self, address_space: &AddressSpace, now: DateTime<Utc>) {
        self.notifications_available = 0;
        for id in &self.monitored_item_order {
            let item = self.monitored_items.get_mut(id).expect("monitored_item_order and monitored_items stay in sync");
            if item.attribute_id != AttributeId::Value {
                continue;
            }
            let Some(current) = fill_data_value(address_space, &item.node_id, now) else {
                continue;
            };
            if current.value.is_empty() {
                item.dirty = false;
                continue;
            }
            let was_dirty = item.dirty;
            item.dirty = true;
            if was_dirty || is_value_different(&item.last_value, &current) {
                self.notifications_available += 1;
            }
            copy_data_value(&mut item.last_value, &current);
        }
    }

    /// Builds the `DataChangeNotification` for every dirty `Value` item, clearing `dirty` and
    /// resetting `notifications_available`.
    pub fn drain_data_change_notification(&mut self) -> Option<DataChangeNotification> {
        if self.notifications_available == 0 {
            return None;
        }
        let mut monitored_items = Vec::new();
        for id in &self.monitored_item_order {
            let item = self.monitored_items.get_mut(id).expect("monitored_item_order and monitored_items stay in sync");
            if item.dirty {
                monitored_items.push(MonitoredItemNotification { client_handle: item.client_handle, value: item.last_value.clone() });
                item.dirty = false;
            }
        }
        self.notifications_available = 0;
        trace!("subscription {} draining {} notifications", self.id, monitored_items.len());
        Some(DataChangeNotification { monitored_items })
    }
}
