//! The subscription registry: an insertion-order container of subscriptions, keyed by a
//! monotonic id that skips zero, matching `AddressSpace`'s own class-array style of "ordered
//! ids + map".

use std::collections::HashMap;

use opcua_types::prelude::*;

use crate::subscriptions::subscription::Subscription;

#[derive(Default)]
pub struct SubscriptionRegistry {
    order: Vec<u32>,
    subscriptions: HashMap<u32, Subscription>,
    next_id: u32,
}

impl SubscriptionRegistry {
    pub fn new() -> SubscriptionRegistry {
        SubscriptionRegistry { order: Vec::new(), subscriptions: HashMap::new(), next_id: 1 }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        if self.next_id == 0 {
            self.next_id = 1;
        }
        id
    }

    pub fn create_subscription(&mut self, session_id: NodeId, publishing_enabled: bool, lifetime_count: u32) -> u32 {
        let id = self.allocate_id();
        self.order.push(id);
        self.subscriptions.insert(id, Subscription::new(id, session_id, publishing_enabled, lifetime_count));
        id
    }

    pub fn delete_subscription(&mut self, id: u32) -> Result<(), StatusCode> {
        if self.subscriptions.remove(&id).is_some() {
            self.order.retain(|&sub_id| sub_id != id);
            Ok(())
        } else {
            Err(StatusCode::BadSubscriptionIdInvalid)
        }
    }

    pub fn delete_all_subscriptions_for(&mut self, session_id: &NodeId) -> Vec<u32> {
        let ids: Vec<u32> = self.order.iter().copied()
            .filter(|id| self.subscriptions.get(id).map_or(false, |s| &s.session_id == session_id))
            .collect();
        for id in &ids {
            self.subscriptions.remove(id);
        }
        self.order.retain(|id| !ids.contains(id));
        ids
    }

    pub fn find_subscription(&self, id: u32) -> Option<&Subscription> {
        self.subscriptions.get(&id)
    }

    pub fn find_subscription_mut(&mut self, id: u32) -> Option<&mut Subscription> {
        self.subscriptions.get_mut(&id)
    }

    pub fn set_publishing_mode(&mut self, subscription_ids: &[u32], enabled: bool) -> Vec<StatusCode> {
        subscription_ids.iter().map(|&id| {
            match self.subscriptions.get_mut(&id) {
                Some(sub) => {
                    sub.set_publishing_mode(enabled);
                    StatusCode::Good
                }
                None => StatusCode::BadSubscriptionIdInvalid,
            }
        }).collect()
    }

    /// Subscriptions in insertion order, as the timer tick and `begin_publish` both require.
    pub fn iter_in_order(&self) -> impl Iterator<Item = &Subscription> {
        self.order.iter().filter_map(move |id| self.subscriptions.get(id))
    }

    /// First subscription belonging to `session_id` for which `predicate` holds, in insertion
    /// order: the first one wins.
    pub fn find_first_for_session(&mut self, session_id: &NodeId, mut predicate: impl FnMut(&mut Subscription) -> bool) -> Option<u32> {
        for &id in &self.order {
            if let Some(sub) = self.subscriptions.get_mut(&id) {
                if sub.session_id == *session_id && predicate(sub) {
                    return Some(id);
                }
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}
