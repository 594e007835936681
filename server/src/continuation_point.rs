//! The process-global, single-slot continuation point used by Browse/BrowseNext. Access is
//! serialized by its own `Mutex`, distinct from the subscription mutex, so a long-running
//! Browse never blocks Publish/CreateSubscription and vice versa.

use std::sync::Mutex;

use opcua_types::prelude::*;

/// The state copied into the slot when a Browse call pages out.
#[derive(Debug, Clone)]
pub struct ContinuationPointState {
    pub identifier: u32,
    pub node_to_browse: BrowseDescription,
    pub resume_index: usize,
    /// The effective page size of the Browse call that created this continuation point, so
    /// BrowseNext repages at the same size; carried alongside the `BrowseDescription` copy and
    /// `resume_index` since BrowseNext has no other request-level page size to fall back on.
    pub page_size: usize,
}

/// A single-entry store for continuation points. `identifier == 0` means free, matching
/// `ContinuationPointHandle::none()`.
pub struct ContinuationPointSlot {
    next_identifier: Mutex<u32>,
    slot: Mutex<Option<ContinuationPointState>>,
}

impl ContinuationPointSlot {
    pub fn new() -> ContinuationPointSlot {
        ContinuationPointSlot {
            next_identifier: Mutex::new(1),
            slot: Mutex::new(None),
        }
    }

    /// Allocates a fresh identifier, skipping 0 on rollover.
    fn allocate_identifier(&self) -> u32 {
        let mut next = self.next_identifier.lock().unwrap();
        let id = *next;
        *next = next.wrapping_add(1);
        if *next == 0 {
            *next = 1;
        }
        id
    }

    /// Occupies the slot with `node_to_browse`/`resume_index`, failing if it is already in use.
    pub fn try_acquire(&self, node_to_browse: BrowseDescription, resume_index: usize, page_size: usize) -> Result<ContinuationPointHandle, StatusCode> {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_some() {
            return Err(StatusCode::BadNoContinuationPoints);
        }
        let identifier = self.allocate_identifier();
        *slot = Some(ContinuationPointState { identifier, node_to_browse, resume_index, page_size });
        Ok(ContinuationPointHandle(identifier))
    }

    /// Looks up the slot by handle. Returns `None` if the slot is free or the identifier
    /// doesn't match what is currently occupying it.
    pub fn peek(&self, handle: ContinuationPointHandle) -> Option<ContinuationPointState> {
        let slot = self.slot.lock().unwrap();
        match &*slot {
            Some(state) if state.identifier == handle.0 => Some(state.clone()),
            _ => None,
        }
    }

    /// Frees the slot unconditionally. Used both by `release_continuation_points` and by a
    /// BrowseNext resume that repages (the old entry is replaced with a fresh one via
    /// `try_acquire`, so the free happens first).
    pub fn release(&self, handle: ContinuationPointHandle) {
        let mut slot = self.slot.lock().unwrap();
        if matches!(&*slot, Some(state) if state.identifier == handle.0) {
            *slot = None;
        }
    }
}

impl Default for ContinuationPointSlot {
    fn default() -> Self {
        ContinuationPointSlot::new()
    }
}
