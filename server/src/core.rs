//! `ServerCore` ties the four components together behind one value, rather than true globals.
//! It owns the subscription mutex, the continuation-point mutex (distinct, never nested with
//! the first) and the publish timer thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};

use opcua_types::prelude::*;

use crate::address_space::AddressSpace;
use crate::browse::BrowseEngine;
use crate::config::ServerConfig;
use crate::continuation_point::ContinuationPointSlot;
use crate::diagnostics::ServerDiagnostics;
use crate::publish::{acknowledge, complete_publish, PublishQueueItem};
use crate::session::{SessionData, SessionStore};
use crate::subscriptions::{SubscriptionRegistry, TickOutcome};
use crate::translate::TranslateEngine;

struct ServerState {
    registry: SubscriptionRegistry,
    queue: Vec<PublishQueueItem>,
    diagnostics: ServerDiagnostics,
}

struct Timer {
    running: Arc<AtomicBool>,
    join_handle: Option<thread::JoinHandle<()>>,
}

pub struct ServerCore {
    address_space: AddressSpace,
    continuation_points: ContinuationPointSlot,
    config: ServerConfig,
    sessions: SessionStore,
    state: Mutex<ServerState>,
    timer: Mutex<Timer>,
}

impl ServerCore {
    pub fn new(address_space: AddressSpace, config: ServerConfig) -> Arc<ServerCore> {
        Arc::new(ServerCore {
            address_space,
            continuation_points: ContinuationPointSlot::new(),
            config,
            sessions: SessionStore::new(),
            state: Mutex::new(ServerState {
                registry: SubscriptionRegistry::new(),
                queue: Vec::new(),
                diagnostics: ServerDiagnostics::new(),
            }),
            timer: Mutex::new(Timer { running: Arc::new(AtomicBool::new(false)), join_handle: None }),
        })
    }

    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn diagnostics(&self) -> ServerDiagnostics {
        self.state.lock().unwrap().diagnostics
    }

    // -- Browse / TranslateBrowsePathsToNodeIds: no subscription mutex involved --

    pub fn browse(&self, authentication_token: &NodeId, nodes_to_browse: &[BrowseDescription], requested_max_references_per_node: u32) -> Result<Vec<BrowseResult>, StatusCode> {
        let Some(session) = self.sessions.session_find(authentication_token) else {
            self.state.lock().unwrap().diagnostics.on_rejected_request();
            return Err(StatusCode::BadSecurityChecksFailed);
        };
        if !session.session_flag() {
            self.state.lock().unwrap().diagnostics.on_rejected_request();
            return Err(StatusCode::BadSessionNotActivated);
        }
        BrowseEngine::new(&self.address_space, &self.continuation_points, self.config.max_no_of_returned_references)
            .browse(nodes_to_browse, requested_max_references_per_node)
    }

    pub fn browse_next(&self, continuation_points: &[ContinuationPointHandle], release_continuation_points: bool) -> Vec<BrowseResult> {
        BrowseEngine::new(&self.address_space, &self.continuation_points, self.config.max_no_of_returned_references)
            .browse_next(continuation_points, release_continuation_points)
    }

    pub fn translate_browse_paths_to_node_ids(&self, browse_paths: &[BrowsePath]) -> Result<Vec<BrowsePathResult>, StatusCode> {
        TranslateEngine::new(&self.address_space).translate(browse_paths)
    }

    // -- Sessions --

    pub fn create_session(&self, authentication_token: NodeId) -> NodeId {
        let id = self.sessions.create_session(authentication_token);
        self.state.lock().unwrap().diagnostics.on_create_session();
        id
    }

    /// Tears a session down: destroys its subscriptions, completes its queued publish items
    /// with an error, and forgets the session itself.
    pub fn destroy_session(&self, authentication_token: &NodeId) {
        let Some(session_id) = self.sessions.remove(authentication_token) else { return };
        let stop_timer = {
            let mut state = self.state.lock().unwrap();
            let ids = state.registry.delete_all_subscriptions_for(&session_id);
            info!("destroying session {}, removing {} subscriptions", session_id, ids.len());
            for _ in &ids {
                state.diagnostics.on_destroy_subscription();
            }
            let (mine, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut state.queue).into_iter()
                .partition(|item| self.sessions.session_find(&item.request.authentication_token).map(|s| s.session_id()) == Some(session_id.clone()));
            state.queue = rest;
            for item in mine {
                complete_publish(item, None, Utc::now());
            }
            state.diagnostics.on_destroy_session();
            state.registry.is_empty()
        };
        if stop_timer {
            self.stop_timer();
        }
    }

    // -- Subscription Registry --

    pub fn create_subscription(self: &Arc<Self>, session_id: NodeId, publishing_enabled: bool) -> u32 {
        let id = {
            let mut state = self.state.lock().unwrap();
            let id = state.registry.create_subscription(session_id, publishing_enabled, self.config.lifetime_count);
            state.diagnostics.on_create_subscription();
            id
        };
        self.ensure_timer_running();
        id
    }

    pub fn delete_subscription(&self, id: u32) -> Result<(), StatusCode> {
        let stop_timer = {
            let mut state = self.state.lock().unwrap();
            state.registry.delete_subscription(id)?;
            state.diagnostics.on_destroy_subscription();
            state.registry.is_empty()
        };
        if stop_timer {
            self.stop_timer();
        }
        Ok(())
    }

    pub fn set_publishing_mode(&self, subscription_ids: &[u32], enabled: bool) -> Vec<StatusCode> {
        self.state.lock().unwrap().registry.set_publishing_mode(subscription_ids, enabled)
    }

    pub fn create_monitored_item(&self, subscription_id: u32, request: &MonitoredItemCreateRequest) -> MonitoredItemCreateResult {
        let mut state = self.state.lock().unwrap();
        match state.registry.find_subscription_mut(subscription_id) {
            Some(sub) => sub.create_monitored_item(&self.address_space, request),
            None => MonitoredItemCreateResult::error(StatusCode::BadSubscriptionIdInvalid),
        }
    }

    pub fn delete_monitored_item(&self, subscription_id: u32, monitored_item_id: u32) -> StatusCode {
        let mut state = self.state.lock().unwrap();
        match state.registry.find_subscription_mut(subscription_id) {
            Some(sub) => sub.delete_monitored_item(monitored_item_id),
            None => StatusCode::BadSubscriptionIdInvalid,
        }
    }

    pub fn subscription_exists(&self, id: u32) -> bool {
        self.state.lock().unwrap().registry.find_subscription(id).is_some()
    }

    // -- Publish Scheduler --

    pub fn begin_publish(&self, request: PublishRequest, responder: impl FnOnce(PublishResponse) + Send + 'static) -> Result<(), StatusCode> {
        let Some(session) = self.sessions.session_find(&request.authentication_token) else {
            self.state.lock().unwrap().diagnostics.on_rejected_request();
            return Err(StatusCode::BadSecurityChecksFailed);
        };
        if !session.session_flag() {
            self.state.lock().unwrap().diagnostics.on_rejected_request();
            return Err(StatusCode::BadSessionNotActivated);
        }

        let mut state = self.state.lock().unwrap();
        let ack_results = request.subscription_acknowledgements.iter()
            .map(|ack| acknowledge(state.registry.find_subscription_mut(ack.subscription_id), ack))
            .collect();
        let item = PublishQueueItem::new(request, ack_results, responder);

        let now = Utc::now();
        let session_id = session.session_id();
        let address_space = &self.address_space;
        let max_keep_alive_count = self.config.max_keep_alive_count;
        let ready = state.registry.find_first_for_session(&session_id, |sub| {
            matches!(sub.on_tick(false, address_space, now, max_keep_alive_count), TickOutcome::Notify)
        });

        match ready {
            Some(subscription_id) => {
                debug!("begin_publish: completing immediately against subscription {}", subscription_id);
                let sub = state.registry.find_subscription_mut(subscription_id);
                complete_publish(item, sub, now);
            }
            None => {
                if let Some(subscription_id) = state.registry.find_first_for_session(&session_id, |_| true) {
                    if let Some(sub) = state.registry.find_subscription_mut(subscription_id) {
                        sub.late_publish_request = true;
                    }
                }
                state.queue.push(item);
            }
        }
        Ok(())
    }

    /// Always answers `BadMessageNotAvailable`; no retransmission history is kept (Non-goal).
    pub fn begin_republish(&self) -> StatusCode {
        StatusCode::BadMessageNotAvailable
    }

    /// One pass of the publish timer. Called by the background timer thread; exposed so tests
    /// can drive ticks deterministically without sleeping.
    pub fn tick(&self, now: chrono::DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        let ids: Vec<u32> = state.registry.iter_in_order().map(|s| s.id).collect();
        let mut expired = Vec::new();
        for id in ids {
            let outcome = {
                let Some(sub) = state.registry.find_subscription_mut(id) else { continue };
                sub.on_tick(true, &self.address_space, now, self.config.max_keep_alive_count)
            };
            match outcome {
                TickOutcome::Expired => expired.push(id),
                TickOutcome::Notify => {
                    let session_id = state.registry.find_subscription(id).map(|s| s.session_id.clone());
                    if let Some(session_id) = session_id {
                        if let Some(sub) = state.registry.find_subscription_mut(id) {
                            sub.lifetime_counter = self.config.lifetime_count;
                        }
                        if let Some(pos) = state.queue.iter().position(|item| {
                            self.sessions.session_find(&item.request.authentication_token).map(|s| s.session_id()) == Some(session_id.clone())
                        }) {
                            let item = state.queue.remove(pos);
                            let sub = state.registry.find_subscription_mut(id);
                            complete_publish(item, sub, now);
                        } else if let Some(sub) = state.registry.find_subscription_mut(id) {
                            sub.late_publish_request = true;
                        }
                    }
                }
                TickOutcome::Idle => {}
            }
        }
        for id in expired {
            info!("subscription {} expired", id);
            let _ = state.registry.delete_subscription(id);
            state.diagnostics.on_destroy_subscription();
        }
        let stop_timer = state.registry.is_empty();
        drop(state);
        if stop_timer {
            self.stop_timer();
        }
    }

    fn ensure_timer_running(self: &Arc<Self>) {
        let mut timer = self.timer.lock().unwrap();
        if timer.join_handle.is_some() {
            return;
        }
        let running = Arc::new(AtomicBool::new(true));
        let running_for_thread = Arc::clone(&running);
        let core = Arc::clone(self);
        let interval = Duration::from_millis(self.config.publishing_interval_ms);
        info!("starting publish timer, interval {}ms", self.config.publishing_interval_ms);
        let join_handle = thread::spawn(move || {
            while running_for_thread.load(Ordering::SeqCst) {
                thread::sleep(interval);
                if !running_for_thread.load(Ordering::SeqCst) {
                    break;
                }
                core.tick(Utc::now());
            }
        });
        timer.running = running;
        timer.join_handle = Some(join_handle);
    }

    fn stop_timer(&self) {
        let mut timer = self.timer.lock().unwrap();
        if let Some(join_handle) = timer.join_handle.take() {
            info!("stopping publish timer");
            timer.running.store(false, Ordering::SeqCst);
            let _ = join_handle.join();
        }
    }
}
