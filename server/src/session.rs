//! The session/authentication layer is an external collaborator: the core only ever asks it
//! `session_find(token) → SessionData | none` with a `session_flag` and `session_id`.
//! `SessionData` is that interface; `Session` and `SessionStore` are a minimal in-memory
//! implementation of it, enough to drive the core's own tests, with the wire/crypto fields
//! (secure channel, certificates, nonce, negotiated message sizes) a production session would
//! also carry stripped out.

use std::collections::HashMap;
use std::sync::Mutex;

use log::info;

use opcua_types::prelude::*;

/// What the core needs from a session, regardless of how sessions are authenticated or stored.
pub trait SessionData {
    fn session_id(&self) -> NodeId;

    fn authentication_token(&self) -> &NodeId;

    /// True once the session has completed activation. `begin_publish` rejects a session whose
    /// flag is not set.
    fn session_flag(&self) -> bool;
}

#[derive(Clone)]
pub struct Session {
    session_id: NodeId,
    authentication_token: NodeId,
    activated: bool,
}

impl Session {
    pub fn new(session_id: NodeId, authentication_token: NodeId) -> Session {
        Session { session_id, authentication_token, activated: false }
    }

    pub fn activate(&mut self) {
        self.activated = true;
    }
}

impl SessionData for Session {
    fn session_id(&self) -> NodeId {
        self.session_id.clone()
    }

    fn authentication_token(&self) -> &NodeId {
        &self.authentication_token
    }

    fn session_flag(&self) -> bool {
        self.activated
    }
}

/// Looks sessions up by authentication token. Session teardown (`remove`) is responsible for
/// destroying the session's subscriptions and completing its queued publish items elsewhere
/// (`ServerCore::destroy_session`); this store only tracks identity.
pub struct SessionStore {
    sessions: Mutex<HashMap<NodeId, Session>>,
    next_session_id: Mutex<u32>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore { sessions: Mutex::new(HashMap::new()), next_session_id: Mutex::new(1) }
    }

    fn next_id(&self) -> NodeId {
        let mut next = self.next_session_id.lock().unwrap();
        let id = NodeId::new_numeric(1, *next);
        *next += 1;
        id
    }

    /// Creates and registers a session keyed by `authentication_token`, returning its id.
    pub fn create_session(&self, authentication_token: NodeId) -> NodeId {
        let session_id = self.next_id();
        info!("creating session {}", session_id);
        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(authentication_token.clone(), Session::new(session_id.clone(), authentication_token));
        session_id
    }

    pub fn activate(&self, authentication_token: &NodeId) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(authentication_token) {
            session.activate();
        }
    }

    pub fn session_find(&self, authentication_token: &NodeId) -> Option<Session> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(authentication_token).cloned()
    }

    pub fn session_flag(&self, authentication_token: &NodeId) -> Option<bool> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(authentication_token).map(|s| s.activated)
    }

    pub fn remove(&self, authentication_token: &NodeId) -> Option<NodeId> {
        info!("removing session for token {}", authentication_token);
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(authentication_token).map(|s| s.session_id)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new()
    }
}
