//! Session registry for the HTTP transport.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::mcp::YesDevServer;

/// One client session.
#[derive(Debug)]
pub struct Session {
    id: String,
    server: YesDevServer,
    initialized: AtomicBool,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn server(&self) -> &YesDevServer {
        &self.server
    }

    /// True once the client sent `notifications/initialized`.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub(crate) fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }
}

/// Concurrent map from session id to session.
///
/// Every operation takes the lock once and never awaits while holding it,
/// so a session is fully registered before its id is observable.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id and register a session for `server`.
    pub fn create(&self, server: YesDevServer) -> Arc<Session> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        let session = Arc::new(Session {
            id: id.clone(),
            server,
            initialized: AtomicBool::new(false),
        });
        sessions.insert(id, Arc::clone(&session));
        tracing::info!(session = %session.id, active = sessions.len(), "MCP session created");
        session
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Remove a session, returning it if it existed.
    pub fn remove(&self, id: &str) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let removed = sessions.remove(id);
        if let Some(session) = &removed {
            tracing::info!(
                session = id,
                initialized = session.is_initialized(),
                active = sessions.len(),
                "MCP session closed"
            );
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
