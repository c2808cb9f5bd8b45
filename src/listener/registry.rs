//! Registry of currently bound sessions.
//!
//! Shared by every connection handler (insert on bind, remove on unbind
//! and on handler exit), the web UI (enumeration) and the MO sender
//! (lookup by system_id).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::connection::{Connection, ConnectionId};

/// A bound SMPP session.
#[derive(Debug, Clone)]
pub struct Session {
    /// system_id announced in the bind request; accepted verbatim and may
    /// be empty. Multiple sessions may share one.
    pub system_id: String,
    /// Write handle of the owning connection.
    pub conn: Arc<Connection>,
    /// Bound as receiver or transceiver, so deliver_sm may be pushed here.
    pub receive_mo: bool,
}

/// Process-wide map of session id to bound session.
///
/// An entry exists exactly while the session is bound.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<ConnectionId, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn insert(&self, id: ConnectionId, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, Arc::new(session));
        debug!(session_id = %id, "session registered");
    }

    pub async fn remove(&self, id: ConnectionId) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(&id).is_some() {
            debug!(session_id = %id, "session unregistered");
        }
    }

    /// system_ids of every bound session. Order unspecified; duplicates
    /// appear when several connections bound with the same system_id.
    pub async fn bound_system_ids(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        sessions.values().map(|s| s.system_id.clone()).collect()
    }

    /// First session bound with the given system_id, if any.
    pub async fn find_by_system_id(&self, system_id: &str) -> Option<Arc<Session>> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .find(|s| s.system_id == system_id)
            .cloned()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

/// Shared session registry type.
pub type SharedSessionRegistry = Arc<SessionRegistry>;
