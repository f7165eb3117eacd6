//! Presence registry
//!
//! The single source of truth for "is this user reachable right now".
//! One identity maps to at most one connection handle; registering again
//! overwrites the previous binding (last write wins). The whole map sits
//! behind one lock so `snapshot` observes a consistent point in time.

use crate::connection::Connection;
use crate::protocol::UserId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Identity → connection handle mapping
pub struct PresenceRegistry {
    entries: RwLock<HashMap<UserId, Arc<Connection>>>,
}

impl PresenceRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Insert or overwrite the binding for an identity
    ///
    /// Returns the displaced handle when the identity was already bound,
    /// which happens when the same user registers from a new connection.
    pub fn register(&self, identity: UserId, handle: Arc<Connection>) -> Option<Arc<Connection>> {
        let displaced = self.entries.write().insert(identity.clone(), handle);

        if let Some(prev) = &displaced {
            tracing::debug!(
                user_id = %identity,
                displaced_session = %prev.session_id(),
                "Presence entry overwritten (last write wins)"
            );
        }

        displaced
    }

    /// Look up the connection handle for an identity
    pub fn resolve(&self, identity: &UserId) -> Option<Arc<Connection>> {
        self.entries.read().get(identity).cloned()
    }

    /// Remove the binding for an identity; absent identities are a no-op
    pub fn unregister(&self, identity: &UserId) -> bool {
        self.entries.write().remove(identity).is_some()
    }

    /// Remove the binding only if the named session still owns it
    ///
    /// Connection teardown must not evict an entry that a newer
    /// registration from another connection has since taken over.
    pub fn unregister_owned(&self, identity: &UserId, session_id: &str) -> bool {
        let mut entries = self.entries.write();
        match entries.get(identity) {
            Some(handle) if handle.session_id() == session_id => {
                entries.remove(identity);
                true
            }
            _ => false,
        }
    }

    /// All currently registered identities, as one consistent view
    ///
    /// Sorted so broadcast payloads are stable.
    pub fn snapshot(&self) -> Vec<UserId> {
        let mut identities: Vec<UserId> = self.entries.read().keys().cloned().collect();
        identities.sort();
        identities
    }

    /// Check whether an identity is currently registered
    pub fn is_online(&self, identity: &UserId) -> bool {
        self.entries.read().contains_key(identity)
    }

    /// Number of registered identities
    pub fn online_count(&self) -> usize {
        self.entries.read().len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("online", &self.entries.read().len())
            .finish()
    }
}
