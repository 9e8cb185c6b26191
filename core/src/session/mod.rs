//! Session collaborator contract and per-request user context.
//!
//! The filter panel is request-scoped mutable state owned by the session,
//! not by any one operation. The surrounding web framework serializes
//! per-session access, so the store contract is synchronous and does no
//! locking of its own.

use flexdash_types::LocationNode;
use std::collections::HashMap;
use std::sync::Mutex;

/// The fixed set of logical session keys the core reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    FilterPanel,
    QueryLogging,
}

impl SessionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FilterPanel => "flexdash.filter_panel",
            Self::QueryLogging => "flexdash.query_logging",
        }
    }
}

/// Session storage seam. Values are opaque JSON so the store never needs to
/// know the panel's shape.
pub trait SessionStore: Send + Sync {
    fn retrieve(&self, key: SessionKey) -> Option<serde_json::Value>;
    fn store(&self, value: serde_json::Value, key: SessionKey);
    fn delete(&self, key: SessionKey);
}

/// Read-only user context resolved once per request, upstream of the core.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: i64,
    /// The location scope this user is authorized to see; becomes the
    /// panel's root nodes on first build.
    pub customer_info_list: Vec<LocationNode>,
    pub is_adaptive: bool,
    pub is_demo: bool,
}

/// In-memory store backed by a mutex-guarded map. Reference implementation
/// for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<&'static str, serde_json::Value>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn retrieve(&self, key: SessionKey) -> Option<serde_json::Value> {
        self.values
            .lock()
            .ok()
            .and_then(|map| map.get(key.as_str()).cloned())
    }

    fn store(&self, value: serde_json::Value, key: SessionKey) {
        if let Ok(mut map) = self.values.lock() {
            map.insert(key.as_str(), value);
        }
    }

    fn delete(&self, key: SessionKey) {
        if let Ok(mut map) = self.values.lock() {
            map.remove(key.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trips_by_key() {
        let store = MemorySessionStore::new();
        store.store(serde_json::json!({"a": 1}), SessionKey::FilterPanel);

        assert!(store.retrieve(SessionKey::QueryLogging).is_none());
        assert_eq!(
            store.retrieve(SessionKey::FilterPanel),
            Some(serde_json::json!({"a": 1}))
        );

        store.delete(SessionKey::FilterPanel);
        assert!(store.retrieve(SessionKey::FilterPanel).is_none());
    }
}
