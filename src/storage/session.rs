//! Per-session state storage.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::domain::{SessionKey, SessionState};

/// Errors raised by a session store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A writer panicked while holding the store's lock.
    #[error("session store lock was poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// Keyed storage for [`SessionState`].
///
/// Implementations must make each `get` and `set` atomic for a given key.
/// Serialising read-modify-write sequences on the same key is the host's job.
pub trait SessionStore: Send + Sync {
    /// The state stored for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage is unavailable.
    fn get(&self, key: &SessionKey) -> Result<Option<SessionState>, StoreError>;

    /// Stores `state` under `key`, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage is unavailable.
    fn set(&self, key: &SessionKey, state: SessionState) -> Result<(), StoreError>;
}

/// Process-lifetime session storage.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionKey, SessionState>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions that have stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock was poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.read()?.len())
    }

    /// Whether no session has stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock was poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.sessions.read()?.is_empty())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &SessionKey) -> Result<Option<SessionState>, StoreError> {
        Ok(self.sessions.read()?.get(key).cloned())
    }

    fn set(&self, key: &SessionKey, state: SessionState) -> Result<(), StoreError> {
        self.sessions.write()?.insert(key.clone(), state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> SessionKey {
        SessionKey::new(value).unwrap()
    }

    #[test]
    fn unknown_keys_have_no_state() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(&key("alice")), Ok(None));
        assert_eq!(store.is_empty(), Ok(true));
    }

    #[test]
    fn sessions_are_isolated_by_key() {
        let store = InMemorySessionStore::new();
        let flagged = SessionState {
            show_request_form: true,
            ..SessionState::default()
        };

        store.set(&key("alice"), flagged.clone()).unwrap();
        store.set(&key("bob"), SessionState::default()).unwrap();

        assert_eq!(store.get(&key("alice")), Ok(Some(flagged)));
        assert_eq!(store.get(&key("bob")), Ok(Some(SessionState::default())));
        assert_eq!(store.len(), Ok(2));
    }

    #[test]
    fn set_replaces_previous_state() {
        let store = InMemorySessionStore::new();
        let flagged = SessionState {
            show_request_form: true,
            ..SessionState::default()
        };

        store.set(&key("alice"), flagged).unwrap();
        store.set(&key("alice"), SessionState::default()).unwrap();

        assert_eq!(store.get(&key("alice")), Ok(Some(SessionState::default())));
        assert_eq!(store.len(), Ok(1));
    }
}
