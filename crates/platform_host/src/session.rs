//! In-memory session storage and the login/session gate boundary.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Session-store key holding the signed-in [`SessionUser`].
pub const SESSION_USER_KEY: &str = "webtop.session.user";

#[derive(Debug, Clone)]
/// In-memory session-scoped key/value JSON store.
pub struct MemorySessionStore {
    inner: Rc<RefCell<HashMap<String, Value>>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl MemorySessionStore {
    /// Reads a raw JSON value by key.
    pub fn get_json(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).cloned()
    }

    /// Removes a value by key.
    pub fn remove(&self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }

    /// Serializes and stores a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` cannot be serialized to JSON.
    pub fn set<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<(), String> {
        let json = serde_json::to_value(value).map_err(|e| e.to_string())?;
        self.inner.borrow_mut().insert(key.into(), json);
        Ok(())
    }

    /// Reads and deserializes a typed value. Entries of the wrong shape read as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_json(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

thread_local! {
    static GLOBAL_SESSION_STORE: MemorySessionStore = MemorySessionStore::default();
}

/// Returns the process-local session store instance.
pub fn session_store() -> MemorySessionStore {
    GLOBAL_SESSION_STORE.with(|store| store.clone())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Identity of the signed-in desktop user.
pub struct SessionUser {
    /// Numeric user id.
    pub uid: u32,
    /// Display name shown in the start menu header.
    pub name: String,
}

#[derive(Debug, Clone, Default)]
/// Login/session gate consulted by the shell. Window state never lives here.
pub struct SessionGate {
    store: MemorySessionStore,
}

impl SessionGate {
    /// Creates a gate over `store`.
    pub fn new(store: MemorySessionStore) -> Self {
        Self { store }
    }

    /// Creates a gate over the process-local [`session_store`].
    pub fn process_local() -> Self {
        Self::new(session_store())
    }

    /// Returns the signed-in user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.store.get(SESSION_USER_KEY)
    }

    /// Records `user` as signed in.
    ///
    /// # Errors
    ///
    /// Returns an error when the user record cannot be serialized.
    pub fn sign_in(&self, user: &SessionUser) -> Result<(), String> {
        self.store.set(SESSION_USER_KEY, user)
    }

    /// Clears the session. Returns `true` when a user was signed in.
    pub fn logout(&self) -> bool {
        let was_signed_in = self.store.get_json(SESSION_USER_KEY).is_some();
        self.store.remove(SESSION_USER_KEY);
        was_signed_in
    }
}
