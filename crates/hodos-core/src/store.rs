//! Request-scoped and application-scoped key/value stores.
//!
//! Both stores map string keys to [`serde_json::Value`], the framework's
//! loosely-typed sharing mechanism. Callers downcast values themselves.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{HodosError, HodosResult};

/// Request-scoped key/value store.
///
/// Created fresh for each request event and discarded with it. Middleware
/// typically writes here on the way in (an authenticated user, a deadline)
/// and the handler reads on the way out. A locals store must never outlive
/// its request.
#[derive(Debug, Default)]
pub struct Locals {
    entries: HashMap<String, Value>,
}

impl Locals {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value under the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Application-scoped settings store.
///
/// Populated during setup through [`merge`](Self::merge) and shared
/// read-only across all requests once the application starts serving. Keys
/// follow the uppercase convention (`"DATABASE_URL"`, `"FEATURE_FLAGS"`);
/// a key containing any lowercase character is rejected.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use hodos_core::ConfigStore;
///
/// let mut config = ConfigStore::new();
/// config
///     .merge(HashMap::from([("APP_NAME".to_string(), "demo".into())]))
///     .unwrap();
///
/// assert_eq!(config.get("APP_NAME").and_then(|v| v.as_str()), Some("demo"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: HashMap<String, Value>,
}

impl ConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `entries` into the store.
    ///
    /// Every key is validated before anything is applied, so a failed merge
    /// leaves the store exactly as it was. A later merge may overwrite a
    /// key set by an earlier one; writes are expected to stop once the
    /// application begins serving.
    ///
    /// # Errors
    ///
    /// Returns [`HodosError::InvalidConfigKey`] for the first key that is
    /// empty or contains a lowercase character.
    pub fn merge(&mut self, entries: HashMap<String, Value>) -> HodosResult<()> {
        for key in entries.keys() {
            if !is_valid_key(key) {
                return Err(HodosError::invalid_config_key(key.clone()));
            }
        }
        self.entries.extend(entries);
        Ok(())
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(char::is_lowercase)
}
