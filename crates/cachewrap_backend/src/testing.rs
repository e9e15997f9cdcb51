// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recording backend for testing.
//!
//! This module provides `MockBackend`, an in-memory backend that records every
//! call it receives, together with the options passed, and supports failure
//! injection for exercising error paths.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use parking_lot::Mutex;

use crate::{CacheBackend, CacheOptions, Error};

/// Recorded backend call with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOp<K, V> {
    /// A read of the given key.
    Get(K),
    /// An upsert of the given key and value.
    Set {
        /// The key that was written.
        key: K,
        /// The value that was written.
        value: V,
    },
    /// A delete of the given key.
    Delete(K),
    /// A flush of every entry.
    Flush,
}

type FailPredicate<K, V> = Box<dyn Fn(&BackendOp<K, V>) -> bool + Send + Sync>;

/// A configurable mock backend for testing.
///
/// Values live in a plain map. Every call is recorded along with the
/// [`CacheOptions`] it carried, so tests can assert both call order and that
/// options were forwarded untouched.
///
/// # Examples
///
/// ```
/// use cachewrap_backend::{CacheBackend, CacheOptions, testing::{BackendOp, MockBackend}};
///
/// # futures::executor::block_on(async {
/// let backend = MockBackend::<String, i32>::new();
/// let options = CacheOptions::new();
///
/// backend.set(&"key".to_string(), 42, &options).await.unwrap();
/// assert_eq!(backend.get(&"key".to_string(), &options).await.unwrap(), Some(42));
///
/// assert_eq!(backend.operations(), vec![
///     BackendOp::Set { key: "key".to_string(), value: 42 },
///     BackendOp::Get("key".to_string()),
/// ]);
/// # });
/// ```
///
/// # Failure Injection
///
/// ```
/// use cachewrap_backend::{CacheBackend, CacheOptions, testing::{BackendOp, MockBackend}};
///
/// # futures::executor::block_on(async {
/// let backend: MockBackend<String, i32> = MockBackend::new();
/// let options = CacheOptions::new();
///
/// backend.fail_when(|op| matches!(op, BackendOp::Delete(k) if k == "locked"));
/// assert!(backend.delete(&"locked".to_string(), &options).await.is_err());
/// assert!(backend.delete(&"free".to_string(), &options).await.is_ok());
/// # });
/// ```
pub struct MockBackend<K, V> {
    data: Arc<Mutex<HashMap<K, V>>>,
    operations: Arc<Mutex<Vec<BackendOp<K, V>>>>,
    options_seen: Arc<Mutex<Vec<CacheOptions>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<K, V>>>>,
}

impl<K, V> std::fmt::Debug for MockBackend<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Clone for MockBackend<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            options_seen: Arc::clone(&self.options_seen),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<K, V> Default for MockBackend<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MockBackend<K, V> {
    /// Creates a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            options_seen: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }
}

impl<K, V> MockBackend<K, V>
where
    K: Eq + Hash,
{
    /// Creates a mock backend with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<K, V>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            ..Self::new()
        }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the backend holds the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.lock().contains_key(key)
    }
}

impl<K, V> MockBackend<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Returns the stored value without recording an operation.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<V> {
        self.data.lock().get(key).cloned()
    }
}

impl<K, V> MockBackend<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Sets a predicate that determines which operations fail.
    ///
    /// A failing operation is still recorded but leaves the stored data untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachewrap_backend::testing::{BackendOp, MockBackend};
    ///
    /// let backend: MockBackend<String, i32> = MockBackend::new();
    ///
    /// // Fail everything
    /// backend.fail_when(|_| true);
    ///
    /// // Fail only flushes
    /// backend.fail_when(|op| matches!(op, BackendOp::Flush));
    /// ```
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&BackendOp<K, V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<BackendOp<K, V>> {
        self.operations.lock().clone()
    }

    /// Returns the options received by each recorded operation, in call order.
    #[must_use]
    pub fn options_seen(&self) -> Vec<CacheOptions> {
        self.options_seen.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
        self.options_seen.lock().clear();
    }

    fn record(&self, op: BackendOp<K, V>, options: &CacheOptions) -> Result<(), Error> {
        let fail = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        let message = match &op {
            BackendOp::Get(_) => "mock: get failed",
            BackendOp::Set { .. } => "mock: set failed",
            BackendOp::Delete(_) => "mock: delete failed",
            BackendOp::Flush => "mock: flush failed",
        };
        self.operations.lock().push(op);
        self.options_seen.lock().push(options.clone());

        if fail { Err(Error::from_message(message)) } else { Ok(()) }
    }
}

impl<K, V> CacheBackend<K, V> for MockBackend<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K, options: &CacheOptions) -> Result<Option<V>, Error> {
        self.record(BackendOp::Get(key.clone()), options)?;
        Ok(self.data.lock().get(key).cloned())
    }

    async fn set(&self, key: &K, value: V, options: &CacheOptions) -> Result<V, Error> {
        self.record(
            BackendOp::Set {
                key: key.clone(),
                value: value.clone(),
            },
            options,
        )?;
        self.data.lock().insert(key.clone(), value.clone());
        Ok(value)
    }

    async fn delete(&self, key: &K, options: &CacheOptions) -> Result<(), Error> {
        self.record(BackendOp::Delete(key.clone()), options)?;
        self.data.lock().remove(key);
        Ok(())
    }

    async fn flush(&self, options: &CacheOptions) -> Result<(), Error> {
        self.record(BackendOp::Flush, options)?;
        self.data.lock().clear();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.lock().len() as u64)
    }
}
