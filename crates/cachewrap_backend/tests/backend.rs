// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `CacheBackend` default implementations and shared handles.

use cachewrap_backend::{CacheBackend, CacheOptions, DynamicBackendExt, Error};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Minimal implementation that only provides required methods
struct MinimalBackend<K, V> {
    data: Mutex<HashMap<K, V>>,
}

impl<K, V> MinimalBackend<K, V> {
    fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> CacheBackend<K, V> for MinimalBackend<K, V>
where
    K: Clone + Eq + std::hash::Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K, _options: &CacheOptions) -> Result<Option<V>, Error> {
        Ok(self.data.lock().expect("lock poisoned").get(key).cloned())
    }

    async fn set(&self, key: &K, value: V, _options: &CacheOptions) -> Result<V, Error> {
        self.data.lock().expect("lock poisoned").insert(key.clone(), value.clone());
        Ok(value)
    }

    async fn delete(&self, key: &K, _options: &CacheOptions) -> Result<(), Error> {
        self.data.lock().expect("lock poisoned").remove(key);
        Ok(())
    }

    async fn flush(&self, _options: &CacheOptions) -> Result<(), Error> {
        self.data.lock().expect("lock poisoned").clear();
        Ok(())
    }
}

/// Implementation that provides `len()` to test `is_empty()` default behavior
struct CountingBackend<K, V>(MinimalBackend<K, V>);

impl<K, V> CacheBackend<K, V> for CountingBackend<K, V>
where
    K: Clone + Eq + std::hash::Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K, options: &CacheOptions) -> Result<Option<V>, Error> {
        self.0.get(key, options).await
    }

    async fn set(&self, key: &K, value: V, options: &CacheOptions) -> Result<V, Error> {
        self.0.set(key, value, options).await
    }

    async fn delete(&self, key: &K, options: &CacheOptions) -> Result<(), Error> {
        self.0.delete(key, options).await
    }

    async fn flush(&self, options: &CacheOptions) -> Result<(), Error> {
        self.0.flush(options).await
    }

    fn len(&self) -> Option<u64> {
        Some(self.0.data.lock().expect("lock poisoned").len() as u64)
    }
}

#[tokio::test]
async fn get_missing_key_returns_none() {
    let backend = MinimalBackend::<String, i32>::new();
    let result = backend.get(&"key".to_string(), &CacheOptions::new()).await.expect("error on get");
    assert!(result.is_none());
}

#[tokio::test]
async fn set_returns_stored_value() {
    let backend = MinimalBackend::<String, i32>::new();
    let stored = backend
        .set(&"key".to_string(), 42, &CacheOptions::new())
        .await
        .expect("error on set");
    assert_eq!(stored, 42);

    let read = backend.get(&"key".to_string(), &CacheOptions::new()).await.expect("error on get");
    assert_eq!(read, Some(42));
}

#[tokio::test]
async fn present_falsy_value_is_some() {
    let backend = MinimalBackend::<String, bool>::new();
    let _ = backend
        .set(&"flag".to_string(), false, &CacheOptions::new())
        .await
        .expect("error on set");

    let read = backend.get(&"flag".to_string(), &CacheOptions::new()).await.expect("error on get");
    assert_eq!(read, Some(false));
}

#[tokio::test]
async fn delete_missing_key_is_ok() {
    let backend = MinimalBackend::<String, i32>::new();
    backend
        .delete(&"nonexistent".to_string(), &CacheOptions::new())
        .await
        .expect("deleting a missing key must succeed");
}

#[tokio::test]
async fn flush_removes_every_entry() {
    let backend = MinimalBackend::<String, i32>::new();
    let options = CacheOptions::new();
    let _ = backend.set(&"a".to_string(), 1, &options).await.expect("set failed");
    let _ = backend.set(&"b".to_string(), 2, &options).await.expect("set failed");

    backend.flush(&options).await.expect("flush failed");

    assert!(backend.get(&"a".to_string(), &options).await.expect("get failed").is_none());
    assert!(backend.get(&"b".to_string(), &options).await.expect("get failed").is_none());
}

#[tokio::test]
async fn default_len_and_is_empty_return_none() {
    let backend: MinimalBackend<String, i32> = MinimalBackend::new();
    assert!(backend.len().is_none());
    assert!(backend.is_empty().is_none());
}

#[tokio::test]
async fn is_empty_uses_len_when_available() {
    let backend = CountingBackend(MinimalBackend::<String, i32>::new());
    assert_eq!(backend.is_empty(), Some(true));

    let _ = backend.set(&"key".to_string(), 42, &CacheOptions::new()).await.expect("set failed");
    assert_eq!(backend.is_empty(), Some(false));
    assert_eq!(backend.len(), Some(1));
}

#[tokio::test]
async fn arc_handle_shares_state() {
    let backend = Arc::new(CountingBackend(MinimalBackend::<String, i32>::new()));
    let other = Arc::clone(&backend);

    let _ = backend.set(&"key".to_string(), 7, &CacheOptions::new()).await.expect("set failed");

    assert_eq!(other.get(&"key".to_string(), &CacheOptions::new()).await.expect("get failed"), Some(7));
    assert_eq!(CacheBackend::<String, i32>::len(&other), Some(1));
}

#[tokio::test]
async fn dynamic_backend_delegates_and_clones() {
    let dynamic = CountingBackend(MinimalBackend::<String, i32>::new()).into_dynamic();
    let clone = dynamic.clone();

    let _ = dynamic.set(&"key".to_string(), 3, &CacheOptions::new()).await.expect("set failed");
    assert_eq!(clone.get(&"key".to_string(), &CacheOptions::new()).await.expect("get failed"), Some(3));
    assert_eq!(clone.len(), Some(1));

    clone.delete(&"key".to_string(), &CacheOptions::new()).await.expect("delete failed");
    assert!(dynamic.get(&"key".to_string(), &CacheOptions::new()).await.expect("get failed").is_none());
}
