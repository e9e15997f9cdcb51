// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The capability trait every cache backend implements.
//!
//! [`CacheBackend`] is the full surface the caching patterns need from a
//! storage engine: read, upsert, delete one entry, and flush everything the
//! handle can reach. Eviction policy, persistence, and transport stay inside
//! the backend.

use std::sync::Arc;

use crate::{CacheOptions, Error};

/// Trait for cache backend implementations.
///
/// All four methods are required. Only `len` and `is_empty` have default
/// implementations:
/// - `len`: Returns `None` (not all backends track size)
/// - `is_empty`: Delegates to `len`
///
/// A backend is a shared capability: the caching patterns only ever borrow it,
/// so one instance can serve any number of concurrent invocations. Whatever
/// internal synchronization that requires is the backend's business.
#[cfg_attr(
    any(test, feature = "dynamic-backend"),
    dynosaur::dynosaur(pub(crate) DynCacheBackend = dyn(box) CacheBackend, bridge(none))
)]
pub trait CacheBackend<K, V>: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent. A present value is always
    /// `Some`, whatever its content.
    fn get(&self, key: &K, options: &CacheOptions) -> impl Future<Output = Result<Option<V>, Error>> + Send;

    /// Stores `value` under `key`, overwriting any existing entry.
    ///
    /// Returns the stored value. Backends that transform values on write must
    /// return something observationally equivalent to what a later `get` yields.
    fn set(&self, key: &K, value: V, options: &CacheOptions) -> impl Future<Output = Result<V, Error>> + Send;

    /// Removes the entry stored under `key`.
    ///
    /// Deleting a key that does not exist is not an error.
    fn delete(&self, key: &K, options: &CacheOptions) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes every entry reachable through this handle.
    fn flush(&self, options: &CacheOptions) -> impl Future<Output = Result<(), Error>> + Send;

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the backend holds no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}

impl<K, V, B> CacheBackend<K, V> for Arc<B>
where
    B: CacheBackend<K, V> + ?Sized,
{
    fn get(&self, key: &K, options: &CacheOptions) -> impl Future<Output = Result<Option<V>, Error>> + Send {
        (**self).get(key, options)
    }

    fn set(&self, key: &K, value: V, options: &CacheOptions) -> impl Future<Output = Result<V, Error>> + Send {
        (**self).set(key, value, options)
    }

    fn delete(&self, key: &K, options: &CacheOptions) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).delete(key, options)
    }

    fn flush(&self, options: &CacheOptions) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).flush(options)
    }

    fn len(&self) -> Option<u64> {
        (**self).len()
    }
}

impl<K, V, B> CacheBackend<K, V> for &B
where
    B: CacheBackend<K, V> + ?Sized,
{
    fn get(&self, key: &K, options: &CacheOptions) -> impl Future<Output = Result<Option<V>, Error>> + Send {
        (**self).get(key, options)
    }

    fn set(&self, key: &K, value: V, options: &CacheOptions) -> impl Future<Output = Result<V, Error>> + Send {
        (**self).set(key, value, options)
    }

    fn delete(&self, key: &K, options: &CacheOptions) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).delete(key, options)
    }

    fn flush(&self, options: &CacheOptions) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).flush(options)
    }

    fn len(&self) -> Option<u64> {
        (**self).len()
    }
}
