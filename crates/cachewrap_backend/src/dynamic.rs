// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Type-erased backend handle.

use std::{fmt::Debug, sync::Arc};

use crate::{CacheBackend, CacheOptions, Error, backend::DynCacheBackend};

/// Extension trait for converting any `CacheBackend` into a `DynamicBackend`.
///
/// This trait is automatically implemented for all types that implement `CacheBackend`.
///
/// # Examples
///
/// ```
/// use cachewrap_backend::{CacheBackend, DynamicBackend, DynamicBackendExt};
///
/// fn erase<B>(backend: B) -> DynamicBackend<String, i32>
/// where
///     B: CacheBackend<String, i32> + 'static,
/// {
///     backend.into_dynamic()
/// }
/// ```
pub trait DynamicBackendExt<K, V>: Sized {
    /// Converts this backend into a `DynamicBackend`.
    fn into_dynamic(self) -> DynamicBackend<K, V>;
}

impl<K, V, B> DynamicBackendExt<K, V> for B
where
    B: CacheBackend<K, V> + 'static,
{
    fn into_dynamic(self) -> DynamicBackend<K, V> {
        DynamicBackend::new(self)
    }
}

/// A clonable backend handle with type erasure.
///
/// Use this when the concrete backend is chosen at runtime, for example from
/// a registry of named caches, and several call sites hold the same handle.
pub struct DynamicBackend<K, V>(Arc<DynCacheBackend<'static, K, V>>);

impl<K, V> DynamicBackend<K, V> {
    pub(crate) fn new<B>(backend: B) -> Self
    where
        B: CacheBackend<K, V> + Send + Sync + 'static,
    {
        Self(DynCacheBackend::new_arc(backend))
    }
}

impl<K, V> Debug for DynamicBackend<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBackend").finish()
    }
}

impl<K, V> Clone for DynamicBackend<K, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<K, V> CacheBackend<K, V> for DynamicBackend<K, V>
where
    K: Sync,
    V: Send,
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
        self.0.len()
    }
}
