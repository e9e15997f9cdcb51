// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory backend implementation using moka.

use std::hash::Hash;
use std::time::{Duration, Instant};

use cachewrap_backend::{CacheBackend, CacheOptions, Error};
use moka::future::Cache;
use moka::ops::compute::Op;
use thread_aware::{Arc, PerProcess};
use tick::Clock;

use crate::builder::InMemoryBackendBuilder;

#[derive(Debug, Clone)]
struct Stored<V> {
    value: V,
    expires_at: Option<Instant>,
}

/// An in-memory backend backed by moka.
///
/// This backend provides:
/// - Concurrent access with high performance
/// - Automatic eviction based on capacity
/// - Per-entry TTL taken from [`CacheOptions::ttl`], checked against a [`Clock`]
///
/// Expired entries read as absent and are dropped on the read that finds them.
///
/// # Examples
///
/// ```
/// use cachewrap_backend::{CacheBackend, CacheOptions};
/// use cachewrap_memory::InMemoryBackend;
/// use tick::Clock;
///
/// # async fn example(clock: Clock) -> Result<(), cachewrap_backend::Error> {
/// let backend = InMemoryBackend::<String, i32>::new(clock);
/// let options = CacheOptions::new();
///
/// backend.set(&"key".to_string(), 42, &options).await?;
/// assert_eq!(backend.get(&"key".to_string(), &options).await?, Some(42));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryBackend<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Cache<K, Stored<V>>, PerProcess>,
    clock: Clock,
    default_ttl: Option<Duration>,
}

impl<K, V> InMemoryBackend<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory backend.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::builder(clock).build()
    }

    /// Creates a new in-memory backend with a maximum capacity.
    #[must_use]
    pub fn with_capacity(clock: Clock, max_capacity: u64) -> Self {
        Self::builder(clock).max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory backend.
    #[must_use]
    pub fn builder(clock: Clock) -> InMemoryBackendBuilder<K, V> {
        InMemoryBackendBuilder::new(clock)
    }

    pub(crate) fn from_builder(builder: InMemoryBackendBuilder<K, V>) -> Self {
        let mut moka_builder = Cache::builder();

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(tti) = builder.time_to_idle {
            moka_builder = moka_builder.time_to_idle(tti);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: Arc::from_unaware(moka_builder.build()),
            clock: builder.clock,
            default_ttl: builder.time_to_live,
        }
    }

    /// Returns the clock used for expiry checks.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    fn expires_at(&self, options: &CacheOptions) -> Option<Instant> {
        let ttl = options.ttl().or(self.default_ttl)?;
        // An instant too far out to represent never expires.
        self.clock.instant().checked_add(ttl)
    }

    fn is_expired(&self, stored: &Stored<V>) -> bool {
        stored.expires_at.is_some_and(|at| self.clock.instant() >= at)
    }
}

impl<K, V> InMemoryBackend<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Removes the entry under `key` only while it is still expired.
    ///
    /// The check runs under moka's per-key compute lock, so a value written
    /// after the expired read is left alone.
    async fn drop_if_expired(&self, key: &K) {
        let _ = self
            .inner
            .entry_by_ref(key)
            .and_compute_with(|entry| {
                let op = match entry {
                    Some(entry) if self.is_expired(entry.value()) => Op::Remove,
                    _ => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;
    }
}

impl<K, V> CacheBackend<K, V> for InMemoryBackend<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K, _options: &CacheOptions) -> Result<Option<V>, Error> {
        match self.inner.get(key).await {
            Some(stored) if self.is_expired(&stored) => {
                self.drop_if_expired(key).await;
                Ok(None)
            }
            Some(stored) => Ok(Some(stored.value)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &K, value: V, options: &CacheOptions) -> Result<V, Error> {
        let stored = Stored {
            value: value.clone(),
            expires_at: self.expires_at(options),
        };
        self.inner.insert(key.clone(), stored).await;
        Ok(value)
    }

    async fn delete(&self, key: &K, _options: &CacheOptions) -> Result<(), Error> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn flush(&self, _options: &CacheOptions) -> Result<(), Error> {
        self.inner.invalidate_all();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.inner.entry_count())
    }
}
