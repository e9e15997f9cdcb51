// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-memory backends.
//!
//! This module provides a builder API for `InMemoryBackend` that abstracts
//! the underlying moka configuration, providing a stable API surface
//! without exposing moka's types.

use std::hash::Hash;
use std::marker::PhantomData;
use std::time::Duration;

use tick::Clock;

use crate::backend::InMemoryBackend;

/// Builder for configuring an `InMemoryBackend`.
///
/// # Examples
///
/// ```
/// use cachewrap_memory::InMemoryBackend;
/// use std::time::Duration;
/// use tick::Clock;
///
/// # fn build(clock: Clock) {
/// let backend = InMemoryBackend::<String, i32>::builder(clock)
///     .max_capacity(1000)
///     .time_to_live(Duration::from_secs(300))
///     .time_to_idle(Duration::from_secs(60))
///     .initial_capacity(100)
///     .name("users")
///     .build();
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryBackendBuilder<K, V> {
    pub(crate) clock: Clock,
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) time_to_live: Option<Duration>,
    pub(crate) time_to_idle: Option<Duration>,
    pub(crate) name: Option<String>,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> InMemoryBackendBuilder<K, V> {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration creates an unbounded backend with `TinyLFU`
    /// eviction and no expiration. The clock drives per-entry TTL checks.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            max_capacity: None,
            initial_capacity: None,
            time_to_live: None,
            time_to_idle: None,
            name: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the maximum number of entries.
    ///
    /// Once the capacity is reached, entries are evicted using the `TinyLFU`
    /// policy. If not set, the backend is unbounded.
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the initial capacity (pre-allocation hint).
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets the default time-to-live for entries.
    ///
    /// Applies to writes whose [`CacheOptions`](cachewrap_backend::CacheOptions)
    /// carry no `ttl`. A `ttl` in the options always wins.
    #[must_use]
    pub fn time_to_live(mut self, duration: Duration) -> Self {
        self.time_to_live = Some(duration);
        self
    }

    /// Sets the time-to-idle for all entries.
    ///
    /// Entries expire after this duration without reads or writes. Enforced
    /// by moka on its own clock, independent of per-entry TTL.
    #[must_use]
    pub fn time_to_idle(mut self, duration: Duration) -> Self {
        self.time_to_idle = Some(duration);
        self
    }

    /// Sets a name that may appear in logs or debug output from moka.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured `InMemoryBackend`.
    #[must_use]
    pub fn build(self) -> InMemoryBackend<K, V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        InMemoryBackend::from_builder(self)
    }
}
