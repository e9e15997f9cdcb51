// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Aspect configuration.

use std::marker::PhantomData;
use std::sync::Arc;

use cachewrap_backend::CacheOptions;
use tick::Clock;

use crate::{
    ActionKind, CacheAspect, ConfigError, DeletePolicy, HashKeyResolver, KeyResolver, KeySpec,
    aspect::{CacheName, DEFAULT_CACHE_NAME},
    telemetry::CacheTelemetry,
};

/// Builder for a [`CacheAspect`].
///
/// Created by [`CacheAspect::cacheable`], [`CacheAspect::updatable`], or
/// [`CacheAspect::evict`]. The backend type starts out as `()` and is fixed by
/// [`cache`](Self::cache); building without a backend fails with a
/// [`ConfigError`].
pub struct AspectBuilder<K, V, B = ()> {
    action: ActionKind,
    clock: Clock,
    cache: Option<B>,
    name: CacheName,
    key_spec: KeySpec<K>,
    all_entries: bool,
    options: CacheOptions,
    resolver: Arc<dyn KeyResolver>,
    delete_policy: DeletePolicy,
    telemetry: Option<CacheTelemetry>,
    _value: PhantomData<fn() -> V>,
}

impl<K, V> AspectBuilder<K, V> {
    pub(crate) fn new(action: ActionKind, clock: Clock) -> Self {
        Self {
            action,
            clock,
            cache: None,
            name: DEFAULT_CACHE_NAME,
            key_spec: KeySpec::derived(),
            all_entries: false,
            options: CacheOptions::default(),
            resolver: Arc::new(HashKeyResolver),
            delete_policy: DeletePolicy::default(),
            telemetry: None,
            _value: PhantomData,
        }
    }
}

impl<K, V, B> AspectBuilder<K, V, B> {
    /// Sets the cache backend the aspect talks to.
    #[must_use]
    pub fn cache<B2>(self, cache: B2) -> AspectBuilder<K, V, B2> {
        self.maybe_cache(Some(cache))
    }

    /// Sets the cache backend if one is available.
    ///
    /// Passing `None` leaves the aspect without a backend, which `build()`
    /// reports as a configuration error.
    #[must_use]
    pub fn maybe_cache<B2>(self, cache: Option<B2>) -> AspectBuilder<K, V, B2> {
        AspectBuilder {
            action: self.action,
            clock: self.clock,
            cache,
            name: self.name,
            key_spec: self.key_spec,
            all_entries: self.all_entries,
            options: self.options,
            resolver: self.resolver,
            delete_policy: self.delete_policy,
            telemetry: self.telemetry,
            _value: PhantomData,
        }
    }

    /// Names the aspect in telemetry.
    #[must_use]
    pub fn name(mut self, name: CacheName) -> Self {
        self.name = name;
        self
    }

    /// Uses an explicit key instead of deriving one.
    #[must_use]
    pub fn key(mut self, key: K) -> Self {
        self.key_spec = self.key_spec.with_key(key);
        self
    }

    /// Sets the keys an evict aspect deletes; ignored by the other patterns.
    #[must_use]
    pub fn keys(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.key_spec = self.key_spec.with_keys(keys);
        self
    }

    /// Replaces the whole key spec.
    #[must_use]
    pub fn key_spec(mut self, key_spec: KeySpec<K>) -> Self {
        self.key_spec = key_spec;
        self
    }

    /// Makes an evict aspect flush every entry instead of deleting keys.
    #[must_use]
    pub fn all_entries(mut self, all_entries: bool) -> Self {
        self.all_entries = all_entries;
        self
    }

    /// Options forwarded unchanged to every backend call.
    #[must_use]
    pub fn options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the default [`HashKeyResolver`].
    #[must_use]
    pub fn key_resolver(mut self, resolver: impl KeyResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Sets how an evict aspect handles a failed deletion within a key set.
    #[must_use]
    pub fn delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Records pattern decisions through the given telemetry sink.
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    #[must_use]
    pub fn telemetry(mut self, telemetry: CacheTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the aspect.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when no cache backend was supplied.
    pub fn build(self) -> Result<CacheAspect<K, V, B>, ConfigError> {
        let Some(cache) = self.cache else {
            return Err(ConfigError::missing_cache(self.action));
        };

        Ok(CacheAspect {
            action: self.action,
            clock: self.clock,
            cache,
            name: self.name,
            key_spec: self.key_spec,
            all_entries: self.all_entries,
            options: self.options,
            resolver: self.resolver,
            delete_policy: self.delete_policy,
            telemetry: self.telemetry,
            _value: PhantomData,
        })
    }
}

impl<K: std::fmt::Debug, V, B> std::fmt::Debug for AspectBuilder<K, V, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AspectBuilder")
            .field("action", &self.action)
            .field("name", &self.name)
            .field("has_cache", &self.cache.is_some())
            .field("key_spec", &self.key_spec)
            .field("all_entries", &self.all_entries)
            .field("options", &self.options)
            .field("delete_policy", &self.delete_policy)
            .finish_non_exhaustive()
    }
}
