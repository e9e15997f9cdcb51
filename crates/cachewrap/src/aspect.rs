// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The pattern executor.

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

use cachewrap_backend::{CacheBackend, CacheOptions};
use tick::Clock;

use crate::{
    ActionKind, AspectBuilder, CacheKey, DeletePolicy, EvictionMode, Invocation, KeyResolver, KeySpec, PatternError,
    telemetry::{
        CacheActivity, CacheOperation, CacheTelemetry,
        ext::{CacheTelemetryExt, ClockExt},
    },
};

/// Static name identifying an aspect in telemetry.
pub type CacheName = &'static str;

pub(crate) const DEFAULT_CACHE_NAME: CacheName = "default";

/// Applies one caching pattern around operations.
///
/// An aspect binds an [`ActionKind`] to a cache backend, a key spec,
/// and backend options. Each call to [`run`](Self::run) or
/// [`run_with_key`](Self::run_with_key) executes the pattern:
///
/// - **Cacheable** reads the key; a present value is returned without running
///   the operation, otherwise the operation runs and its result is stored.
/// - **Updatable** always runs the operation and stores its result, returning
///   what the backend's `set` returned.
/// - **Evict** flushes the backend, deletes a key set, or deletes a single
///   key, and only then runs the operation.
///
/// A stored value counts as present whatever its content, so `Some(false)` or
/// `Some(0)` are hits. Operation and backend failures come back unchanged
/// inside [`PatternError`].
///
/// # Examples
///
/// ```
/// use cachewrap::{CacheAspect, InMemoryBackend, Invocation};
/// use tick::Clock;
///
/// # async fn example(clock: Clock) -> Result<(), Box<dyn std::error::Error>> {
/// let aspect = CacheAspect::cacheable::<String, String>(clock.clone())
///     .cache(InMemoryBackend::new(clock))
///     .name("users")
///     .build()?;
///
/// let invocation = Invocation::new("get_user").arg(42_u64);
/// let user = aspect
///     .run(&invocation, || async { Ok::<_, std::io::Error>("Ada".to_string()) })
///     .await?;
/// assert_eq!(user, "Ada");
/// # Ok(())
/// # }
/// ```
pub struct CacheAspect<K, V, B> {
    pub(crate) action: ActionKind,
    pub(crate) clock: Clock,
    pub(crate) cache: B,
    pub(crate) name: CacheName,
    pub(crate) key_spec: KeySpec<K>,
    pub(crate) all_entries: bool,
    pub(crate) options: CacheOptions,
    pub(crate) resolver: Arc<dyn KeyResolver>,
    pub(crate) delete_policy: DeletePolicy,
    pub(crate) telemetry: Option<CacheTelemetry>,
    pub(crate) _value: PhantomData<fn() -> V>,
}

impl CacheAspect<(), (), ()> {
    /// Starts configuring a read-through aspect.
    #[must_use]
    pub fn cacheable<K, V>(clock: Clock) -> AspectBuilder<K, V> {
        AspectBuilder::new(ActionKind::Cacheable, clock)
    }

    /// Starts configuring a write-through aspect.
    #[must_use]
    pub fn updatable<K, V>(clock: Clock) -> AspectBuilder<K, V> {
        AspectBuilder::new(ActionKind::Updatable, clock)
    }

    /// Starts configuring an invalidating aspect.
    #[must_use]
    pub fn evict<K, V>(clock: Clock) -> AspectBuilder<K, V> {
        AspectBuilder::new(ActionKind::Evict, clock)
    }

    /// Starts configuring an aspect for the given pattern.
    #[must_use]
    pub fn builder<K, V>(action: ActionKind, clock: Clock) -> AspectBuilder<K, V> {
        AspectBuilder::new(action, clock)
    }
}

impl<K, V, B> CacheAspect<K, V, B> {
    /// The pattern this aspect applies.
    #[must_use]
    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// The telemetry name.
    #[must_use]
    pub fn name(&self) -> CacheName {
        self.name
    }

    /// The backend.
    #[must_use]
    pub fn cache(&self) -> &B {
        &self.cache
    }

    /// The configured key spec.
    #[must_use]
    pub fn key_spec(&self) -> &KeySpec<K> {
        &self.key_spec
    }

    /// Whether an evict aspect flushes every entry.
    #[must_use]
    pub fn is_all_entries(&self) -> bool {
        self.all_entries
    }

    /// Options forwarded to every backend call.
    #[must_use]
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// How failed deletions within a key set are handled.
    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Derives the key for `invocation` with the configured resolver.
    #[must_use]
    pub fn derive_key(&self, invocation: &Invocation) -> CacheKey {
        self.resolver.resolve(invocation)
    }
}

impl<K, V, B> CacheAspect<K, V, B>
where
    K: Clone + From<CacheKey> + Send + Sync,
    V: Send,
    B: CacheBackend<K, V>,
{
    /// Runs `operation` under this aspect's pattern using the configured keys.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Backend`] when a backend call fails and
    /// [`PatternError::Operation`] when `operation` fails.
    pub async fn run<F, Fut, E>(&self, invocation: &Invocation, operation: F) -> Result<V, PatternError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.run_with_key(&self.key_spec, invocation, operation).await
    }

    /// Runs `operation` under this aspect's pattern with keys supplied for this call.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Backend`] when a backend call fails and
    /// [`PatternError::Operation`] when `operation` fails.
    pub async fn run_with_key<F, Fut, E>(&self, key_spec: &KeySpec<K>, invocation: &Invocation, operation: F) -> Result<V, PatternError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        match self.action {
            ActionKind::Cacheable => self.read_through(self.resolve_key(key_spec, invocation), operation).await,
            ActionKind::Updatable => self.write_through(self.resolve_key(key_spec, invocation), operation).await,
            ActionKind::Evict => {
                let mode = EvictionMode::resolve(self.all_entries, key_spec, || K::from(self.derive_key(invocation)));
                self.evict_then_run(mode, operation).await
            }
        }
    }

    /// Resolves the single key used by cacheable and updatable aspects.
    #[must_use]
    pub fn resolve_key(&self, key_spec: &KeySpec<K>, invocation: &Invocation) -> K {
        key_spec
            .single()
            .cloned()
            .unwrap_or_else(|| K::from(self.derive_key(invocation)))
    }

    async fn read_through<F, Fut, E>(&self, key: K, operation: F) -> Result<V, PatternError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let timed = self.clock.timed_async(self.cache.get(&key, &self.options)).await;
        match timed.result {
            Ok(Some(value)) => {
                self.record(CacheOperation::Get, CacheActivity::Hit, timed.duration);
                return Ok(value);
            }
            Ok(None) => self.record(CacheOperation::Get, CacheActivity::Miss, timed.duration),
            Err(e) => {
                self.record(CacheOperation::Get, CacheActivity::Error, timed.duration);
                return Err(PatternError::Backend(e));
            }
        }

        let value = operation().await.map_err(PatternError::Operation)?;
        self.store(&key, value).await
    }

    async fn write_through<F, Fut, E>(&self, key: K, operation: F) -> Result<V, PatternError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let value = operation().await.map_err(PatternError::Operation)?;
        self.store(&key, value).await
    }

    async fn evict_then_run<F, Fut, E>(&self, mode: EvictionMode<K>, operation: F) -> Result<V, PatternError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.evict_mode(mode).await?;
        operation().await.map_err(PatternError::Operation)
    }

    async fn store<E>(&self, key: &K, value: V) -> Result<V, PatternError<E>> {
        let timed = self.clock.timed_async(self.cache.set(key, value, &self.options)).await;
        match timed.result {
            Ok(stored) => {
                self.record(CacheOperation::Set, CacheActivity::Stored, timed.duration);
                self.record_size();
                Ok(stored)
            }
            Err(e) => {
                self.record(CacheOperation::Set, CacheActivity::Error, timed.duration);
                Err(PatternError::Backend(e))
            }
        }
    }

    async fn evict_mode(&self, mode: EvictionMode<K>) -> cachewrap_backend::Result<()> {
        let result = match mode {
            EvictionMode::AllEntries => {
                let timed = self.clock.timed_async(self.cache.flush(&self.options)).await;
                let activity = if timed.result.is_ok() { CacheActivity::Flushed } else { CacheActivity::Error };
                self.record(CacheOperation::Flush, activity, timed.duration);
                timed.result
            }
            EvictionMode::SingleKey(key) => self.delete(&key).await,
            EvictionMode::KeySet(keys) => {
                let mut first_error = None;
                for key in &keys {
                    if let Err(e) = self.delete(key).await {
                        if self.delete_policy == DeletePolicy::StopAtFirst {
                            return Err(e);
                        }
                        first_error.get_or_insert(e);
                    }
                }
                first_error.map_or(Ok(()), Err)
            }
        };

        if result.is_ok() {
            self.record_size();
        }
        result
    }

    async fn delete(&self, key: &K) -> cachewrap_backend::Result<()> {
        let timed = self.clock.timed_async(self.cache.delete(key, &self.options)).await;
        let activity = if timed.result.is_ok() { CacheActivity::Evicted } else { CacheActivity::Error };
        self.record(CacheOperation::Delete, activity, timed.duration);
        timed.result
    }

    fn record(&self, operation: CacheOperation, activity: CacheActivity, duration: std::time::Duration) {
        self.telemetry.record(self.name, self.action, operation, activity, duration);
    }

    fn record_size(&self) {
        if let Some(len) = self.cache.len() {
            self.telemetry.record_size(self.name, len);
        }
    }
}

impl<K: Debug, V, B: Debug> Debug for CacheAspect<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAspect")
            .field("action", &self.action)
            .field("name", &self.name)
            .field("cache", &self.cache)
            .field("key_spec", &self.key_spec)
            .field("all_entries", &self.all_entries)
            .field("options", &self.options)
            .field("delete_policy", &self.delete_policy)
            .finish_non_exhaustive()
    }
}
