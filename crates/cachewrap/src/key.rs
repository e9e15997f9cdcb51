// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache key derivation.

use std::fmt::{self, Display, Formatter};
use std::hash::Hash;

use xxhash_rust::xxh3::Xxh3;

use crate::Invocation;

/// A derived cache key: a 128-bit digest of an invocation.
///
/// Convert it into whatever key type the backend stores with `From`; it
/// renders as 32 lowercase hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey(u128);

impl CacheKey {
    /// Wraps a raw digest.
    #[must_use]
    pub const fn from_u128(digest: u128) -> Self {
        Self(digest)
    }

    /// The raw digest.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl From<CacheKey> for u128 {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}

/// Derives a cache key for an invocation when the caller supplies none.
///
/// Implementations must be pure: the same operation name and argument values
/// always map to the same key. Any `Fn(&Invocation) -> CacheKey` closure is a
/// resolver.
pub trait KeyResolver: Send + Sync {
    /// Returns the key for `invocation`.
    fn resolve(&self, invocation: &Invocation) -> CacheKey;
}

impl<F> KeyResolver for F
where
    F: Fn(&Invocation) -> CacheKey + Send + Sync,
{
    fn resolve(&self, invocation: &Invocation) -> CacheKey {
        self(invocation)
    }
}

/// The default resolver: xxh3-128 over the structural hash of the operation
/// name and every bound argument.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashKeyResolver;

impl KeyResolver for HashKeyResolver {
    fn resolve(&self, invocation: &Invocation) -> CacheKey {
        let mut hasher = Xxh3::new();
        invocation.hash(&mut hasher);
        CacheKey(hasher.digest128())
    }
}

/// Derives the key for `invocation` with [`HashKeyResolver`].
#[must_use]
pub fn derive_key(invocation: &Invocation) -> CacheKey {
    HashKeyResolver.resolve(invocation)
}

/// Caller-supplied keys for a pattern.
///
/// `key` overrides key derivation for every pattern. `keys` is only read by
/// the evict pattern, where a non-empty list takes precedence over the single
/// key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySpec<K> {
    key: Option<K>,
    keys: Vec<K>,
}

impl<K> KeySpec<K> {
    /// No explicit keys; the key is derived from the invocation.
    #[must_use]
    pub const fn derived() -> Self {
        Self { key: None, keys: Vec::new() }
    }

    /// A single explicit key.
    #[must_use]
    pub fn key(key: K) -> Self {
        Self::derived().with_key(key)
    }

    /// An explicit list of keys to evict.
    #[must_use]
    pub fn keys(keys: impl IntoIterator<Item = K>) -> Self {
        Self::derived().with_keys(keys)
    }

    /// Sets the single explicit key.
    #[must_use]
    pub fn with_key(mut self, key: K) -> Self {
        self.key = Some(key);
        self
    }

    /// Sets the list of keys to evict.
    #[must_use]
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }

    /// The single explicit key, if any.
    #[must_use]
    pub fn single(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// The list of keys to evict; empty when none were given.
    #[must_use]
    pub fn list(&self) -> &[K] {
        &self.keys
    }

    /// Whether nothing was supplied and the key will be derived.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.key.is_none() && self.keys.is_empty()
    }
}

impl<K> Default for KeySpec<K> {
    fn default() -> Self {
        Self::derived()
    }
}
