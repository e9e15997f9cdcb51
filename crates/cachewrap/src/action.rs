// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};

use crate::KeySpec;

/// Which caching pattern an aspect applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Read-through: return the cached value, or run the operation and cache its result.
    Cacheable,
    /// Write-through: always run the operation and overwrite the cached value.
    Updatable,
    /// Invalidation: remove cached entries, then run the operation.
    Evict,
}

impl ActionKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cacheable => "cacheable",
            Self::Updatable => "updatable",
            Self::Evict => "evict",
        }
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an evict pattern removes for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvictionMode<K> {
    /// Delete one key.
    SingleKey(K),
    /// Delete each key, in order.
    KeySet(Vec<K>),
    /// Flush the whole backend.
    AllEntries,
}

impl<K: Clone> EvictionMode<K> {
    /// Resolves the eviction mode for a call.
    ///
    /// `all_entries` wins over everything, a non-empty key list wins over a
    /// single key, and `derive` is only called when neither a list nor a
    /// single key was supplied.
    pub fn resolve(all_entries: bool, spec: &KeySpec<K>, derive: impl FnOnce() -> K) -> Self {
        if all_entries {
            return Self::AllEntries;
        }

        if !spec.list().is_empty() {
            return Self::KeySet(spec.list().to_vec());
        }

        Self::SingleKey(spec.single().cloned().unwrap_or_else(derive))
    }
}

/// How an evict pattern reacts when deleting one key of a key set fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Attempt every deletion, then report the first failure.
    #[default]
    Continue,
    /// Stop at the first failed deletion.
    StopAtFirst,
}
