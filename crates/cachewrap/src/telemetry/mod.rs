// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Telemetry for caching pattern decisions.
//!
//! Every backend call a pattern makes is recorded with the aspect name, the
//! pattern action, the backend operation, and what came of it (hit, miss,
//! stored, evicted, ...). With the `logs` feature this becomes a structured
//! `tracing` event; with `metrics` it feeds OpenTelemetry instruments.

#[cfg(any(feature = "logs", test))]
use opentelemetry::logs::Severity;
#[cfg(any(feature = "logs", feature = "metrics", test))]
use record::CacheTelemetryInner;
#[cfg(any(feature = "logs", feature = "metrics", test))]
use thread_aware::{Arc, PerCore};

pub(crate) mod attributes;
pub(crate) mod ext;
#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) mod record;
#[cfg(test)]
pub(crate) mod testing;

/// Telemetry sink for caching aspects.
///
/// Construct one with [`CacheTelemetry::new`] and hand it to an aspect builder
/// via `.telemetry()`. Without the `logs` or `metrics` feature this type is an
/// inert placeholder.
#[derive(Clone, Debug)]
pub struct CacheTelemetry {
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    inner: Arc<CacheTelemetryInner, PerCore>,
}

/// Backend call made by a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheOperation {
    Get,
    Set,
    Delete,
    Flush,
}

impl CacheOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "cache.get",
            Self::Set => "cache.set",
            Self::Delete => "cache.delete",
            Self::Flush => "cache.flush",
        }
    }
}

/// Outcome of a backend call, from the pattern's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheActivity {
    Hit,
    Miss,
    Stored,
    Evicted,
    Flushed,
    Error,
}

impl CacheActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "cache.hit",
            Self::Miss => "cache.miss",
            Self::Stored => "cache.stored",
            Self::Evicted => "cache.evicted",
            Self::Flushed => "cache.flushed",
            Self::Error => "cache.error",
        }
    }

    #[cfg(any(feature = "logs", test))]
    pub fn severity(self) -> Severity {
        match self {
            Self::Hit | Self::Miss => Severity::Debug,
            Self::Stored | Self::Evicted | Self::Flushed => Severity::Info,
            Self::Error => Severity::Error,
        }
    }
}
