// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Caching patterns wrapped around arbitrary operations.
//!
//! A [`CacheAspect`] intercepts an operation and applies one of three
//! patterns against a pluggable [`CacheBackend`]:
//!
//! - **Cacheable** (read-through): a present cached value is returned and the
//!   operation never runs; otherwise the operation runs and its result is
//!   stored.
//! - **Updatable** (write-through): the operation always runs and its result
//!   overwrites the cached value.
//! - **Evict** (invalidation): cached entries are removed first, then the
//!   operation runs. Flushing everything takes precedence over a key list,
//!   which takes precedence over a single key.
//!
//! When no key is supplied, one is derived from the operation name and its
//! argument values by a [`KeyResolver`]; the default [`HashKeyResolver`] is
//! deterministic across calls with equal arguments.
//!
//! # Examples
//!
//! ```
//! use cachewrap::{CacheAspect, InMemoryBackend, Invocation};
//! use tick::Clock;
//!
//! # async fn example(clock: Clock) -> Result<(), Box<dyn std::error::Error>> {
//! let backend = InMemoryBackend::<String, u64>::new(clock.clone());
//!
//! let read = CacheAspect::cacheable::<String, u64>(clock.clone())
//!     .cache(backend.clone())
//!     .build()?;
//! let evict = CacheAspect::evict::<String, u64>(clock)
//!     .cache(backend)
//!     .build()?;
//!
//! let balance = Invocation::new("balance").arg(7_u32);
//!
//! let first = read.run(&balance, || async { Ok::<_, std::io::Error>(100) }).await?;
//! let cached = read.run(&balance, || async { Ok::<_, std::io::Error>(200) }).await?;
//! assert_eq!((first, cached), (100, 100));
//!
//! // Same invocation, same derived key: the cached balance is dropped.
//! evict.run(&balance, || async { Ok::<_, std::io::Error>(0) }).await?;
//! let fresh = read.run(&balance, || async { Ok::<_, std::io::Error>(200) }).await?;
//! assert_eq!(fresh, 200);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `memory` (default): re-exports [`InMemoryBackend`].
//! - `service` (default): [`Caching`] middleware for `layered` stacks.
//! - `logs`: structured `tracing` events for every pattern decision.
//! - `metrics`: OpenTelemetry counters, histograms, and gauges.
//! - `dynamic-backend`: type-erased backends via [`DynamicBackend`].
//! - `test-util`: the recording `MockBackend` and controllable clocks.

mod action;
mod aspect;
mod builder;
mod error;
mod invocation;
mod key;
#[cfg(any(feature = "service", test))]
mod service;
mod telemetry;

#[doc(inline)]
pub use action::{ActionKind, DeletePolicy, EvictionMode};
#[doc(inline)]
pub use aspect::{CacheAspect, CacheName};
#[doc(inline)]
pub use builder::AspectBuilder;
#[doc(inline)]
pub use cachewrap_backend::{CacheBackend, CacheOptions, Error, Result};
#[cfg(feature = "dynamic-backend")]
#[doc(inline)]
pub use cachewrap_backend::{DynamicBackend, DynamicBackendExt};
#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use cachewrap_backend::testing;
#[cfg(feature = "memory")]
#[doc(inline)]
pub use cachewrap_memory::{InMemoryBackend, InMemoryBackendBuilder};
#[doc(inline)]
pub use error::{ConfigError, ConfigErrorKind, PatternError};
#[doc(inline)]
pub use invocation::{Argument, Invocation};
#[doc(inline)]
pub use key::{CacheKey, HashKeyResolver, KeyResolver, KeySpec, derive_key};
#[cfg(any(feature = "service", test))]
#[doc(inline)]
pub use service::{Caching, CachingLayer};
#[doc(inline)]
pub use telemetry::CacheTelemetry;
