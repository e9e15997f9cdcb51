// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory cache backend built on moka.
//!
//! This crate provides [`InMemoryBackend`], a concurrent in-memory
//! [`CacheBackend`](cachewrap_backend::CacheBackend) using moka's `TinyLFU`
//! eviction. Use [`InMemoryBackendBuilder`] to configure capacity, default
//! TTL, and TTI without exposing moka types directly.
//!
//! # Quick Start
//!
//! ```
//! use cachewrap_backend::{CacheBackend, CacheOptions};
//! use cachewrap_memory::InMemoryBackendBuilder;
//! use std::time::Duration;
//! use tick::Clock;
//!
//! # async fn example(clock: Clock) -> Result<(), cachewrap_backend::Error> {
//! let backend = InMemoryBackendBuilder::<String, i32>::new(clock)
//!     .max_capacity(1000)
//!     .build();
//!
//! let options = CacheOptions::new().with_ttl(Duration::from_secs(30));
//! backend.set(&"key".to_string(), 42, &options).await?;
//! assert_eq!(backend.get(&"key".to_string(), &options).await?, Some(42));
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Capacity limits**: Set maximum entry count with automatic eviction
//! - **Per-entry TTL**: Honors the `ttl` carried by each write's options
//! - **Thread-safe**: Safe for concurrent access from multiple tasks

pub mod backend;
pub mod builder;

#[doc(inline)]
pub use backend::InMemoryBackend;
#[doc(inline)]
pub use builder::InMemoryBackendBuilder;
