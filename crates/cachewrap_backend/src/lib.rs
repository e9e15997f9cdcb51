// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Backend capability abstractions for the `cachewrap` caching patterns.
//!
//! This crate defines the [`CacheBackend`] trait that every storage engine
//! must satisfy, along with [`CacheOptions`] for passing backend-specific
//! settings through untouched and the opaque [`Error`] type for fallible
//! operations.
//!
//! # Overview
//!
//! The caching patterns in `cachewrap` only decide *when* to read, write, or
//! evict. Everything about *how* bytes are stored lives behind
//! [`CacheBackend`]: implement it for your storage engine and hand an instance
//! to a `cachewrap` aspect.
//!
//! # Implementing a Backend
//!
//! ```
//! use cachewrap_backend::{CacheBackend, CacheOptions, Error};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct MapBackend<K, V>(RwLock<HashMap<K, V>>);
//!
//! impl<K, V> CacheBackend<K, V> for MapBackend<K, V>
//! where
//!     K: Clone + Eq + std::hash::Hash + Send + Sync,
//!     V: Clone + Send + Sync,
//! {
//!     async fn get(&self, key: &K, _options: &CacheOptions) -> Result<Option<V>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn set(&self, key: &K, value: V, _options: &CacheOptions) -> Result<V, Error> {
//!         self.0.write().unwrap().insert(key.clone(), value.clone());
//!         Ok(value)
//!     }
//!
//!     async fn delete(&self, key: &K, _options: &CacheOptions) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//!
//!     async fn flush(&self, _options: &CacheOptions) -> Result<(), Error> {
//!         self.0.write().unwrap().clear();
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! Enable the `dynamic-backend` feature for [`DynamicBackend`], which wraps any
//! `CacheBackend` in a clonable type-erased handle.

mod backend;
pub mod error;
mod options;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[cfg(any(test, feature = "dynamic-backend"))]
mod dynamic;

#[doc(inline)]
pub use backend::CacheBackend;
#[cfg(any(test, feature = "dynamic-backend"))]
#[doc(inline)]
pub use dynamic::{DynamicBackend, DynamicBackendExt};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use options::CacheOptions;
