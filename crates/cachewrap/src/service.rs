// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Caching middleware for `layered` service stacks.
//!
//! [`Caching`] wraps an inner service whose output is `Result<V, E>` and runs
//! every request through a [`CacheAspect`]. The request becomes the single
//! argument of an [`Invocation`] named after the wrapped operation, so derived
//! keys differ per request. A key function can supply explicit keys per
//! request instead.
//!
//! ```
//! use cachewrap::{CacheAspect, Caching, InMemoryBackend};
//! use layered::Execute;
//! use layered::prelude::*;
//! use tick::Clock;
//!
//! # async fn example(clock: Clock) -> Result<(), Box<dyn std::error::Error>> {
//! let aspect = CacheAspect::cacheable::<String, String>(clock.clone())
//!     .cache(InMemoryBackend::new(clock))
//!     .build()?;
//!
//! let service = (
//!     Caching::layer("get_user", aspect),
//!     Execute::new(|id: u64| async move { Ok::<_, std::io::Error>(format!("user-{id}")) }),
//! )
//!     .into_service();
//!
//! assert_eq!(service.execute(7).await?, "user-7");
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;
use std::sync::Arc;

use cachewrap_backend::CacheBackend;
use layered::{Layer, Service};

use crate::{CacheAspect, CacheKey, Invocation, KeySpec, PatternError};

type KeyFn<In, K> = Arc<dyn Fn(&In) -> KeySpec<K> + Send + Sync>;

/// Service that applies a caching pattern around an inner service.
pub struct Caching<In, K, V, B, S> {
    inner: S,
    aspect: Arc<CacheAspect<K, V, B>>,
    operation: Cow<'static, str>,
    key_fn: Option<KeyFn<In, K>>,
}

/// Layer producing [`Caching`] services.
pub struct CachingLayer<In, K, V, B> {
    aspect: Arc<CacheAspect<K, V, B>>,
    operation: Cow<'static, str>,
    key_fn: Option<KeyFn<In, K>>,
}

impl Caching<(), (), (), (), ()> {
    /// Creates a layer that runs requests of `operation` through `aspect`.
    #[must_use]
    pub fn layer<In, K, V, B>(operation: impl Into<Cow<'static, str>>, aspect: CacheAspect<K, V, B>) -> CachingLayer<In, K, V, B> {
        CachingLayer {
            aspect: Arc::new(aspect),
            operation: operation.into(),
            key_fn: None,
        }
    }
}

impl<In, K, V, B> CachingLayer<In, K, V, B> {
    /// Computes the keys for each request instead of using the aspect's
    /// configured key spec.
    #[must_use]
    pub fn key_fn(mut self, key_fn: impl Fn(&In) -> KeySpec<K> + Send + Sync + 'static) -> Self {
        self.key_fn = Some(Arc::new(key_fn));
        self
    }
}

impl<In, K, V, B, S> Layer<S> for CachingLayer<In, K, V, B> {
    type Service = Caching<In, K, V, B, S>;

    fn layer(&self, inner: S) -> Self::Service {
        Caching {
            inner,
            aspect: Arc::clone(&self.aspect),
            operation: self.operation.clone(),
            key_fn: self.key_fn.clone(),
        }
    }
}

impl<In, K, V, B, S, E> Service<In> for Caching<In, K, V, B, S>
where
    In: Hash + Debug + Clone + Send + Sync + 'static,
    K: Clone + From<CacheKey> + Send + Sync,
    V: Send,
    B: CacheBackend<K, V>,
    S: Service<In, Out = Result<V, E>>,
    E: Send,
{
    type Out = Result<V, PatternError<E>>;

    async fn execute(&self, input: In) -> Self::Out {
        let invocation = Invocation::new(self.operation.clone()).arg(input.clone());

        match &self.key_fn {
            Some(key_fn) => {
                let key_spec = key_fn(&input);
                self.aspect
                    .run_with_key(&key_spec, &invocation, || self.inner.execute(input))
                    .await
            }
            None => self.aspect.run(&invocation, || self.inner.execute(input)).await,
        }
    }
}

impl<In, K: Debug, V, B: Debug, S: Debug> Debug for Caching<In, K, V, B, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caching")
            .field("inner", &self.inner)
            .field("aspect", &self.aspect)
            .field("operation", &self.operation)
            .field("has_key_fn", &self.key_fn.is_some())
            .finish()
    }
}

impl<In, K: Debug, V, B: Debug> Debug for CachingLayer<In, K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingLayer")
            .field("aspect", &self.aspect)
            .field("operation", &self.operation)
            .field("has_key_fn", &self.key_fn.is_some())
            .finish()
    }
}
