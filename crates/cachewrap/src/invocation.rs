// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The call site a caching pattern intercepts.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A value bound to an invocation parameter.
///
/// Implemented for every `Hash + Debug` value, so the structural hash of an
/// argument is what identifies it for key derivation.
pub trait Argument: Debug + Send + Sync {
    /// Feeds this argument into `state`.
    fn hash_into(&self, state: &mut dyn Hasher);
}

impl<T> Argument for T
where
    T: Hash + Debug + Send + Sync,
{
    fn hash_into(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// An operation name together with the values bound to its parameters.
///
/// Arguments are kept in declaration order. Parameters that have a default
/// should be bound with [`arg_or`](Self::arg_or) or
/// [`arg_or_default`](Self::arg_or_default) so that omitting them and passing
/// the default explicitly produce the same invocation.
///
/// ```
/// use cachewrap::Invocation;
///
/// let explicit = Invocation::new("get_user").arg(7_u64).arg(false);
/// let defaulted = Invocation::new("get_user").arg(7_u64).arg_or_default(None::<bool>);
///
/// assert_eq!(explicit.len(), 2);
/// assert_eq!(format!("{explicit:?}"), format!("{defaulted:?}"));
/// ```
#[derive(Clone, Debug)]
pub struct Invocation {
    operation: Cow<'static, str>,
    args: Vec<Arc<dyn Argument>>,
}

impl Invocation {
    /// Starts an invocation of the named operation with no arguments bound.
    #[must_use]
    pub fn new(operation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            operation: operation.into(),
            args: Vec::new(),
        }
    }

    /// Binds the next positional argument.
    #[must_use]
    pub fn arg<T>(mut self, value: T) -> Self
    where
        T: Hash + Debug + Send + Sync + 'static,
    {
        self.args.push(Arc::new(value));
        self
    }

    /// Binds the next argument, falling back to `default` when omitted.
    #[must_use]
    pub fn arg_or<T>(self, value: Option<T>, default: T) -> Self
    where
        T: Hash + Debug + Send + Sync + 'static,
    {
        self.arg(value.unwrap_or(default))
    }

    /// Binds the next argument, falling back to `T::default()` when omitted.
    #[must_use]
    pub fn arg_or_default<T>(self, value: Option<T>) -> Self
    where
        T: Default + Hash + Debug + Send + Sync + 'static,
    {
        self.arg(value.unwrap_or_default())
    }

    /// The operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The bound arguments in declaration order.
    pub fn args(&self) -> impl ExactSizeIterator<Item = &dyn Argument> {
        self.args.iter().map(|arg| &**arg)
    }

    /// Number of bound arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no arguments are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl Hash for Invocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.operation.hash(state);
        state.write_usize(self.args.len());
        for arg in &self.args {
            arg.hash_into(state);
        }
    }
}
