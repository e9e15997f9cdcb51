// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};

use crate::ActionKind;

/// What is wrong with an aspect's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// No cache backend was supplied.
    MissingCache,
}

impl Display for ConfigErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCache => f.write_str("no cache backend was supplied"),
        }
    }
}

/// An aspect was built with an invalid configuration.
///
/// Returned by `build()`, so a misconfigured aspect never gets the chance to
/// run an operation or touch a backend.
#[ohno::error]
#[display("invalid {action} aspect configuration: {kind}")]
pub struct ConfigError {
    action: ActionKind,
    kind: ConfigErrorKind,
}

impl ConfigError {
    pub(crate) fn missing_cache(action: ActionKind) -> Self {
        Self::new(action, ConfigErrorKind::MissingCache)
    }

    /// The pattern the aspect was configured for.
    #[must_use]
    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// What is wrong.
    #[must_use]
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    /// Whether the aspect was built without a cache backend.
    #[must_use]
    pub fn is_missing_cache(&self) -> bool {
        self.kind == ConfigErrorKind::MissingCache
    }
}

/// Failure of a call made through an aspect.
///
/// Both variants carry the original error untouched; `Display` and `source`
/// are forwarded to it.
#[derive(Debug, thiserror::Error)]
pub enum PatternError<E> {
    /// The cache backend failed.
    #[error(transparent)]
    Backend(#[from] cachewrap_backend::Error),
    /// The wrapped operation failed.
    #[error(transparent)]
    Operation(E),
}

impl<E> PatternError<E> {
    /// Whether the backend failed.
    #[must_use]
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// Whether the wrapped operation failed.
    #[must_use]
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// The backend error, if that is what failed.
    #[must_use]
    pub fn backend(&self) -> Option<&cachewrap_backend::Error> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Operation(_) => None,
        }
    }

    /// The operation error, if that is what failed.
    #[must_use]
    pub fn operation(&self) -> Option<&E> {
        match self {
            Self::Operation(e) => Some(e),
            Self::Backend(_) => None,
        }
    }

    /// Takes the backend error back out.
    #[must_use]
    pub fn into_backend(self) -> Option<cachewrap_backend::Error> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Operation(_) => None,
        }
    }

    /// Takes the operation error back out.
    #[must_use]
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(e) => Some(e),
            Self::Backend(_) => None,
        }
    }
}
