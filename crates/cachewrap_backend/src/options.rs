// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Backend-specific options forwarded with every backend call.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

/// Options passed through, unmodified, to every backend call of one invocation.
///
/// The decision layer never interprets these values. Time-to-live is the one
/// option with a dedicated slot because nearly every backend understands it;
/// anything else travels as a free-form string parameter whose meaning is up
/// to the backend.
///
/// `CacheOptions` is cheap to clone: parameters live behind an [`Arc`].
///
/// # Examples
///
/// ```
/// use cachewrap_backend::CacheOptions;
/// use std::time::Duration;
///
/// let options = CacheOptions::new()
///     .with_ttl(Duration::from_secs(60))
///     .with_param("namespace", "users");
///
/// assert_eq!(options.ttl(), Some(Duration::from_secs(60)));
/// assert_eq!(options.param("namespace"), Some("users"));
/// assert!(!options.is_empty());
/// assert!(CacheOptions::default().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheOptions {
    ttl: Option<Duration>,
    params: Arc<BTreeMap<String, String>>,
}

impl CacheOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time-to-live for entries written with these options.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Adds a free-form backend parameter, replacing any previous value for `name`.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.params).insert(name.into(), value.into());
        self
    }

    /// Returns the time-to-live, if set.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns the value of a free-form parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Iterates over all free-form parameters in name order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ttl.is_none() && self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_param_overwrites_previous_value() {
        let options = CacheOptions::new().with_param("tier", "l1").with_param("tier", "l2");
        assert_eq!(options.param("tier"), Some("l2"));
        assert_eq!(options.params().count(), 1);
    }

    #[test]
    fn clone_does_not_share_mutations() {
        let base = CacheOptions::new().with_param("a", "1");
        let extended = base.clone().with_param("b", "2");

        assert_eq!(base.param("b"), None);
        assert_eq!(extended.param("a"), Some("1"));
        assert_eq!(extended.param("b"), Some("2"));
    }

    #[test]
    fn params_are_ordered_by_name() {
        let options = CacheOptions::new().with_param("zeta", "z").with_param("alpha", "a");
        let names: Vec<_> = options.params().map(|(k, _)| k).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[test]
    fn ttl_alone_makes_options_non_empty() {
        let options = CacheOptions::new().with_ttl(Duration::from_millis(5));
        assert!(!options.is_empty());
        assert_eq!(options.param("anything"), None);
    }
}
