// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for backend operations.

/// An error raised by a cache backend.
///
/// This is an opaque error type that can wrap any underlying failure from a
/// backend implementation. The decision layer never translates it: whatever a
/// backend returns here is handed to the caller as-is. Use
/// [`std::error::Error::source()`] to reach the underlying cause.
///
/// # Example
///
/// ```
/// use cachewrap_backend::Error;
///
/// let error = Error::from_message("connection refused");
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// This is the public API for creating backend errors from external crates.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachewrap_backend::Error;
    ///
    /// let error = Error::from_message("flush rejected");
    /// assert!(error.to_string().contains("flush rejected"));
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;
