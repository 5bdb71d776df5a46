//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. The kinds here are the ones reported
//! to the user; the underlying extract, fetch and storage errors hang beneath
//! them in the error tree.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies why archiving failed.
///
/// ### Source Format Errors
/// - [`ErrorKind::MalformedCatalog`]
/// - [`ErrorKind::MalformedDetailPage`]
///
/// ### Operational Errors
/// - [`ErrorKind::RemoteFetch`]
/// - [`ErrorKind::LocalIo`]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The catalog page doesn't have the expected structure.
    #[display("malformed catalog")]
    MalformedCatalog,
    /// A mix landing page doesn't have the expected structure.
    #[display("malformed mix landing page")]
    MalformedDetailPage,
    /// A request failed, either with a non-2xx status or in transport.
    #[display("remote fetch failed")]
    RemoteFetch,
    /// Creating a directory or writing a file failed.
    #[display("local I/O failed")]
    LocalIo,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in this crate retries; this is for callers deciding whether a
    /// later run is worth it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteFetch)
    }
}
