//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which page failed to match the expected structure, and how.
///
/// The site's markup is assumed to be stable: none of these are recoverable
/// at runtime, a change in page format needs a code change.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The catalog (home) page does not have the expected structure.
    #[display("malformed catalog: {_0}")]
    MalformedCatalog(#[error(not(source))] Defect),
    /// A mix landing page does not have the expected structure.
    #[display("malformed detail page: {_0}")]
    MalformedDetailPage(#[error(not(source))] Defect),
}

/// The specific structural problem found in a page.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Defect {
    /// No element matched the selector.
    #[display("missing element `{_0}`")]
    MissingElement(&'static str),
    /// The element was found but lacks a required attribute.
    #[display("missing attribute `{_0}`")]
    MissingAttribute(&'static str),
    /// The `onclick` navigation script did not match `window.location = '<path>';`.
    #[display("unrecognised navigation target: {_0:?}")]
    Navigation(String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The markup is either in the expected shape or it isn't; fetching
        // it again won't change that.
        false
    }
}
