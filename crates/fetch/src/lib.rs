//! Retrieval of remote pages and files.
//!
//! [`Source`] is the seam between the archiver and the network: [`HttpSource`]
//! talks to the real site, `MockSource` (feature `mock`) answers from memory
//! and records every request for tests.

pub mod error;
mod source;
mod url;

#[cfg(any(test, feature = "mock"))]
pub use crate::source::MockSource;
pub use crate::source::{ByteStream, HttpSource, Source};
pub use crate::url::{base_url, file_name, resolve};
pub use reqwest::Url;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn Source + Send + Sync>;
