//! Remote source trait and implementations.
//!
//! The archiver only ever needs two things from the network: a whole page
//! (catalog or landing page) held in memory, and a file streamed in chunks so
//! that its size doesn't matter.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpSource;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockSource;
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::Url;
use std::pin::Pin;

/// A response body arriving in bounded-size chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send + 'static>>;

/// Unified interface for fetching remote resources.
///
/// Both methods fail with [`Status`](crate::error::ErrorKind::Status) when the
/// response is not a success, before any body is read. Nothing is retried.
///
/// # Examples
///
/// ```
/// use futures::TryStreamExt;
/// use pinchy_fetch::{Source, Url, error::Result};
///
/// async fn size_of(source: &dyn Source, url: &Url) -> Result<usize> {
///     let mut total = 0;
///     let mut body = source.stream(url).await?;
///     while let Some(chunk) = body.try_next().await? {
///         total += chunk.len();
///     }
///     Ok(total)
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync {
    /// Name of the source, used for logging only.
    fn name(&self) -> &str;

    /// Fetch a complete response body.
    async fn page(&self, url: &Url) -> Result<Vec<u8>>;

    /// Start fetching a response body without buffering it.
    async fn stream(&self, url: &Url) -> Result<ByteStream>;
}
