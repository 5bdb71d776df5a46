//! In-memory source for testing.

use super::ByteStream;
use crate::Source;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

const DEFAULT_CHUNK_SIZE: usize = 4;

#[derive(Clone, Debug)]
enum Response {
    Body(Vec<u8>),
    Status(u16),
    Transport,
    /// Sends the body, then fails before the stream ends.
    Truncated(Vec<u8>),
}

/// In-memory source for testing.
///
/// Responses are registered per URL; anything unregistered answers with a
/// 404. Every request is recorded so tests can assert on how often (and in
/// which order) URLs were fetched, and the highest number of requests in
/// flight at the same time is tracked.
///
/// # Examples
///
/// ```
/// use pinchy_fetch::{MockSource, Source, Url};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MockSource::with_responses([
///     ("http://example.com/", b"<html>...</html>".to_vec()),
/// ]);
/// let page = source.page(&Url::parse("http://example.com/")?).await?;
/// assert_eq!(page, b"<html>...</html>");
/// assert_eq!(source.request_count("http://example.com/"), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockSource {
    name: String,
    responses: RwLock<HashMap<Url, Response>>,
    requests: Mutex<Vec<Url>>,
    chunk_size: usize,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockSource {
    /// Create a mock source answering `200 OK` with the given bodies.
    ///
    /// Panics if any URL fails to parse. If test setup is wrong, then test
    /// should not pass.
    pub fn with_responses(responses: impl IntoIterator<Item = (impl AsRef<str>, impl Into<Vec<u8>>)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(url, body)| (Self::url(url.as_ref()), Response::Body(body.into())))
            .collect();
        Self {
            name: "mock".to_string(),
            responses: RwLock::new(responses),
            requests: Mutex::new(Vec::new()),
            chunk_size: DEFAULT_CHUNK_SIZE,
            latency: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Size of the chunks streamed bodies are split into.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Delay every request, so that concurrent requests overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer `url` with a non-success status.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.respond(url, Response::Status(status))
    }

    /// Fail requests to `url` before any response arrives.
    pub fn with_transport_failure(self, url: &str) -> Self {
        self.respond(url, Response::Transport)
    }

    /// Stream `body` for `url`, then fail instead of ending the stream.
    pub fn with_truncated(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.respond(url, Response::Truncated(body.into()))
    }

    /// Replace (or add) the `200 OK` body for `url`.
    pub async fn set_response(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.responses.write().await.insert(Self::url(url), Response::Body(body.into()));
    }

    /// Every URL requested so far, in request order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    pub fn request_count(&self, url: &str) -> usize {
        let url = Self::url(url);
        self.requests().iter().filter(|requested| **requested == url).count()
    }

    /// Highest number of requests that were being answered at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn respond(mut self, url: &str, response: Response) -> Self {
        self.responses.get_mut().insert(Self::url(url), response);
        self
    }

    fn url(url: &str) -> Url {
        match Url::parse(url) {
            Ok(url) => url,
            // The panic here is DELIBERATE. MockSource is intended to be
            // used in tests; panics are expected.
            Err(e) => panic!("MockSource: invalid URL {url}: {e}"),
        }
    }

    /// Records the request and waits out the configured latency.
    async fn answer(&self, url: &Url) -> Result<Response> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.clone());
        }
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let response = self.responses.read().await.get(url).cloned().unwrap_or(Response::Status(404));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match response {
            Response::Status(status) => exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status,
            }),
            Response::Transport => exn::bail!(ErrorKind::Transport(url.to_string())),
            response => Ok(response),
        }
    }

    fn chunks(&self, body: &[u8]) -> Vec<Result<Bytes>> {
        body.chunks(self.chunk_size).map(|chunk| Ok(Bytes::copy_from_slice(chunk))).collect()
    }
}
impl Default for MockSource {
    fn default() -> Self {
        let responses: [(&str, Vec<u8>); 0] = [];
        Self::with_responses(responses)
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn page(&self, url: &Url) -> Result<Vec<u8>> {
        match self.answer(url).await? {
            Response::Body(body) => Ok(body),
            _ => exn::bail!(ErrorKind::Transport(url.to_string())),
        }
    }

    async fn stream(&self, url: &Url) -> Result<ByteStream> {
        let chunks = match self.answer(url).await? {
            Response::Body(body) => self.chunks(&body),
            Response::Truncated(body) => {
                let mut chunks = self.chunks(&body);
                chunks.push(Err(exn::Exn::from(ErrorKind::Transport(url.to_string()))));
                chunks
            },
            _ => exn::bail!(ErrorKind::Transport(url.to_string())),
        };
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}
