//! HTTP(S) source backed by [`reqwest`].

use super::ByteStream;
use crate::Source;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use futures::StreamExt;
use reqwest::{Client, Response, Url};
use std::time::Duration;
use tracing::instrument;

const DEFAULT_USER_AGENT: &str = concat!("pinchy/", env!("CARGO_PKG_VERSION"));

/// Fetches resources over HTTP(S).
///
/// Wraps a single [`Client`] so connections are pooled across every request
/// made through the same source (and its clones).
///
/// # Examples
///
/// ```no_run
/// use pinchy_fetch::HttpSource;
/// use std::time::Duration;
///
/// # fn example() -> pinchy_fetch::error::Result<()> {
/// let source = HttpSource::new(None, Some(Duration::from_secs(60)))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpSource {
    name: String,
    client: Client,
}
impl HttpSource {
    /// Build a source with its own client.
    ///
    /// No timeout is applied unless one is given; a hung request only ever
    /// holds up the mix that made it.
    pub fn new(user_agent: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().or_raise(|| ErrorKind::Client)?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            name: "http".to_string(),
            client,
        }
    }

    async fn send(&self, url: &Url) -> Result<Response> {
        let response =
            self.client.get(url.clone()).send().await.or_raise(|| ErrorKind::Transport(url.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Source for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(level = "debug", skip(self), fields(url = %url, size))]
    async fn page(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.send(url).await?;
        let body = response.bytes().await.or_raise(|| ErrorKind::Transport(url.to_string()))?;
        tracing::Span::current().record("size", body.len());
        Ok(body.to_vec())
    }

    #[instrument(level = "debug", skip(self), fields(url = %url, content_length))]
    async fn stream(&self, url: &Url) -> Result<ByteStream> {
        let response = self.send(url).await?;
        if let Some(length) = response.content_length() {
            tracing::Span::current().record("content_length", length);
        }
        let url = url.to_string();
        Ok(Box::pin(
            response.bytes_stream().map(move |chunk| chunk.or_raise(|| ErrorKind::Transport(url.clone()))),
        ))
    }
}
