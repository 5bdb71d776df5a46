use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use futures::StreamExt;
use pinchy_fetch::{ByteStream, SourceHandle, Url};
use pinchy_storage::{FileSink, is_file};
use std::path::Path;
use tracing::instrument;

/// What [`fetch_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFetch {
    /// The body was streamed to disk; carries the number of bytes written.
    Downloaded(u64),
    /// A regular file was already there, so nothing was requested.
    Skipped,
}

/// Download `remote_url` to `local_path`, writing the body chunk by chunk.
///
/// Unless `overwrite` is set, an existing regular file at `local_path` is
/// left alone and no request is made at all. The parent directory must
/// already exist.
///
/// If the body fails part way through, the partially written file is
/// removed (on a best-effort basis) before the error is returned.
///
/// # Errors
///
/// - [`ErrorKind::RemoteFetch`] on a non-2xx answer or a transport failure,
///   including one in the middle of the body.
/// - [`ErrorKind::LocalIo`] if the file can't be created or written.
#[instrument(skip(source, local_path, remote_url), fields(path = %local_path.display(), url = %remote_url, bytes))]
pub async fn fetch_file(
    source: &SourceHandle,
    local_path: &Path,
    remote_url: &Url,
    overwrite: bool,
) -> Result<FileFetch> {
    if !overwrite && is_file(local_path).await.or_raise(|| ErrorKind::LocalIo)? {
        tracing::debug!("File already present, not downloading");
        return Ok(FileFetch::Skipped);
    }

    // Only create the file once the server has answered successfully.
    let mut body = source.stream(remote_url).await.or_raise(|| ErrorKind::RemoteFetch)?;
    let mut sink = FileSink::create(local_path).await.or_raise(|| ErrorKind::LocalIo)?;
    if let Err(e) = write_body(&mut body, &mut sink).await {
        if let Err(cleanup) = sink.abandon().await {
            tracing::warn!(error = ?cleanup, "Could not remove partially written file");
        }
        return Err(e);
    }
    let written = sink.finish().await.or_raise(|| ErrorKind::LocalIo)?;
    tracing::Span::current().record("bytes", written);
    Ok(FileFetch::Downloaded(written))
}

async fn write_body(body: &mut ByteStream, sink: &mut FileSink) -> Result<()> {
    while let Some(chunk) = body.next().await {
        let chunk = chunk.or_raise(|| ErrorKind::RemoteFetch)?;
        tracing::trace!(len = chunk.len(), "Writing chunk");
        sink.write_chunk(&chunk).await.or_raise(|| ErrorKind::LocalIo)?;
    }
    Ok(())
}
