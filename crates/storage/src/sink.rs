//! Incremental file writes.

use crate::error::{ErrorKind, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

/// A file being written chunk by chunk, so large downloads never have to be
/// held in memory.
///
/// The file is created (or truncated) when the sink is created. Dropping the
/// sink without calling [`FileSink::finish`] may lose buffered data; the
/// partial file is left where it is.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}
impl FileSink {
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer.write_all(chunk).await.map_err(|e| ErrorKind::from_io(e, &self.path))?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Flush everything to disk and return the number of bytes written.
    pub async fn finish(mut self) -> Result<u64> {
        self.writer.flush().await.map_err(|e| ErrorKind::from_io(e, &self.path))?;
        self.writer.get_mut().sync_all().await.map_err(|e| ErrorKind::from_io(e, &self.path))?;
        Ok(self.written)
    }

    /// Close and delete the partially written file.
    pub async fn abandon(self) -> Result<()> {
        let Self { path, writer, .. } = self;
        drop(writer);
        fs::remove_file(&path).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        Ok(())
    }
}

/// Whether `path` exists and is a regular file (following symlinks).
pub async fn is_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => exn::bail!(ErrorKind::from_io(e, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chunked_write() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mix.mp3");
        let mut sink = FileSink::create(&path).await.unwrap();
        for chunk in [b"abc".as_slice(), b"", b"defg"] {
            sink.write_chunk(chunk).await.unwrap();
        }
        assert_eq!(sink.finish().await.unwrap(), 7);
        assert_eq!(std::fs::read(&path).unwrap(), b"abcdefg");
    }

    #[tokio::test]
    async fn test_create_truncates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mix.mp3");
        std::fs::write(&path, b"a much longer previous body").unwrap();
        let mut sink = FileSink::create(&path).await.unwrap();
        sink.write_chunk(b"new").await.unwrap();
        sink.finish().await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_abandon_removes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mix.mp3");
        let mut sink = FileSink::create(&path).await.unwrap();
        sink.write_chunk(b"partial").await.unwrap();
        sink.abandon().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_create_in_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing/mix.mp3");
        let err = FileSink::create(&path).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(p) if *p == path));
    }

    #[tokio::test]
    async fn test_is_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("cover.jpg");
        std::fs::write(&file, b"jpg").unwrap();
        assert!(is_file(&file).await.unwrap());
        assert!(!is_file(temp_dir.path()).await.unwrap());
        assert!(!is_file(temp_dir.path().join("absent.jpg")).await.unwrap());
    }
}
