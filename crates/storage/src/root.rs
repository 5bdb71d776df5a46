//! The archive root directory and the per-mix directories inside it.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_name;
use crate::sink::FileSink;
use std::collections::HashSet;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Directory holding one sub-directory per archived mix, named by mix
/// identifier.
///
/// # Examples
///
/// ```no_run
/// use pinchy_storage::ArchiveRoot;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let root = ArchiveRoot::open("/home/me/media/audio/pinchy")?;
/// let archived = root.inventory().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveRoot {
    root: PathBuf,
}
impl ArchiveRoot {
    /// Open the archive root, creating it (and any missing parents) if it
    /// doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidPath`] if the path is relative or exists but
    /// is not a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            // Happens once at startup; not worth making the constructor async.
            tracing::debug!(path = %root.display(), "Creating archive root");
            sync_create_dir(&root).map_err(|e| ErrorKind::from_io(e, &root))?;
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Identifiers of every mix already present: the names of the direct
    /// sub-directories of the root. Regular files are ignored, as are
    /// directory names that aren't valid UTF-8.
    #[instrument(skip(self), fields(root = %self.root.display(), mixes))]
    pub async fn inventory(&self) -> Result<HashSet<String>> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| ErrorKind::from_io(e, &self.root))?;
        let mut mix_ids = HashSet::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| ErrorKind::from_io(e, &self.root))? {
            let path = entry.path();
            // Follows symlinks, so a linked mix directory still counts.
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => exn::bail!(ErrorKind::from_io(e, &path)),
            };
            if !metadata.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => {
                    mix_ids.insert(name);
                },
                Err(name) => tracing::debug!(name = ?name, "Ignoring directory with non UTF-8 name"),
            }
        }
        tracing::Span::current().record("mixes", mix_ids.len());
        Ok(mix_ids)
    }

    /// Path of the directory for `mix_id`, whether or not it exists.
    pub fn mix_path(&self, mix_id: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_name(mix_id)?))
    }

    /// Create (if needed) and return the directory for `mix_id`.
    pub async fn create_mix_dir(&self, mix_id: &str) -> Result<MixDir> {
        let path = self.mix_path(mix_id)?;
        fs::create_dir_all(&path).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        Ok(MixDir {
            mix_id: mix_id.to_string(),
            path,
        })
    }
}

/// An existing directory holding the files of one mix.
#[derive(Debug, Clone)]
pub struct MixDir {
    mix_id: String,
    path: PathBuf,
}
impl MixDir {
    pub fn mix_id(&self) -> &str {
        &self.mix_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `file_name` inside this directory.
    pub fn file_path(&self, file_name: &str) -> Result<PathBuf> {
        Ok(self.path.join(validate_name(file_name)?))
    }

    /// Start writing `file_name`, replacing any existing file.
    pub async fn create_file(&self, file_name: &str) -> Result<FileSink> {
        FileSink::create(self.file_path(file_name)?).await
    }

    /// Write `text` to `file_name` in one go, replacing any existing file.
    pub async fn write_text(&self, file_name: &str, text: &str) -> Result<PathBuf> {
        let path = self.file_path(file_name)?;
        fs::write(&path, text).await.map_err(|e| ErrorKind::from_io(e, &path))?;
        Ok(path)
    }
}
