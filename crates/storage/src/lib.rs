//! On-disk layout of the archive.
//!
//! ```text
//! <archive root>/
//!     <mix id>/
//!         <audio file>
//!         <artwork file>
//!         tracklist.txt
//! ```
//!
//! A mix counts as archived as soon as its directory exists.

pub mod error;
mod path;
mod root;
mod sink;

use crate::error::{ErrorKind, Result};
pub use crate::path::validate as validate_name;
pub use crate::root::{ArchiveRoot, MixDir};
pub use crate::sink::{FileSink, is_file};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Identifiers of the mixes already archived under `root`, creating the root
/// if it doesn't exist yet. A relative `root` is taken from the current
/// working directory.
pub async fn list_local_mix_ids(root: impl AsRef<Path>) -> Result<HashSet<String>> {
    ArchiveRoot::open(absolute_root(root.as_ref())?)?.inventory().await
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(root).map_err(|e| ErrorKind::from_io(e, root))?)
}
