//! Archiving of mixes into the local archive.
//!
//! The pieces, from the bottom up:
//!
//! - [`fetch_catalog`] and [`missing`]: what the site lists, and which of those
//!   aren't in the archive yet.
//! - [`fetch_mix_detail`]: the links on a mix's landing page.
//! - [`fetch_file`]: a single streamed download, skipped if the file is
//!   already there.
//! - [`archive_mix`]: everything for one mix, in order.
//! - [`archive`] and [`run_all`]: many mixes at once, with bounded
//!   concurrency and failures isolated per mix.

mod archive;
mod catalog;
mod detail;
pub mod error;
mod file;
mod schedule;
#[cfg(test)]
mod testing;

pub use crate::archive::{ArchivedMix, TRACKLIST_FILE, archive_mix};
pub use crate::catalog::{fetch_catalog, missing, pending};
pub use crate::detail::fetch_mix_detail;
pub use crate::file::{FileFetch, fetch_file};
pub use crate::schedule::{ArchiveEvent, archive, run_all};
pub use pinchy_extract::models::{MixDescriptor, MixDetail};
use pinchy_fetch::{SourceHandle, Url};
use pinchy_storage::ArchiveRoot;

/// Everything an archiving run needs, passed explicitly rather than read from
/// globals so runs can be pointed at fixtures.
#[derive(Clone)]
pub struct Context {
    /// Site root, ending with `/`. See [`pinchy_fetch::base_url`].
    pub base_url: Url,
    pub source: SourceHandle,
    pub root: ArchiveRoot,
}
impl Context {
    pub fn new(base_url: Url, source: SourceHandle, root: ArchiveRoot) -> Self {
        Self { base_url, source, root }
    }
}
