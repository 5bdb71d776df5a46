use crate::Context;
use crate::detail::{fetch_detail_at, landing_url};
use crate::error::{ErrorKind, Result};
use crate::file::{FileFetch, fetch_file};
use exn::ResultExt;
use pinchy_extract::models::MixDescriptor;
use pinchy_fetch::{Url, file_name, resolve};
use pinchy_storage::validate_name;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Name of the file the tracklist text is written to.
pub const TRACKLIST_FILE: &str = "tracklist.txt";

/// Where the files of a successfully archived mix ended up.
///
/// Together with the descriptor's names this is everything an external
/// record keeper needs to catalogue the mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedMix {
    pub descriptor: MixDescriptor,
    /// The mix's directory, `<archive root>/<mix id>`.
    pub directory: PathBuf,
    pub audio: PathBuf,
    pub artwork: PathBuf,
    /// Only present if the landing page had tracklist text.
    pub tracklist: Option<PathBuf>,
}
impl ArchivedMix {
    /// Location of one of this mix's files relative to the archive root
    /// (`5170/lovefingers_axe_to_grind.mp3`), as stored by record keepers.
    pub fn location(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        Some(format!("{}/{name}", self.descriptor.mix_id))
    }
}

/// Archive everything belonging to one mix.
///
/// Steps run strictly in order, and the first failure ends the mix:
///
/// 1. Fetch and parse the landing page. Nothing is created on disk if this
///    fails.
/// 2. Work out local file names from the last path segment of the audio and
///    artwork links (resolved against the landing page URL).
/// 3. Create `<archive root>/<mix id>`.
/// 4. Download the audio file, then the artwork.
/// 5. Write `tracklist.txt` if the page had any tracklist text.
///
/// A failure after step 3 leaves the directory behind with whatever was
/// written so far. Since the directory's existence is what marks a mix as
/// archived, later runs will not pick the mix up again.
// TODO: download into a staging directory and rename it into place once
//       every file is written, so incomplete mixes are retried next run.
#[instrument(skip(ctx, descriptor), fields(mix_id = %descriptor.mix_id))]
pub async fn archive_mix(ctx: &Context, descriptor: &MixDescriptor) -> Result<ArchivedMix> {
    tracing::info!(artist = %descriptor.artist_name, mix = %descriptor.mix_name, "Archiving mix");
    let landing = landing_url(ctx, descriptor)?;
    let detail = fetch_detail_at(ctx, &landing).await?;
    let audio_url = resolve(&landing, &detail.audio_url).or_raise(|| ErrorKind::MalformedDetailPage)?;
    let artwork_url = resolve(&landing, &detail.artwork_url).or_raise(|| ErrorKind::MalformedDetailPage)?;
    let audio_name = local_name(&audio_url)?;
    let artwork_name = local_name(&artwork_url)?;

    let directory = ctx.root.create_mix_dir(&descriptor.mix_id).await.or_raise(|| ErrorKind::LocalIo)?;
    let audio = directory.file_path(audio_name).or_raise(|| ErrorKind::LocalIo)?;
    download(ctx, &audio, &audio_url).await?;
    let artwork = directory.file_path(artwork_name).or_raise(|| ErrorKind::LocalIo)?;
    download(ctx, &artwork, &artwork_url).await?;
    let tracklist = match &detail.tracklist {
        Some(text) => Some(directory.write_text(TRACKLIST_FILE, text).await.or_raise(|| ErrorKind::LocalIo)?),
        None => None,
    };

    tracing::info!(directory = %directory.path().display(), "Archived mix");
    Ok(ArchivedMix {
        descriptor: descriptor.clone(),
        directory: directory.path().to_path_buf(),
        audio,
        artwork,
        tracklist,
    })
}

/// The remote file name, if it is usable as a local one.
fn local_name(url: &Url) -> Result<&str> {
    validate_name(file_name(url).unwrap_or_default()).or_raise(|| ErrorKind::LocalIo)
}

async fn download(ctx: &Context, path: &Path, url: &Url) -> Result<()> {
    match fetch_file(&ctx.source, path, url, false).await? {
        FileFetch::Downloaded(bytes) => tracing::info!(path = %path.display(), bytes, "Downloaded file"),
        FileFetch::Skipped => tracing::info!(path = %path.display(), "File already present"),
    }
    Ok(())
}
