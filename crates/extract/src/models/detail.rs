/// Resources linked from a mix's landing page.
///
/// URLs are kept exactly as they appear in the markup (they may be relative);
/// resolving them is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixDetail {
    /// Target of the download link
    pub audio_url: String,
    /// Source of the gallery image
    pub artwork_url: String,
    /// Tracklist text from the gallery paragraph, if there is any
    pub tracklist: Option<String>,
}
