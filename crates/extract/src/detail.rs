//! Mix landing page parsing.

use crate::consts;
use crate::error::{Defect, ErrorKind, Result};
use crate::models::MixDetail;
use exn::OptionExt;
use scraper::{ElementRef, Html};
use tracing::instrument;

/// Parsed landing page of a single mix.
///
/// The page links the audio file from `#download a[href]`; the artwork is the
/// `img` inside the `#grid` gallery and the tracklist is the gallery's `p`.
#[derive(Debug)]
pub struct DetailPage {
    document: Html,
}
impl DetailPage {
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn from_bytes(html: &[u8]) -> Self {
        Self::from_html(&String::from_utf8_lossy(html))
    }

    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDetailPage`] if the download link or the
    /// gallery image (or their link attributes) are missing. A missing
    /// tracklist is not an error.
    pub fn detail(&self) -> Result<MixDetail> {
        let gallery = self
            .document
            .select(&consts::GALLERY_SELECTOR)
            .next()
            .ok_or_raise(|| ErrorKind::MalformedDetailPage(Defect::MissingElement(consts::GALLERY)))?;
        Ok(MixDetail {
            audio_url: self.audio_url()?,
            artwork_url: Self::artwork_url(gallery)?,
            tracklist: Self::tracklist(gallery),
        })
    }

    fn audio_url(&self) -> Result<String> {
        let anchor = self
            .document
            .select(&consts::DOWNLOAD_LINK_SELECTOR)
            .next()
            .ok_or_raise(|| ErrorKind::MalformedDetailPage(Defect::MissingElement(consts::DOWNLOAD_LINK)))?;
        Self::link(anchor, "href")
    }

    fn artwork_url(gallery: ElementRef<'_>) -> Result<String> {
        let image = gallery
            .select(&consts::IMAGE_SELECTOR)
            .next()
            .ok_or_raise(|| ErrorKind::MalformedDetailPage(Defect::MissingElement(consts::GALLERY_IMAGE)))?;
        Self::link(image, "src")
    }

    fn link(element: ElementRef<'_>, attribute: &'static str) -> Result<String> {
        element
            .value()
            .attr(attribute)
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string)
            .ok_or_raise(|| ErrorKind::MalformedDetailPage(Defect::MissingAttribute(attribute)))
    }

    /// Text of the gallery paragraph, with `<br>` rendered as a line break.
    fn tracklist(gallery: ElementRef<'_>) -> Option<String> {
        let paragraph = gallery.select(&consts::PARAGRAPH_SELECTOR).next()?;
        let mut text = String::new();
        for node in paragraph.descendants() {
            if let Some(fragment) = node.value().as_text() {
                text.push_str(fragment);
            } else if let Some(element) = node.value().as_element()
                && element.name() == "br"
            {
                text.push('\n');
            }
        }
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Top-level entrypoint for extracting the resource links from a raw mix
/// landing page.
#[instrument(skip(html), fields(html_size = html.as_ref().len()))]
pub fn parse_detail(html: impl AsRef<[u8]>) -> Result<MixDetail> {
    DetailPage::from_bytes(html.as_ref()).detail()
}
