//! Catalog (home page) parsing.

use crate::consts;
use crate::error::{Defect, ErrorKind, Result};
use crate::models::MixDescriptor;
use exn::OptionExt;
use scraper::{ElementRef, Html};
use tracing::instrument;

/// Parsed catalog page.
///
/// Every mix on the site is a direct child element of `#grid_rel`:
///
/// ```html
/// <div id="grid_rel">
///     <div class="grid_img hand" data-name1="Axe to Grind" data-name2="Lovefingers"
///          onclick="window.location = '/5170/axe-to-grind/';">
///         <img src="/thumbs/440x440/files/zc/lovefingers_97960.jpg">
///     </div>
/// </div>
/// ```
///
/// `data-name1` holds the mix title and `data-name2` the artist.
#[derive(Debug)]
pub struct Catalog {
    document: Html,
}
impl Catalog {
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Invalid UTF-8 sequences are replaced with U+FFFD before parsing.
    pub fn from_bytes(html: &[u8]) -> Self {
        Self::from_html(&String::from_utf8_lossy(html))
    }

    /// All mixes listed in the catalog, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedCatalog`] if the catalog container is
    /// missing, or if any entry lacks one of its attributes or has a
    /// navigation script that doesn't match `window.location = '<path>';`.
    pub fn mixes(&self) -> Result<Vec<MixDescriptor>> {
        let container = self
            .document
            .select(&consts::CATALOG_CONTAINER_SELECTOR)
            .next()
            .ok_or_raise(|| ErrorKind::MalformedCatalog(Defect::MissingElement(consts::CATALOG_CONTAINER)))?;
        container.children().filter_map(ElementRef::wrap).map(Self::entry).collect()
    }

    fn entry(element: ElementRef<'_>) -> Result<MixDescriptor> {
        let mix_name = Self::attribute(element, consts::MIX_NAME_ATTR)?;
        let artist_name = Self::attribute(element, consts::ARTIST_NAME_ATTR)?;
        let script = Self::attribute(element, consts::NAVIGATION_ATTR)?;
        let landing_path = landing_path(script)?;
        MixDescriptor::new(mix_name, artist_name, landing_path)
            .ok_or_raise(|| ErrorKind::MalformedCatalog(Defect::Navigation(script.to_string())))
    }

    fn attribute<'a>(element: ElementRef<'a>, name: &'static str) -> Result<&'a str> {
        element
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_raise(|| ErrorKind::MalformedCatalog(Defect::MissingAttribute(name)))
    }
}

/// Extracts the landing path from an inline navigation script.
///
/// The script must be a single `window.location = '<path>';` assignment
/// (surrounding whitespace and the trailing semicolon are optional). The
/// quoted path is returned without its leading slash.
///
/// # Examples
///
/// ```rust
/// use pinchy_extract::landing_path;
/// assert_eq!(landing_path("window.location = '/5170/axe-to-grind/';").unwrap(), "5170/axe-to-grind/");
/// assert!(landing_path("location.href = '/5170/';").is_err());
/// ```
pub fn landing_path(script: &str) -> Result<&str> {
    consts::NAVIGATION_REGEX
        .captures(script)
        .and_then(|captures| captures.get(1))
        .map(|path| path.as_str().trim_start_matches('/'))
        .filter(|path| !path.is_empty())
        .ok_or_raise(|| ErrorKind::MalformedCatalog(Defect::Navigation(script.to_string())))
}

/// Easy, top-level entrypoint for turning the raw catalog page into the list
/// of mixes it advertises.
#[instrument(skip(html), fields(html_size = html.as_ref().len(), mixes))]
pub fn parse_catalog(html: impl AsRef<[u8]>) -> Result<Vec<MixDescriptor>> {
    let mixes = Catalog::from_bytes(html.as_ref()).mixes()?;
    tracing::Span::current().record("mixes", mixes.len());
    Ok(mixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(name: &str, artist: &str, id: &str, slug: &str) -> String {
        format!(
            r##"<div class="grid_img hand" data-name1="{name}" data-name2="{artist}" data-color="#51AEFF"
                    style="left:0px; top:0px;" onclick="window.location = '/{id}/{slug}/';">
                <img src="/thumbs/440x440/files/zc/{slug}.jpg" width="150" height="150" class="imgOff">
            </div>"##
        )
    }

    fn page(entries: &[String]) -> String {
        format!(
            r#"<!DOCTYPE html><html><body>
                <div id="header"><div data-name1="not" onclick="nope">decoy</div></div>
                <div id="grid_rel">
                    {}
                </div>
            </body></html>"#,
            entries.join("\n some stray text \n")
        )
    }

    #[test]
    fn test_parse_catalog() {
        let html = page(&[
            entry("Axe to Grind", "Lovefingers", "5170", "axe-to-grind"),
            entry("Summer Breeze", "DJ Example", "5171", "summer-breeze"),
            entry("Late Night", "Someone &amp; Friends", "42", "late-night"),
        ]);
        let mixes = parse_catalog(html).unwrap();
        assert_eq!(mixes.len(), 3);
        assert_eq!(
            mixes[0],
            MixDescriptor {
                mix_name: "Axe to Grind".to_string(),
                artist_name: "Lovefingers".to_string(),
                landing_path: "5170/axe-to-grind/".to_string(),
                mix_id: "5170".to_string(),
            }
        );
        assert_eq!(mixes[1].mix_id, "5171");
        assert_eq!(mixes[2].artist_name, "Someone & Friends");
        assert_eq!(mixes[2].landing_path, "42/late-night/");
        for mix in &mixes {
            assert!(!mix.mix_id.is_empty());
            assert!(!mix.mix_name.is_empty());
            assert!(!mix.artist_name.is_empty());
            assert!(!mix.landing_path.is_empty());
        }
    }

    #[test]
    fn test_empty_catalog() {
        let mixes = parse_catalog(page(&[])).unwrap();
        assert!(mixes.is_empty());
    }

    #[test]
    fn test_every_direct_child_is_an_entry() {
        let html = format!(
            r#"<div id="grid_rel">{}<span><div data-name1="x" data-name2="y" onclick="window.location = '/1/x/';"></div></span></div>"#,
            entry("Axe to Grind", "Lovefingers", "5170", "axe-to-grind"),
        );
        // The <span> is a direct child element, so it must carry the entry attributes too.
        let err = parse_catalog(html).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedCatalog(Defect::MissingAttribute("data-name1")));
    }

    #[test]
    fn test_missing_container() {
        let html = r#"<html><body><div id="grid"><div data-name1="a"></div></div></body></html>"#;
        let err = parse_catalog(html).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedCatalog(Defect::MissingElement("#grid_rel")));
    }

    #[rstest]
    #[case(r#"<div data-name2="b" onclick="window.location = '/1/a/';"></div>"#, "data-name1")]
    #[case(r#"<div data-name1="a" onclick="window.location = '/1/a/';"></div>"#, "data-name2")]
    #[case(r#"<div data-name1="a" data-name2="b"></div>"#, "onclick")]
    #[case(r#"<div data-name1="  " data-name2="b" onclick="window.location = '/1/a/';"></div>"#, "data-name1")]
    fn test_missing_attribute(#[case] child: &str, #[case] attribute: &'static str) {
        let html = format!(r#"<div id="grid_rel">{child}</div>"#);
        let err = parse_catalog(html).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedCatalog(Defect::MissingAttribute(attribute)));
    }

    #[test]
    fn test_bad_navigation_target() {
        let html = r#"<div id="grid_rel"><div data-name1="a" data-name2="b" onclick="openMix(5170)"></div></div>"#;
        let err = parse_catalog(html).unwrap_err();
        assert_eq!(*err, ErrorKind::MalformedCatalog(Defect::Navigation("openMix(5170)".to_string())));
    }

    #[rstest]
    #[case("window.location = '/5170/axe-to-grind/';", "5170/axe-to-grind/")]
    #[case("window.location='/5170/axe-to-grind/'", "5170/axe-to-grind/")]
    #[case("  window.location =   '/5170/';  ", "5170/")]
    #[case("window.location = '5170/axe-to-grind/';", "5170/axe-to-grind/")]
    fn test_landing_path(#[case] script: &str, #[case] expected: &str) {
        assert_eq!(landing_path(script).unwrap(), expected);
    }

    #[rstest]
    #[case("window.location = \"/5170/\";")]
    #[case("window.location = '/';")]
    #[case("window.location = '';")]
    #[case("alert('hi'); window.location = '/5170/';")]
    #[case("")]
    fn test_landing_path_invalid(#[case] script: &str) {
        let err = landing_path(script).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedCatalog(Defect::Navigation(_))));
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut html = page(&[entry("Axe to Grind", "Lovefingers", "5170", "axe-to-grind")]).into_bytes();
        html.extend_from_slice(&[0xff, 0xfe]);
        assert_eq!(parse_catalog(html).unwrap().len(), 1);
    }
}
