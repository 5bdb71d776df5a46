use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Catalog (home) page.
pub(crate) const CATALOG_CONTAINER: &str = "#grid_rel";
selector!(CATALOG_CONTAINER_SELECTOR, CATALOG_CONTAINER);
pub(crate) const MIX_NAME_ATTR: &str = "data-name1";
pub(crate) const ARTIST_NAME_ATTR: &str = "data-name2";
pub(crate) const NAVIGATION_ATTR: &str = "onclick";
// window.location = '/5170/axe-to-grind/';
regex!(NAVIGATION_REGEX, r"^\s*window\.location\s*=\s*'([^']*)'\s*;?\s*$");

// Mix landing page.
pub(crate) const DOWNLOAD_LINK: &str = "#download a";
selector!(DOWNLOAD_LINK_SELECTOR, DOWNLOAD_LINK);
pub(crate) const GALLERY: &str = "#grid";
selector!(GALLERY_SELECTOR, GALLERY);
pub(crate) const GALLERY_IMAGE: &str = "#grid img";
selector!(IMAGE_SELECTOR, "img");
selector!(PARAGRAPH_SELECTOR, "p");
