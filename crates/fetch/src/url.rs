//! URL parsing and resolution helpers.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use reqwest::Url;

/// Parses the site root, making sure it ends with `/` so that relative
/// landing paths are joined beneath it rather than replacing its last
/// segment.
///
/// # Examples
///
/// ```
/// use pinchy_fetch::base_url;
/// assert_eq!(base_url("http://pinchyandfriends.com").unwrap().as_str(), "http://pinchyandfriends.com/");
/// assert_eq!(base_url("http://example.com/mirror").unwrap().as_str(), "http://example.com/mirror/");
/// ```
pub fn base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).or_raise(|| ErrorKind::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        exn::bail!(ErrorKind::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolves a (possibly relative) link found on the page at `base`.
pub fn resolve(base: &Url, reference: &str) -> Result<Url> {
    base.join(reference.trim()).or_raise(|| ErrorKind::InvalidUrl(reference.to_string()))
}

/// The last non-empty path segment of `url`, used as a local file name.
///
/// Returns `None` for URLs whose path has no segments (`http://host/`).
pub fn file_name(url: &Url) -> Option<&str> {
    url.path_segments()?.rev().find(|segment| !segment.is_empty())
}
