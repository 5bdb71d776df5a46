//! Name validation.
//!
//! Mix identifiers and file names come from a remote site and end up as path
//! components under the archive root, so they must never be able to point
//! anywhere else.

use crate::error::{ErrorKind, Result};
use std::path::{Component, Path};

/// Validates that `name` is exactly one plain path component.
///
/// # Examples
///
/// ```
/// use pinchy_storage::validate_name;
/// assert!(validate_name("5170").is_ok());
/// assert!(validate_name("lovefingers_axe_to_grind.mp3").is_ok());
/// assert!(validate_name("..").is_err());
/// assert!(validate_name("a/b").is_err());
/// assert!(validate_name("/etc").is_err());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate(name: &str) -> Result<&str> {
    let invalid = || ErrorKind::InvalidName(name.to_string());
    // Null bytes pass through Path::components() on Unix but cause
    // truncation in C-based syscalls; backslashes are separators elsewhere.
    if name.contains(['\0', '\\']) {
        exn::bail!(invalid());
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(component)), None) if component == name => Ok(name),
        _ => exn::bail!(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5170")]
    #[case("tracklist.txt")]
    #[case("lovefingers_97960.jpg")]
    #[case("with space.mp3")]
    #[case("..hidden")]
    fn test_valid(#[case] name: &str) {
        assert_eq!(validate(name).unwrap(), name);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("/")]
    #[case("/abs")]
    #[case("a/b")]
    #[case("trailing/")]
    #[case("./x")]
    #[case("a\\b")]
    #[case("a\0b")]
    fn test_invalid(#[case] name: &str) {
        let err = validate(name).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidName(n) if n == name));
    }
}
