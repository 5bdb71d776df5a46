use directories::{BaseDirs, ProjectDirs};
use std::path::{Component, Path, PathBuf};

const ARCHIVE_DIR: &str = "media/audio/pinchy";

/// `~/media/audio/pinchy`, or the same path relative to the working directory
/// if the home directory cannot be determined.
pub fn default_archive_root() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(ARCHIVE_DIR),
        None => PathBuf::from(ARCHIVE_DIR),
    }
}

/// `config.toml` inside the platform's configuration directory for pinchy.
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pinchy").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Replaces a leading `~` component with the user's home directory.
///
/// Paths not starting with `~` (including `~user/...`) are returned as-is.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(expand_home("~/mixes"), home.join("mixes"));
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("/srv/mixes"), PathBuf::from("/srv/mixes"));
        assert_eq!(expand_home("relative/~/mixes"), PathBuf::from("relative/~/mixes"));
        assert_eq!(expand_home("~other/mixes"), PathBuf::from("~other/mixes"));
    }

    #[test]
    fn test_default_config_file() {
        if let Some(path) = default_config_file() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
