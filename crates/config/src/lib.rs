//! Layered configuration for pinchy.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. Built-in defaults (see [`Config::default`]).
//! 2. A configuration file: TOML, YAML or JSON depending on its extension.
//!    When no file is given, `<config dir>/pinchy/config.toml` is read if it
//!    exists.
//! 3. Environment variables prefixed with `PINCHY_`; nested keys are separated
//!    with a double underscore (`PINCHY_HTTP__TIMEOUT_SECS=30`).
//!
//! Command-line overrides are applied by the caller on the returned
//! [`Config`], followed by another [`Config::validate`].

pub mod error;
mod paths;

use crate::error::{ErrorKind, Result};
pub use crate::paths::{default_archive_root, default_config_file, expand_home};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_BASE_URL: &str = "http://pinchyandfriends.com";
pub const DEFAULT_WORKERS: usize = 1;
const ENV_PREFIX: &str = "PINCHY_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one sub-directory per archived mix.
    pub archive_root: PathBuf,
    /// Site root; the catalog is fetched from here and landing paths are
    /// resolved against it.
    pub base_url: String,
    /// Maximum number of mixes archived at the same time.
    pub workers: usize,
    #[serde(default)]
    pub http: HttpConfig,
}

/// HTTP client settings. Nothing in the archiver itself imposes a timeout;
/// this is the only place one can be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}
impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_root: default_archive_root(),
            base_url: DEFAULT_BASE_URL.to_string(),
            workers: DEFAULT_WORKERS,
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate the configuration.
    ///
    /// An explicitly given `file` must exist; the default location is
    /// optional.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_config_file().filter(|path| path.is_file()),
        };
        if let Some(path) = &file {
            tracing::debug!(path = %path.display(), "Reading configuration file");
        }
        Self::from_figment(Self::figment(file.as_deref()))
    }

    /// The merged configuration sources, before extraction.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().map_err(|e| exn::Exn::from(ErrorKind::Load(e.to_string())))?;
        config.validate()
    }

    /// Expands `~/` in the archive root and checks every value is usable.
    pub fn validate(mut self) -> Result<Self> {
        self.archive_root = expand_home(&self.archive_root);
        if self.workers == 0 {
            exn::bail!(ErrorKind::Invalid {
                field: "workers",
                value: self.workers.to_string(),
            });
        }
        let base_url = self.base_url.trim();
        let has_host = ["http://", "https://"].iter().any(|scheme| {
            base_url.len() > scheme.len()
                && base_url.get(..scheme.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        });
        if !has_host {
            exn::bail!(ErrorKind::Invalid {
                field: "base_url",
                value: self.base_url.clone(),
            });
        }
        self.base_url = base_url.to_string();
        if self.http.timeout_secs == Some(0) {
            exn::bail!(ErrorKind::Invalid {
                field: "http.timeout_secs",
                value: "0".to_string(),
            });
        }
        Ok(self)
    }
}
