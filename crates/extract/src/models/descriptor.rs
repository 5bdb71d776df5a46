use std::fmt::{Display, Formatter, Result as FmtResult};

/// One entry of the site's catalog.
///
/// The `mix_id` is always the first segment of `landing_path`; it names the
/// mix's directory in the archive and is what decides whether a mix has
/// already been archived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixDescriptor {
    /// Title of the mix
    pub mix_name: String,
    /// Name of the artist (or artists) behind the mix
    pub artist_name: String,
    /// Landing page, relative to the site root and without a leading slash
    /// (`5170/axe-to-grind/`)
    pub landing_path: String,
    /// Stable identifier taken from the landing path (`5170`)
    pub mix_id: String,
}
impl MixDescriptor {
    /// Returns `None` if the landing path has no leading segment to use as
    /// the mix identifier.
    pub fn new(
        mix_name: impl Into<String>,
        artist_name: impl Into<String>,
        landing_path: impl Into<String>,
    ) -> Option<Self> {
        let landing_path = landing_path.into().trim_start_matches('/').to_string();
        let mix_id = Self::mix_id_of(&landing_path)?.to_string();
        Some(Self {
            mix_name: mix_name.into(),
            artist_name: artist_name.into(),
            landing_path,
            mix_id,
        })
    }

    /// First `/`-delimited segment of a landing path, ignoring any leading slash.
    pub fn mix_id_of(landing_path: &str) -> Option<&str> {
        landing_path.trim_start_matches('/').split('/').next().filter(|segment| !segment.is_empty())
    }
}

impl Display for MixDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} - {} [{}]", self.artist_name, self.mix_name, self.mix_id)
    }
}
