use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// Archive the mixes published on pinchyandfriends.com.
///
/// Every mix gets its own directory, named by its identifier, holding the
/// audio file, the artwork and (when there is one) the tracklist. Mixes whose
/// directory already exists are skipped.
#[derive(Debug, Parser)]
#[command(name = "pinchy", version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "download"])))]
pub struct Cli {
    /// Print the mixes on the site that aren't archived yet.
    #[arg(long)]
    pub list: bool,

    /// Archive every mix that isn't archived yet.
    #[arg(long)]
    pub download: bool,

    /// Number of mixes to archive at the same time.
    #[arg(long, visible_alias = "threads", value_name = "N")]
    pub workers: Option<usize>,

    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Archive directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Site to archive from.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// More logging; repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Download,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.list { Mode::List } else { Mode::Download }
    }
}
