//! A small fake of the site: a catalog page, and a landing page, audio file
//! and artwork for every mix on it.

use pinchy_fetch::{MockSource, base_url};
use pinchy_library::Context;
use pinchy_storage::ArchiveRoot;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub const BASE: &str = "http://pinchy.test/";

pub struct Mix {
    pub id: &'static str,
    pub name: &'static str,
    pub artist: &'static str,
    pub tracklist: Option<&'static str>,
}

pub const A: Mix = Mix {
    id: "5170",
    name: "Axe to Grind",
    artist: "Lovefingers",
    tracklist: Some("1. Alpha<br>2. Beta"),
};
pub const B: Mix = Mix {
    id: "5171",
    name: "Summer Breeze",
    artist: "DJ Example",
    tracklist: None,
};
pub const C: Mix = Mix {
    id: "5172",
    name: "Late Night",
    artist: "Someone &amp; Friends",
    tracklist: Some("Unknown - Unknown"),
};

impl Mix {
    pub fn landing_url(&self) -> String {
        format!("{BASE}{}/{}/", self.id, self.slug())
    }

    pub fn audio_url(&self) -> String {
        format!("{BASE}files/mixes/{}.mp3", self.slug())
    }

    /// Artwork is linked relative to the landing page.
    pub fn artwork_url(&self) -> String {
        format!("{BASE}{}/{}/cover_{}.jpg", self.id, self.slug(), self.id)
    }

    fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }

    fn catalog_entry(&self) -> String {
        format!(
            r##"<div class="grid_img hand" data-name1="{}" data-name2="{}" data-color="#FFFFFF"
                    onclick="window.location = '/{}/{}/';"><img src="/thumbs/{}.jpg"></div>"##,
            self.name,
            self.artist,
            self.id,
            self.slug(),
            self.id,
        )
    }

    fn landing_page(&self) -> String {
        let paragraph = self.tracklist.map(|text| format!("<p>{text}</p>")).unwrap_or_default();
        format!(
            r#"<html><body>
                <div id="download"><a href="{}">Download</a></div>
                <div id="grid"><img src="cover_{}.jpg" width="440">{paragraph}</div>
            </body></html>"#,
            self.audio_url(),
            self.id,
        )
    }
}

pub fn catalog_page(mixes: &[&Mix]) -> String {
    let entries: Vec<String> = mixes.iter().map(|mix| mix.catalog_entry()).collect();
    format!(r#"<html><body><div id="grid_rel">{}</div></body></html>"#, entries.join("\n"))
}

pub fn site(mixes: &[&Mix]) -> MockSource {
    let mut responses = vec![(BASE.to_string(), catalog_page(mixes).into_bytes())];
    for mix in mixes {
        responses.push((mix.landing_url(), mix.landing_page().into_bytes()));
        responses.push((mix.audio_url(), format!("audio {}", mix.id).into_bytes()));
        responses.push((mix.artwork_url(), format!("artwork {}", mix.id).into_bytes()));
    }
    MockSource::with_responses(responses)
}

pub fn context(source: Arc<MockSource>, root: &Path) -> Context {
    Context::new(base_url(BASE).unwrap(), source, ArchiveRoot::open(root).unwrap())
}

/// Every file under `root`, relative to it, with its contents.
pub fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for dir in std::fs::read_dir(root).unwrap() {
        let dir = dir.unwrap();
        for file in std::fs::read_dir(dir.path()).unwrap() {
            let file = file.unwrap();
            let name = format!(
                "{}/{}",
                dir.file_name().to_string_lossy(),
                file.file_name().to_string_lossy()
            );
            files.insert(name, std::fs::read(file.path()).unwrap());
        }
    }
    files
}
