//! Fixture site for unit tests.

use pinchy_extract::models::MixDescriptor;
use pinchy_fetch::MockSource;

pub const BASE: &str = "http://example.com/";

pub fn mix(id: &str) -> MixDescriptor {
    MixDescriptor::new(format!("Mix {id}"), format!("Artist {id}"), format!("/{id}/mix-{id}/")).unwrap()
}

pub fn landing_url(id: &str) -> String {
    format!("{BASE}{id}/mix-{id}/")
}

pub fn audio_url(id: &str) -> String {
    format!("{BASE}files/mixes/mix_{id}.mp3")
}

pub fn artwork_url(id: &str) -> String {
    format!("{BASE}files/zc/art_{id}.jpg")
}

pub fn landing_page(id: &str, tracklist: Option<&str>) -> String {
    let paragraph = tracklist.map(|text| format!("<p>{text}</p>")).unwrap_or_default();
    format!(
        r#"<html><body>
            <div id="download"><a href="/files/mixes/mix_{id}.mp3">Download</a></div>
            <div id="grid"><img src="/files/zc/art_{id}.jpg">{paragraph}</div>
        </body></html>"#
    )
}

/// Landing page, audio and artwork for every mix in `ids`.
pub fn site(ids: &[&str]) -> MockSource {
    let mut responses = Vec::new();
    for id in ids {
        responses.push((landing_url(id), landing_page(id, Some("1. One<br>2. Two")).into_bytes()));
        responses.push((audio_url(id), format!("audio for {id}").into_bytes()));
        responses.push((artwork_url(id), format!("artwork for {id}").into_bytes()));
    }
    MockSource::with_responses(responses)
}
