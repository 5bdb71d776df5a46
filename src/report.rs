use pinchy_library::MixDescriptor;

const ARTIST_HEADING: &str = "artist";
const NAME_HEADING: &str = "mix name";
pub const NOTHING_NEW: &str = "No new mixes.";

/// A table of mixes, one row per mix, with both columns padded to their
/// widest value:
///
/// ```text
/// |=========================|
/// |artist     |mix name     |
/// |=========================|
/// |Lovefingers|Axe to Grind |
/// |DJ Example |Summer Breeze|
/// |=========================|
/// ```
pub fn format_mix_table(mixes: &[MixDescriptor]) -> String {
    if mixes.is_empty() {
        return NOTHING_NEW.to_string();
    }
    let width = |heading: &str, column: fn(&MixDescriptor) -> &str| {
        mixes.iter().map(|mix| column(mix).chars().count()).chain([heading.len()]).max().unwrap_or_default()
    };
    let artist_width = width(ARTIST_HEADING, |mix| mix.artist_name.as_str());
    let name_width = width(NAME_HEADING, |mix| mix.mix_name.as_str());
    let separator = format!("|{}|", "=".repeat(artist_width + name_width + 1));
    let row = |artist: &str, name: &str| format!("|{artist:<artist_width$}|{name:<name_width$}|");

    let mut lines = vec![separator.clone(), row(ARTIST_HEADING, NAME_HEADING), separator.clone()];
    lines.extend(mixes.iter().map(|mix| row(&mix.artist_name, &mix.mix_name)));
    lines.push(separator);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mix(artist: &str, name: &str, id: &str) -> MixDescriptor {
        MixDescriptor::new(name, artist, format!("/{id}/")).unwrap()
    }

    #[test]
    fn test_table() {
        let table = format_mix_table(&[
            mix("Lovefingers", "Axe to Grind", "5170"),
            mix("DJ Example", "Summer Breeze", "5171"),
        ]);
        let expected = [
            "|=========================|",
            "|artist     |mix name     |",
            "|=========================|",
            "|Lovefingers|Axe to Grind |",
            "|DJ Example |Summer Breeze|",
            "|=========================|",
        ]
        .join("\n");
        assert_eq!(table, expected);
    }

    #[test]
    fn test_headings_set_minimum_width() {
        let table = format_mix_table(&[mix("A", "B", "1")]);
        assert_eq!(table.lines().nth(3), Some("|A     |B       |"));
        assert!(table.lines().all(|line| line.chars().count() == 17));
    }

    #[test]
    fn test_width_counts_characters() {
        let table = format_mix_table(&[mix("Röyksopp", "Ça va", "1"), mix("Someone Else", "x", "2")]);
        assert_eq!(table.lines().nth(3), Some("|Röyksopp    |Ça va   |"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_mix_table(&[]), NOTHING_NEW);
    }
}
