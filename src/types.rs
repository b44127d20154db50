use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// The four tag values computed for one file in set mode.
///
/// An empty album, artist or year means "leave the existing value alone";
/// use the accessors to get that as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTags {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub year: String,
}

impl ResolvedTags {
    pub fn album(&self) -> Option<&str> {
        non_empty(&self.album)
    }

    pub fn artist(&self) -> Option<&str> {
        non_empty(&self.artist)
    }

    pub fn year(&self) -> Option<&str> {
        non_empty(&self.year)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// Current tags of one file, as printed by `list-tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct TagRecord {
    pub item: String,
    pub album: String,
    pub year: String,
    pub artist: String,
    pub title: String,
}

impl std::fmt::Display for TagRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "item: {}", self.item)?;
        writeln!(f, "album: {}", self.album)?;
        writeln!(f, "year: {}", self.year)?;
        writeln!(f, "artist: {}", self.artist)?;
        writeln!(f, "title: {}", self.title)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One `key: value` block per file, printed as files are found
    #[default]
    Records,
    /// A table of all files, printed once the walk has finished
    Table,
    /// A JSON array of all files, printed once the walk has finished
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_read_as_untouched() {
        let tags = ResolvedTags {
            title: "Come Together".into(),
            album: "Abbey Road".into(),
            artist: String::new(),
            year: "1969".into(),
        };

        assert_eq!(tags.album(), Some("Abbey Road"));
        assert_eq!(tags.artist(), None);
        assert_eq!(tags.year(), Some("1969"));
    }

    #[test]
    fn record_prints_in_fixed_order() {
        let record = TagRecord {
            item: "Come Together.mp3".into(),
            album: "Abbey Road".into(),
            year: "1969".into(),
            artist: "The Beatles".into(),
            title: "Come Together".into(),
        };

        assert_eq!(
            record.to_string(),
            "item: Come Together.mp3\nalbum: Abbey Road\nyear: 1969\nartist: The Beatles\ntitle: Come Together\n"
        );
    }
}
