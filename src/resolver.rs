//! Works out title, album, artist and year for one file from its location.
//!
//! Music libraries tend to be laid out as `.../Artist/Year/Album/track.mp3`.
//! A negative index picks a directory name counted from the leaf, so one
//! invocation tags a whole tree consistently:
//!
//! ```text
//! /music/Beatles/1969/Abbey Road/Come Together.mp3
//!   components: ["", "music", "Beatles", "1969", "Abbey Road"]
//!   -1 => "Abbey Road", -2 => "1969", -3 => "Beatles"
//! ```
//!
//! Zero and positive indices never select anything.

use std::path::{MAIN_SEPARATOR, Path};

use crate::{config::SetConfig, types::ResolvedTags};

/// Splits a directory path on the platform separator, keeping empty
/// components from leading or trailing separators.
pub fn path_components(dir: &Path) -> Vec<String> {
    dir.to_string_lossy()
        .split(MAIN_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Resolves one field.
///
/// A non-empty `override_value` wins outright. Otherwise a negative `index`
/// counts back from the end of `components`; anything else, or an index that
/// reaches past the first component, resolves to the empty string.
pub fn path_item(components: &[String], index: i64, override_value: &str) -> String {
    if !override_value.is_empty() {
        return override_value.to_string();
    }
    if index >= 0 {
        return String::new();
    }

    let from_end = index.unsigned_abs();
    usize::try_from(from_end)
        .ok()
        .and_then(|k| components.len().checked_sub(k))
        .and_then(|position| components.get(position))
        .cloned()
        .unwrap_or_default()
}

/// Strips the extension (everything from the last `.`) from a base name once.
pub fn derive_title(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// Resolves the full tag set for the file `name` found in `dir`.
pub fn resolve(dir: &Path, name: &str, config: &SetConfig) -> ResolvedTags {
    let components = path_components(dir);

    ResolvedTags {
        title: derive_title(name).to_string(),
        album: path_item(&components, config.album_index, &config.album),
        artist: path_item(&components, config.artist_index, &config.artist),
        year: path_item(&components, config.year_index, &config.year),
    }
}
