//! Configuration management for tagwalk.
//!
//! Settings come from three places, highest priority first:
//! 1. Command-line flags
//! 2. Environment variables (`TAGWALK_PATH`, `TAGWALK_ID3_VERSION`)
//! 3. A `.env` file in the local data directory
//!
//! Flags and environment are merged by clap in `main.rs`; this module only
//! loads the `.env` file and holds the resulting per-run configuration.

use std::path::PathBuf;

use clap::ValueEnum;

/// Environment variable holding the default root path.
pub const PATH_ENV: &str = "TAGWALK_PATH";

/// Environment variable holding the default ID3 write version.
pub const ID3_VERSION_ENV: &str = "TAGWALK_ID3_VERSION";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up at:
/// - Linux: `~/.local/share/tagwalk/.env`
/// - macOS: `~/Library/Application Support/tagwalk/.env`
/// - Windows: `%LOCALAPPDATA%/tagwalk/.env`
///
/// A missing file is not an error. Variables already set in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the file exists but cannot be read or parsed.
pub fn load_env() -> Result<Option<PathBuf>, String> {
    let path = env_file_path();
    if !path.is_file() {
        return Ok(None);
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(Some(path))
}

/// Location of the optional `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tagwalk/.env");
    path
}

/// Returns the root path to walk.
///
/// An absent or empty `--path` (or `TAGWALK_PATH`) means the current directory.
pub fn root_or_current(path: Option<String>) -> String {
    match path {
        Some(path) if !path.is_empty() => path,
        _ => ".".to_string(),
    }
}

/// Set-mode configuration, built once per run.
///
/// Each non-empty override wins over the matching index. Only negative
/// indices select a path component (`-1` is the directory holding the file,
/// `-2` its parent, and so on); zero and positive indices select nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetConfig {
    pub album: String,
    pub artist: String,
    pub year: String,
    pub album_index: i64,
    pub year_index: i64,
    pub artist_index: i64,
}

/// Which ID3v2 revision a save writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum WriteVersion {
    /// Keep the revision the file already has (2.4 for untagged files)
    #[default]
    Keep,
    #[value(name = "2.3")]
    V23,
    #[value(name = "2.4")]
    V24,
}

impl WriteVersion {
    /// Picks the revision to write for a tag that was read as `existing`.
    ///
    /// ID3v2.2 cannot be written, so such tags are upgraded to 2.3.
    pub fn resolve(self, existing: id3::Version) -> id3::Version {
        match self {
            WriteVersion::V23 => id3::Version::Id3v23,
            WriteVersion::V24 => id3::Version::Id3v24,
            WriteVersion::Keep => match existing {
                id3::Version::Id3v22 => id3::Version::Id3v23,
                other => other,
            },
        }
    }
}
