//! Recursive discovery of MP3 files below a root directory.
//!
//! - Depth-first: a subdirectory is descended into as soon as it is listed
//! - Only names ending in [`AUDIO_EXTENSION`] are reported (case-sensitive)
//! - The first directory that cannot be listed ends the walk
//!
//! The filesystem sits behind [`Filesystem`] so the walk can be driven over
//! something other than the real disk.

use std::{
    ffi::{OsStr, OsString},
    fs, io,
    path::{Component, Path, PathBuf},
};

use crate::error::{Result, TagError};

/// File name suffix of the one container format handled.
pub const AUDIO_EXTENSION: &str = ".mp3";

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: OsString,
    pub is_dir: bool,
}

impl Entry {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>>;
}

/// The real disk.
///
/// Symbolic links are not followed into: a link to a directory is treated
/// like a file entry, which keeps link cycles from looping forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            entries.push(Entry {
                name: entry.file_name(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        // sorted by name, so logs come out in a stable order
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// An audio file found by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// The directory the file was listed in, as reached from the root.
    pub dir: PathBuf,
    /// Base name of the file.
    pub name: String,
}

pub fn is_audio(name: &str) -> bool {
    name.ends_with(AUDIO_EXTENSION)
}

/// Joins `name` onto `dir` and cleans the result lexically.
///
/// `.` components are dropped and `..` cancels the component before it, so a
/// walk started at `.` reaches `Beatles/1969` rather than `./Beatles/1969`.
/// `..` directly below the filesystem root is dropped; leading `..` of a
/// relative path is kept. An empty result is `.`.
pub fn join_clean(dir: &Path, name: &OsStr) -> PathBuf {
    let joined = dir.join(name);
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}

/// Lazy depth-first sequence of the audio files below a root.
///
/// Yields `Err` at most once, for the first directory that could not be
/// listed, and nothing after it.
pub struct AudioFiles<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    root: Option<PathBuf>,
    stack: Vec<(PathBuf, std::vec::IntoIter<Entry>)>,
    failed: bool,
}

impl<'a, F: Filesystem + ?Sized> AudioFiles<'a, F> {
    pub fn new(fs: &'a F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: Some(root.into()),
            stack: Vec::new(),
            failed: false,
        }
    }

    fn descend(&mut self, dir: PathBuf) -> Result<()> {
        match self.fs.list(&dir) {
            Ok(entries) => {
                self.stack.push((dir, entries.into_iter()));
                Ok(())
            }
            Err(source) => {
                self.failed = true;
                self.stack.clear();
                Err(TagError::DirectoryListFailed { path: dir, source })
            }
        }
    }
}

impl<F: Filesystem + ?Sized> Iterator for AudioFiles<'_, F> {
    type Item = Result<AudioFile>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(root) = self.root.take() {
            if let Err(e) = self.descend(root) {
                return Some(Err(e));
            }
        }

        loop {
            let (dir, entries) = self.stack.last_mut()?;
            let Some(entry) = entries.next() else {
                self.stack.pop();
                continue;
            };

            let path = join_clean(dir, &entry.name);
            if entry.is_dir {
                if let Err(e) = self.descend(path) {
                    return Some(Err(e));
                }
                continue;
            }

            let name = entry.name.to_string_lossy();
            if is_audio(&name) {
                return Some(Ok(AudioFile {
                    dir: dir.clone(),
                    name: name.into_owned(),
                    path,
                }));
            }
        }
    }
}

/// Calls `visit` for every audio file below `root`, in walk order.
///
/// Fails with [`TagError::PathNotFound`] before listing anything if `root`
/// does not exist. Stops at the first error, whether it comes from listing a
/// directory or from `visit`. Returns the number of files visited.
pub fn walk<F, V>(fs: &F, root: impl AsRef<Path>, mut visit: V) -> Result<usize>
where
    F: Filesystem + ?Sized,
    V: FnMut(&AudioFile) -> Result<()>,
{
    let root = root.as_ref();
    if !fs.exists(root) {
        return Err(TagError::PathNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut visited = 0;
    for file in AudioFiles::new(fs, root) {
        visit(&file?)?;
        visited += 1;
    }
    Ok(visited)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_sensitive_suffix() {
        assert!(is_audio("track.mp3"));
        assert!(is_audio("a.b.mp3"));
        assert!(!is_audio("track.MP3"));
        assert!(!is_audio("track.mp3.bak"));
        assert!(!is_audio("cover.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn joined_paths_are_cleaned() {
        let join = |dir: &str, name: &str| join_clean(Path::new(dir), OsStr::new(name));

        assert_eq!(join(".", "Beatles"), PathBuf::from("Beatles"));
        assert_eq!(join("./music", "Beatles"), PathBuf::from("music/Beatles"));
        assert_eq!(join("a/./b", "c"), PathBuf::from("a/b/c"));
        assert_eq!(join("a/b/../c", "d"), PathBuf::from("a/c/d"));
        assert_eq!(join("../up", "a"), PathBuf::from("../up/a"));
        assert_eq!(join("/..", "a"), PathBuf::from("/a"));
        assert_eq!(join("/music/", "Abbey Road"), PathBuf::from("/music/Abbey Road"));
    }

    #[test]
    fn os_listing_marks_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("b_dir")).unwrap();
        fs::write(tmp.path().join("a.mp3"), b"").unwrap();

        let entries = OsFilesystem.list(tmp.path()).unwrap();

        assert_eq!(entries, vec![Entry::file("a.mp3"), Entry::dir("b_dir")]);
    }

    #[test]
    fn missing_root_fails_before_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let mut calls = 0;

        let err = walk(&OsFilesystem, &missing, |_| {
            calls += 1;
            Ok(())
        })
        .unwrap_err();

        assert!(matches!(err, TagError::PathNotFound { path } if path == missing));
        assert_eq!(calls, 0);
    }
}
