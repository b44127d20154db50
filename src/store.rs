//! Read/write access to the tag container of one audio file.
//!
//! A [`TagStore`] opens a [`TagHandle`] for a single file. The handle is used
//! for one read or one write and then closed; [`with_handle`] does the
//! open/use/close dance so the close happens on every path.
//!
//! Two stores ship with the crate:
//! - [`Id3Store`] reads and writes ID3v2 tags on disk through the `id3` crate
//! - [`MemoryStore`] keeps tags in memory, for tests and dry embedding

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    rc::Rc,
};

use id3::{ErrorKind, Tag, TagLike, Version};

use crate::{
    config::WriteVersion,
    error::{Result, TagError},
};

pub trait TagHandle {
    fn title(&self) -> Option<&str>;
    fn album(&self) -> Option<&str>;
    fn artist(&self) -> Option<&str>;
    fn year(&self) -> Option<&str>;

    fn set_title(&mut self, title: &str);
    fn set_album(&mut self, album: &str);
    fn set_artist(&mut self, artist: &str);
    fn set_year(&mut self, year: &str);

    /// Persists every change made through this handle.
    fn save(&mut self) -> Result<()>;

    /// Releases the handle. Changes not saved by then are dropped.
    fn close(self)
    where
        Self: Sized;
}

pub trait TagStore {
    type Handle: TagHandle;

    /// Opens and parses the tags of the file at `path`.
    fn open(&self, path: &Path) -> Result<Self::Handle>;
}

/// Opens `path`, hands the handle to `f` and closes it again, whatever `f`
/// returned.
pub fn with_handle<S, T, F>(store: &S, path: &Path, f: F) -> Result<T>
where
    S: TagStore + ?Sized,
    F: FnOnce(&mut S::Handle) -> T,
{
    let mut handle = store.open(path)?;
    let out = f(&mut handle);
    handle.close();
    Ok(out)
}

/// ID3v2 tags on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Store {
    pub write_version: WriteVersion,
}

impl Id3Store {
    pub fn new(write_version: WriteVersion) -> Self {
        Self { write_version }
    }
}

impl TagStore for Id3Store {
    type Handle = Id3Handle;

    fn open(&self, path: &Path) -> Result<Id3Handle> {
        // An MP3 without any ID3v2 tag is fine, it just starts out empty.
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Tag::new(),
            Err(e) => {
                return Err(TagError::TagOpenFailed {
                    path: path.to_path_buf(),
                    source: e.into(),
                });
            }
        };

        let version = self.write_version.resolve(tag.version());
        Ok(Id3Handle {
            path: path.to_path_buf(),
            tag,
            version,
        })
    }
}

/// Parsed tag of one MP3, plus the revision it will be saved as.
///
/// The file itself is only touched by `open` and `save`; between the two the
/// handle holds nothing but the parsed frames.
#[derive(Debug)]
pub struct Id3Handle {
    path: PathBuf,
    tag: Tag,
    version: Version,
}

impl Id3Handle {
    /// The frame that holds the year for the revision being written.
    fn year_frame(&self) -> (&'static str, &'static str) {
        match self.version {
            Version::Id3v24 => ("TDRC", "TYER"),
            _ => ("TYER", "TDRC"),
        }
    }

    fn text(&self, id: &str) -> Option<&str> {
        self.tag.get(id).and_then(|frame| frame.content().text())
    }
}

impl TagHandle for Id3Handle {
    fn title(&self) -> Option<&str> {
        self.tag.title()
    }

    fn album(&self) -> Option<&str> {
        self.tag.album()
    }

    fn artist(&self) -> Option<&str> {
        self.tag.artist()
    }

    fn year(&self) -> Option<&str> {
        self.text("TDRC").or_else(|| self.text("TYER"))
    }

    fn set_title(&mut self, title: &str) {
        self.tag.set_title(title);
    }

    fn set_album(&mut self, album: &str) {
        self.tag.set_album(album);
    }

    fn set_artist(&mut self, artist: &str) {
        self.tag.set_artist(artist);
    }

    fn set_year(&mut self, year: &str) {
        let (keep, stale) = self.year_frame();
        self.tag.remove(stale);
        self.tag.set_text(keep, year);
    }

    fn save(&mut self) -> Result<()> {
        self.tag
            .write_to_path(&self.path, self.version)
            .map_err(|e| TagError::TagSaveFailed {
                path: self.path.clone(),
                source: e.into(),
            })
    }

    fn close(self) {}
}

/// Tags of one file as held by [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTags {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<PathBuf, StoredTags>,
    refuse_open: HashSet<PathBuf>,
    refuse_save: HashSet<PathBuf>,
    opened: Vec<PathBuf>,
    closed: usize,
}

/// In-memory tag store.
///
/// Paths never inserted open as empty tags. Individual paths can be set up
/// to fail on open or on save.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, tags: StoredTags) {
        self.state.borrow_mut().files.insert(path.into(), tags);
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<StoredTags> {
        self.state.borrow().files.get(path.as_ref()).cloned()
    }

    pub fn refuse_open(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().refuse_open.insert(path.into());
    }

    pub fn refuse_save(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().refuse_save.insert(path.into());
    }

    /// Every path opened so far, in order.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.state.borrow().opened.clone()
    }

    /// Number of handles opened but not yet closed.
    pub fn open_handles(&self) -> usize {
        let state = self.state.borrow();
        state.opened.len() - state.closed
    }
}

impl TagStore for MemoryStore {
    type Handle = MemoryHandle;

    fn open(&self, path: &Path) -> Result<MemoryHandle> {
        let mut state = self.state.borrow_mut();
        if state.refuse_open.contains(path) {
            return Err(TagError::TagOpenFailed {
                path: path.to_path_buf(),
                source: "tag container could not be parsed".into(),
            });
        }

        state.opened.push(path.to_path_buf());
        let tags = state.files.get(path).cloned().unwrap_or_default();
        Ok(MemoryHandle {
            path: path.to_path_buf(),
            tags,
            state: Rc::clone(&self.state),
        })
    }
}

#[derive(Debug)]
pub struct MemoryHandle {
    path: PathBuf,
    tags: StoredTags,
    state: Rc<RefCell<MemoryState>>,
}

impl TagHandle for MemoryHandle {
    fn title(&self) -> Option<&str> {
        self.tags.title.as_deref()
    }

    fn album(&self) -> Option<&str> {
        self.tags.album.as_deref()
    }

    fn artist(&self) -> Option<&str> {
        self.tags.artist.as_deref()
    }

    fn year(&self) -> Option<&str> {
        self.tags.year.as_deref()
    }

    fn set_title(&mut self, title: &str) {
        self.tags.title = Some(title.to_string());
    }

    fn set_album(&mut self, album: &str) {
        self.tags.album = Some(album.to_string());
    }

    fn set_artist(&mut self, artist: &str) {
        self.tags.artist = Some(artist.to_string());
    }

    fn set_year(&mut self, year: &str) {
        self.tags.year = Some(year.to_string());
    }

    fn save(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.refuse_save.contains(&self.path) {
            return Err(TagError::TagSaveFailed {
                path: self.path.clone(),
                source: "file is read-only".into(),
            });
        }
        state.files.insert(self.path.clone(), self.tags.clone());
        Ok(())
    }

    fn close(self) {
        self.state.borrow_mut().closed += 1;
    }
}
