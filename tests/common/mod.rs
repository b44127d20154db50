#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
};

use tagwalk::{
    report::Reporter,
    walker::{Entry, Filesystem},
};

/// Bytes that look enough like an MPEG frame for a tag to be written in front.
pub const FAKE_AUDIO: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

// Helper function to create an audio file (and its parent directories)
pub fn create_audio_file(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, FAKE_AUDIO.repeat(256)).unwrap();
    path
}

// Helper function to create a non-audio file
pub fn create_other_file(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"not audio").unwrap();
    path
}

/// A directory tree held in memory; listed directories can be made to fail.
#[derive(Debug, Default)]
pub struct FakeFs {
    dirs: HashMap<PathBuf, Vec<Entry>>,
    broken: HashSet<PathBuf>,
    pub listed: RefCell<Vec<PathBuf>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: &str, entries: Vec<Entry>) -> Self {
        self.dirs.insert(PathBuf::from(path), entries);
        self
    }

    pub fn broken(mut self, path: &str) -> Self {
        self.dirs.entry(PathBuf::from(path)).or_default();
        self.broken.insert(PathBuf::from(path));
        self
    }
}

impl Filesystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        self.listed.borrow_mut().push(dir.to_path_buf());
        if self.broken.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

/// Keeps every reported line for later assertions.
#[derive(Debug, Default)]
pub struct Recorder {
    pub lines: RefCell<Vec<(Level, String)>>,
}

impl Recorder {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

impl Reporter for Recorder {
    fn debug(&self, message: &str) {
        self.push(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
