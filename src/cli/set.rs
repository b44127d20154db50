use std::path::{Path, PathBuf};

use crate::{
    config::SetConfig,
    error::Result,
    report::Reporter,
    resolver::resolve,
    store::{TagHandle, TagStore, with_handle},
    types::ResolvedTags,
    walker::{Filesystem, walk},
};

/// Outcome of a `set-tags` run that was not cut short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetSummary {
    /// Files whose tags were saved.
    pub tagged: usize,
    /// Files whose save failed, in walk order.
    pub save_failures: Vec<PathBuf>,
}

/// Resolves and writes tags for every audio file below `root`.
///
/// The title is always replaced; album, artist and year only when they
/// resolve to something non-empty. A file whose tags cannot be opened ends
/// the run. A file whose tags cannot be saved is reported and skipped.
pub fn set_tags<F, S, R>(
    fs: &F,
    store: &S,
    root: impl AsRef<Path>,
    config: &SetConfig,
    reporter: &R,
) -> Result<SetSummary>
where
    F: Filesystem + ?Sized,
    S: TagStore + ?Sized,
    R: Reporter + ?Sized,
{
    let mut summary = SetSummary::default();

    walk(fs, root, |file| {
        reporter.debug(&format!("Found item {}", file.path.display()));
        let tags = resolve(&file.dir, &file.name, config);

        match with_handle(store, &file.path, |handle| apply(handle, &tags))? {
            Ok(()) => summary.tagged += 1,
            Err(e) if !e.is_fatal() => {
                reporter.error(&format!(
                    "Failed to save tag (title: {}, album: {}, artist: {}, year: {}) on item {}: {}",
                    tags.title,
                    tags.album,
                    tags.artist,
                    tags.year,
                    file.path.display(),
                    e
                ));
                summary.save_failures.push(file.path.clone());
            }
            Err(e) => return Err(e),
        }
        Ok(())
    })?;

    Ok(summary)
}

fn apply<H: TagHandle>(handle: &mut H, tags: &ResolvedTags) -> Result<()> {
    handle.set_title(&tags.title);
    if let Some(album) = tags.album() {
        handle.set_album(album);
    }
    if let Some(artist) = tags.artist() {
        handle.set_artist(artist);
    }
    if let Some(year) = tags.year() {
        handle.set_year(year);
    }
    handle.save()
}
