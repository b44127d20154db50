use std::{
    io::{self, Write},
    path::Path,
};

use tabled::Table;

use crate::{
    error::Result,
    report::Reporter,
    store::{TagHandle, TagStore, with_handle},
    types::{ListFormat, TagRecord},
    walker::{AudioFile, Filesystem, walk},
};

/// Prints the current tags of every audio file below `root` to `out`.
///
/// With [`ListFormat::Records`] each record is written as soon as its file
/// has been read, so a fatal error leaves the records before it on `out`.
/// The table and JSON formats are written only once the walk succeeded.
///
/// Returns the number of files listed.
pub fn list_tags<F, S, W, R>(
    fs: &F,
    store: &S,
    root: impl AsRef<Path>,
    format: ListFormat,
    out: &mut W,
    reporter: &R,
) -> Result<usize>
where
    F: Filesystem + ?Sized,
    S: TagStore + ?Sized,
    W: Write + ?Sized,
    R: Reporter + ?Sized,
{
    let mut records: Vec<TagRecord> = Vec::new();

    let listed = walk(fs, root, |file| {
        reporter.debug(&format!("Found item {}", file.path.display()));
        let record = with_handle(store, &file.path, |handle| read_record(file, handle))?;

        match format {
            ListFormat::Records => write!(out, "{record}")?,
            ListFormat::Table | ListFormat::Json => records.push(record),
        }
        Ok(())
    })?;

    match format {
        ListFormat::Records => {}
        ListFormat::Table => writeln!(out, "{}", Table::new(records))?,
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &records).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }

    Ok(listed)
}

fn read_record<H: TagHandle>(file: &AudioFile, handle: &H) -> TagRecord {
    let field = |value: Option<&str>| value.unwrap_or_default().to_string();

    TagRecord {
        item: file.name.clone(),
        album: field(handle.album()),
        year: field(handle.year()),
        artist: field(handle.artist()),
        title: field(handle.title()),
    }
}
