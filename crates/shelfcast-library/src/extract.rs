//! Track metadata extraction.
//!
//! A [`MetadataReader`] turns a file into [`RawTags`]; [`extract_track`]
//! applies the fallback rules and produces the [`Track`] record. Files without
//! a usable duration are not tracks and come back as
//! [`Error::ExtractionSkip`].

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::path::Path;
use std::time::Duration;

use shelfcast_common::format::format_duration;
use shelfcast_common::paths::base_name;
use shelfcast_common::{Error, Result, Track};

/// Author used when a track carries no artist.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Tag values as read from a file, before any fallback is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
    pub duration: Option<Duration>,
}

/// Reads embedded metadata from an audio file.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait MetadataReader: Send + Sync {
    /// Human-readable name identifying this reader implementation.
    fn name(&self) -> &'static str;

    /// Read tags and duration from the file at `path`.
    fn read(&self, path: &Path) -> Result<RawTags>;
}

/// [`MetadataReader`] backed by `lofty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyReader;

impl LoftyReader {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for LoftyReader {
    fn name(&self) -> &'static str {
        "lofty"
    }

    fn read(&self, path: &Path) -> Result<RawTags> {
        let tagged_file = Probe::open(path)
            .and_then(|probe| probe.read())
            .map_err(|e| Error::skip(path, e.to_string()))?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        let duration = tagged_file.properties().duration();

        Ok(RawTags {
            title: tag.and_then(|t| t.title().map(|s| s.into_owned())),
            artist: tag.and_then(|t| t.artist().map(|s| s.into_owned())),
            album: tag.and_then(|t| t.album().map(|s| s.into_owned())),
            track_number: tag.and_then(|t| t.track()),
            duration: Some(duration),
        })
    }
}

/// Return `primary` unless it is absent or all whitespace, else `fallback`.
pub fn non_blank_or(primary: Option<&str>, fallback: &str) -> String {
    match primary {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}

/// Track title, falling back to the file name.
pub fn title_or_filename(tag: Option<&str>, filename: &str) -> String {
    non_blank_or(tag, filename)
}

/// Track author, falling back to [`UNKNOWN_AUTHOR`].
pub fn artist_or_unknown(tag: Option<&str>) -> String {
    non_blank_or(tag, UNKNOWN_AUTHOR)
}

/// Album, falling back to the name of the directory holding the track.
pub fn album_or_directory(tag: Option<&str>, directory: &str) -> String {
    non_blank_or(tag, directory)
}

/// Build a [`Track`] for `path`, or explain why it does not qualify.
///
/// `directory` is the base name of the containing directory, used as the
/// album fallback.
pub fn extract_track(reader: &dyn MetadataReader, path: &Path, directory: &str) -> Result<Track> {
    let tags = reader.read(path)?;

    let duration_seconds = match tags.duration {
        Some(d) if d.is_zero() => return Err(Error::skip(path, "zero duration")),
        Some(d) => d.as_secs(),
        None => return Err(Error::skip(path, "no duration")),
    };

    let size_bytes = std::fs::metadata(path)
        .map_err(|e| Error::skip(path, e.to_string()))?
        .len();

    let filename = base_name(path);

    Ok(Track {
        path: path.to_path_buf(),
        title: title_or_filename(tags.title.as_deref(), &filename),
        author: artist_or_unknown(tags.artist.as_deref()),
        album: album_or_directory(tags.album.as_deref(), directory),
        track_number: tags.track_number,
        duration_seconds,
        duration_display: format_duration(duration_seconds),
        size_bytes,
        filename,
    })
}
