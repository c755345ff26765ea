//! Path utilities for detecting audio files by extension.
//!
//! The scanner only considers files whose extension is on a fixed whitelist;
//! the streaming layer uses the same table to pick a `Content-Type`.

use std::path::Path;

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "m4b", "flac", "ogg", "opus", "wav"];

/// Check if a path has a whitelisted audio extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shelfcast_common::paths::is_audio_file;
///
/// assert!(is_audio_file(Path::new("01 - Chapter One.mp3")));
/// assert!(is_audio_file(Path::new("/books/dune/part1.M4B")));
/// assert!(!is_audio_file(Path::new("cover.jpg")));
/// ```
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Guess the MIME type of an audio file from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" | "m4b" => "audio/mp4",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "opus" => "audio/opus",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// Base name of a path as an owned string, or empty when there is none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
