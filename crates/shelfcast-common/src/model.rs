//! Book and track records, and the library index that holds them.
//!
//! The field layout is the cache file format: a JSON object keyed by book
//! hash, each book holding a `files` object keyed by track hash.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::format::{format_duration, format_size};
use crate::hash::ContentHash;

/// One qualifying audio file inside a book directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub path: PathBuf,
    pub filename: String,
    pub title: String,
    pub author: String,
    pub album: String,
    /// Track number from the tags; `null` in the cache when absent.
    pub track_number: Option<u32>,
    pub duration_seconds: u64,
    pub duration_display: String,
    pub size_bytes: u64,
}

/// One directory of tracks, served as a single feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub path: PathBuf,
    pub title: String,
    pub author: String,
    pub duration_seconds: u64,
    pub duration_display: String,
    pub size_bytes: u64,
    pub size_display: String,
    /// Tracks keyed by their content hash; feed order is computed on demand.
    pub files: BTreeMap<ContentHash, Track>,
}

impl Book {
    /// Assemble a book from its tracks in processing order.
    ///
    /// Title and author come from the last track's album and artist: every
    /// track in a directory is assumed to share them.
    pub fn from_tracks(path: impl Into<PathBuf>, tracks: Vec<(ContentHash, Track)>) -> Self {
        let mut book = Book {
            path: path.into(),
            title: String::new(),
            author: String::new(),
            duration_seconds: 0,
            duration_display: String::new(),
            size_bytes: 0,
            size_display: String::new(),
            files: BTreeMap::new(),
        };

        for (hash, track) in tracks {
            book.title = track.album.clone();
            book.author = track.author.clone();
            book.duration_seconds += track.duration_seconds;
            book.size_bytes += track.size_bytes;
            book.files.insert(hash, track);
        }

        book.duration_display = format_duration(book.duration_seconds);
        book.size_display = format_size(book.size_bytes);
        book
    }

    /// Look up a track by hash.
    pub fn track(&self, hash: &str) -> Result<&Track> {
        self.files
            .get(hash)
            .ok_or_else(|| Error::TrackNotFound(hash.to_string()))
    }
}

/// Every indexed book keyed by its aggregate content hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryIndex {
    books: BTreeMap<ContentHash, Book>,
}

impl LibraryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Insert a book, returning the previous entry under the same hash.
    pub fn insert(&mut self, hash: ContentHash, book: Book) -> Option<Book> {
        self.books.insert(hash, book)
    }

    pub fn get(&self, hash: &str) -> Option<&Book> {
        self.books.get(hash)
    }

    /// Look up a book, failing with [`Error::BookNotFound`].
    pub fn book(&self, hash: &str) -> Result<&Book> {
        self.get(hash)
            .ok_or_else(|| Error::BookNotFound(hash.to_string()))
    }

    /// Look up a track inside a book.
    pub fn track(&self, book_hash: &str, track_hash: &str) -> Result<(&Book, &Track)> {
        let book = self.book(book_hash)?;
        let track = book.track(track_hash)?;
        Ok((book, track))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContentHash, &Book)> {
        self.books.iter()
    }

    /// Books ordered by title, then path, for listings.
    pub fn by_title(&self) -> Vec<(&ContentHash, &Book)> {
        let mut books: Vec<_> = self.books.iter().collect();
        books.sort_by(|(_, a), (_, b)| a.title.cmp(&b.title).then_with(|| a.path.cmp(&b.path)));
        books
    }

    /// Map of book directory to book hash for every book whose directory
    /// still exists on disk.
    pub fn live_paths(&self) -> HashMap<PathBuf, ContentHash> {
        self.books
            .iter()
            .filter(|(_, book)| book.path.exists())
            .map(|(hash, book)| (book.path.clone(), hash.clone()))
            .collect()
    }
}
