//! Incremental library scanner.
//!
//! Walks every directory beneath the library root (the root itself is never a
//! book). A directory already present in the previous index is carried over
//! untouched, without reading any of its bytes. Anything else is read once:
//! qualifying tracks are extracted and fingerprinted, and the directory becomes
//! a book keyed by the aggregate digest of those tracks.
//!
//! Directory and file enumeration is sorted by name so the same tree always
//! yields the same hashes. A symlink to a directory is a book in its own right
//! but the walk does not recurse through it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use shelfcast_common::paths::{base_name, is_audio_file};
use shelfcast_common::{Book, ContentHash, Error, LibraryIndex, Result, Track};
use walkdir::WalkDir;

use crate::extract::{extract_track, LoftyReader, MetadataReader};
use crate::fingerprint::Fingerprinter;

/// Knobs for a single scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Ignore the previous index and re-read every directory.
    pub full_rescan: bool,
}

/// What a scan did, for logging and the CLI summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Directories visited below the root.
    pub directories: usize,
    /// Books carried over from the previous index.
    pub books_reused: usize,
    /// Books read and fingerprinted during this scan.
    pub books_indexed: usize,
    /// Files with an audio extension that did not qualify as tracks.
    pub files_skipped: usize,
}

/// Scans one library root against a previous index.
pub struct Scanner {
    root: PathBuf,
    reader: Arc<dyn MetadataReader>,
    options: ScanOptions,
}

impl Scanner {
    /// Scanner using the `lofty` tag reader.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_reader(root, Arc::new(LoftyReader::new()))
    }

    pub fn with_reader(root: impl Into<PathBuf>, reader: Arc<dyn MetadataReader>) -> Self {
        Self {
            root: root.into(),
            reader,
            options: ScanOptions::default(),
        }
    }

    pub fn options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a fresh index from the tree, reusing entries from `previous`.
    ///
    /// Books whose directory is gone are dropped. Directories without any
    /// qualifying track produce no book.
    pub fn scan(&self, previous: &LibraryIndex) -> Result<(LibraryIndex, ScanReport)> {
        if !self.root.is_dir() {
            return Err(Error::RootPathNotFound(self.root.clone()));
        }

        tracing::info!(
            root = %self.root.display(),
            reader = self.reader.name(),
            known_books = previous.len(),
            full = self.options.full_rescan,
            "Starting library scan"
        );

        let known = if self.options.full_rescan {
            Default::default()
        } else {
            previous.live_paths()
        };

        let mut index = LibraryIndex::new();
        let mut report = ScanReport::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker.into_iter().filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "Error walking library");
                None
            }
        }) {
            // Linked book folders are indexed but never descended into.
            let linked_dir = entry.path_is_symlink() && entry.path().is_dir();
            if !entry.file_type().is_dir() && !linked_dir {
                continue;
            }
            report.directories += 1;
            let dir = entry.path();

            if let Some(hash) = known.get(dir) {
                if let Some(book) = previous.get(hash.as_str()) {
                    tracing::debug!(path = %dir.display(), hash = %hash, "Reusing indexed book");
                    self.insert(&mut index, hash.clone(), book.clone());
                    report.books_reused += 1;
                    continue;
                }
            }

            match self.index_directory(dir, &mut report) {
                Ok(Some((hash, book))) => {
                    tracing::info!(
                        path = %dir.display(),
                        hash = %hash,
                        tracks = book.files.len(),
                        "Indexed book"
                    );
                    self.insert(&mut index, hash, book);
                    report.books_indexed += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory, skipping");
                }
            }
        }

        tracing::info!(
            books = index.len(),
            reused = report.books_reused,
            indexed = report.books_indexed,
            skipped_files = report.files_skipped,
            "Library scan complete"
        );

        Ok((index, report))
    }

    fn insert(&self, index: &mut LibraryIndex, hash: ContentHash, book: Book) {
        let path = book.path.clone();
        if let Some(replaced) = index.insert(hash.clone(), book) {
            tracing::warn!(
                hash = %hash,
                kept = %path.display(),
                dropped = %replaced.path.display(),
                "Two directories share identical content"
            );
        }
    }

    /// Read one directory into a book. `Ok(None)` when nothing qualifies.
    fn index_directory(
        &self,
        dir: &Path,
        report: &mut ScanReport,
    ) -> Result<Option<(ContentHash, Book)>> {
        let dir_name = base_name(dir);

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .filter(|p| is_audio_file(p))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut fingerprinter = Fingerprinter::new();
        let mut tracks: Vec<(ContentHash, Track)> = Vec::with_capacity(files.len());

        for path in files {
            let track = match extract_track(self.reader.as_ref(), &path, &dir_name) {
                Ok(track) => track,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Skipping file");
                    report.files_skipped += 1;
                    continue;
                }
            };

            match fingerprinter.add_file(&path) {
                Ok(hash) => tracks.push((hash, track)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to hash file, skipping");
                    report.files_skipped += 1;
                }
            }
        }

        Ok(fingerprinter
            .finish()
            .map(|hash| (hash, Book::from_tracks(dir, tracks))))
    }
}
