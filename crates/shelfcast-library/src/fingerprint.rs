//! Streaming content fingerprints for tracks and book directories.
//!
//! A [`Fingerprinter`] is fed the qualifying files of one directory in
//! enumeration order. Each file is read once, in [`BLOCK_SIZE`] blocks; every
//! block updates both that file's digest and the running folder digest, so the
//! folder hash equals the digest of all track bytes concatenated.
//!
//! Digests are SHA-256. Two different byte streams sharing a digest would
//! collapse into one key; that risk is accepted rather than guarded against.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use shelfcast_common::ContentHash;

/// Read size used for every file.
pub const BLOCK_SIZE: usize = 1024;

/// Accumulates per-file digests and the aggregate folder digest.
#[derive(Clone, Default)]
pub struct Fingerprinter {
    folder: Sha256,
    files: usize,
}

impl Fingerprinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files folded into the folder digest so far.
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// Hash one file from disk, returning its own digest.
    pub fn add_file(&mut self, path: &Path) -> io::Result<ContentHash> {
        let file = File::open(path)?;
        self.add_reader(file)
    }

    /// Hash one byte stream, returning its own digest.
    ///
    /// On a read error the folder digest is left exactly as it was before
    /// this stream, so a half-read file never leaks into the book hash.
    pub fn add_reader<R: Read>(&mut self, mut reader: R) -> io::Result<ContentHash> {
        let checkpoint = self.folder.clone();
        let mut file = Sha256::new();
        let mut block = [0u8; BLOCK_SIZE];

        loop {
            let n = match reader.read(&mut block) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.folder = checkpoint;
                    return Err(e);
                }
            };
            file.update(&block[..n]);
            self.folder.update(&block[..n]);
        }

        self.files += 1;
        Ok(ContentHash::from_digest(file.finalize()))
    }

    /// Finish the folder digest; `None` when no file was added.
    pub fn finish(self) -> Option<ContentHash> {
        (self.files > 0).then(|| ContentHash::from_digest(self.folder.finalize()))
    }
}
