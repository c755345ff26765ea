//! Shelfcast-Library: turns a directory tree into a [`LibraryIndex`].
//!
//! - [`fingerprint`]: streaming SHA-256 of tracks and whole book directories
//! - [`extract`]: tag reading behind the [`MetadataReader`] trait
//! - [`scanner`]: the incremental walk that reuses already-indexed books
//! - [`cache`]: atomic JSON persistence of the index
//!
//! [`LibraryIndex`]: shelfcast_common::LibraryIndex

pub mod cache;
pub mod extract;
pub mod fingerprint;
pub mod scanner;

pub use cache::CacheStore;
pub use extract::{extract_track, LoftyReader, MetadataReader, RawTags};
pub use fingerprint::Fingerprinter;
pub use scanner::{ScanOptions, ScanReport, Scanner};
