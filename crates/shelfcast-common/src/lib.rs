//! Shelfcast-Common: shared model, identifiers and utilities.
//!
//! This crate provides the pieces every other shelfcast crate agrees on:
//!
//! - **Model**: [`Track`], [`Book`] and the [`LibraryIndex`] cache format
//! - **Content hashes**: the [`ContentHash`] key for books and tracks
//! - **Path utilities**: the audio extension whitelist and MIME guessing
//! - **Formatting**: duration and size display strings
//! - **Error handling**: the workspace [`Error`] and [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use shelfcast_common::{format::format_size, paths::is_audio_file, LibraryIndex};
//! use std::path::Path;
//!
//! let index = LibraryIndex::new();
//! assert!(index.book("missing").is_err());
//!
//! assert!(is_audio_file(Path::new("chapter01.mp3")));
//! assert_eq!(format_size(1024), "1.0 KB");
//! ```

pub mod error;
pub mod format;
pub mod hash;
pub mod model;
pub mod paths;

pub use error::{Error, Result};
pub use hash::ContentHash;
pub use model::{Book, LibraryIndex, Track};
