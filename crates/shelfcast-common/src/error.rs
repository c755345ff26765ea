//! Unified error type for shelfcast.
//!
//! Every crate in the workspace funnels its failures into [`Error`], which
//! carries enough context for HTTP handlers to derive a status code via
//! [`Error::http_status`].

use std::path::PathBuf;

/// Unified error type covering scanning, caching and serving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured library root does not exist.
    #[error("Library root not found: {}", .0.display())]
    RootPathNotFound(PathBuf),

    /// A candidate file could not be turned into a track.
    ///
    /// Scans recover from this locally: the file is excluded and the walk
    /// continues.
    #[error("Skipped {}: {reason}", path.display())]
    ExtractionSkip {
        /// File that was skipped.
        path: PathBuf,
        /// Why it does not qualify.
        reason: String,
    },

    /// No index cache exists yet.
    #[error("Index cache not found at {}; run `shelfcast scan` first", path.display())]
    CacheMissing {
        /// Expected cache location.
        path: PathBuf,
    },

    /// The index cache exists but could not be parsed.
    #[error("Index cache at {} is corrupt ({source}); run `shelfcast scan` to rebuild it", path.display())]
    CacheCorrupt {
        /// Cache location.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// No book with this hash is indexed.
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// The book exists but holds no track with this hash.
    #[error("track not found: {0}")]
    TrackNotFound(String),

    /// A `Range` header that cannot be satisfied against the file.
    #[error("Malformed range {header:?} for {size} byte file")]
    MalformedRange {
        /// Raw header value.
        header: String,
        /// Size of the file the range was applied to.
        size: u64,
    },

    /// An indexed track can no longer be read from disk.
    #[error("Track unavailable at {}: {source}", path.display())]
    TrackUnavailable {
        /// Indexed location of the track.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the index failed.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::BookNotFound(_) | Error::TrackNotFound(_) => 404,
            Error::TrackUnavailable { .. } => 404,
            Error::MalformedRange { .. } => 416,
            Error::Unauthorized(_) => 401,
            Error::CacheMissing { .. } | Error::CacheCorrupt { .. } => 503,
            Error::ExtractionSkip { .. } => 422,
            Error::RootPathNotFound(_) => 500,
            Error::Io { .. } => 500,
            Error::Serialize(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::ExtractionSkip`].
    pub fn skip(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ExtractionSkip {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`Error::MalformedRange`].
    pub fn malformed_range(header: impl Into<String>, size: u64) -> Self {
        Error::MalformedRange {
            header: header.into(),
            size,
        }
    }

    /// Convenience constructor for [`Error::TrackUnavailable`].
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::TrackUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
