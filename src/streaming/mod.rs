//! Track delivery with HTTP range support.
//!
//! Bodies are streamed through `ReaderStream` so memory stays bounded
//! regardless of file size; partial responses read exactly the requested
//! span via `take`.

mod range;

pub use range::{parse_range_header, ByteRange};

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use shelfcast_common::paths::content_type_for;
use shelfcast_common::{Error, Result};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

const CHUNK_SIZE: usize = 64 * 1024;

/// Serve the file at `path`, honouring an optional `Range` header.
///
/// The size is taken from the file as it is now, not from the index. A header
/// that is present but not visible ASCII is malformed, never ignored.
pub async fn serve_track(path: &Path, range_header: Option<&HeaderValue>) -> Result<Response> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::unavailable(path, e))?;
    let size = metadata.len();
    let content_type = content_type_for(path);

    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| Error::unavailable(path, e))?;

    match range_header {
        Some(value) => {
            let value = value.to_str().map_err(|_| {
                Error::malformed_range(String::from_utf8_lossy(value.as_bytes()), size)
            })?;
            let range = parse_range_header(value, size)?;
            file.seek(std::io::SeekFrom::Start(range.start))
                .await
                .map_err(|e| Error::unavailable(path, e))?;

            let stream = ReaderStream::with_capacity(file.take(range.len()), CHUNK_SIZE);

            Ok((
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE.as_str(), content_type.to_string()),
                    (header::CONTENT_RANGE.as_str(), range.content_range()),
                    (header::CONTENT_LENGTH.as_str(), range.len().to_string()),
                    (header::ACCEPT_RANGES.as_str(), "bytes".to_string()),
                ],
                Body::from_stream(stream),
            )
                .into_response())
        }
        None => {
            let stream = ReaderStream::with_capacity(file, CHUNK_SIZE);

            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE.as_str(), content_type.to_string()),
                    (header::CONTENT_LENGTH.as_str(), size.to_string()),
                    (header::ACCEPT_RANGES.as_str(), "bytes".to_string()),
                ],
                Body::from_stream(stream),
            )
                .into_response())
        }
    }
}
