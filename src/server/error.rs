//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<_, AppError>`; any [`shelfcast_common::Error`]
//! converts with `?`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shelfcast_common::Error;

/// Realm announced with `401` responses.
pub const AUTH_REALM: &str = "shelfcast";

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: Error,
}

impl AppError {
    pub fn new(inner: Error) -> Self {
        Self { inner }
    }
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self.inner {
            Error::TrackUnavailable { path, source } => {
                tracing::warn!(path = %path.display(), error = %source, "Indexed track vanished");
            }
            err if status.is_server_error() => {
                tracing::error!(status = %status, error = %err, "Server error in handler");
            }
            _ => {}
        }

        let code = match &self.inner {
            Error::RootPathNotFound(_) => "root_not_found",
            Error::ExtractionSkip { .. } => "extraction_skipped",
            Error::CacheMissing { .. } => "cache_missing",
            Error::CacheCorrupt { .. } => "cache_corrupt",
            Error::BookNotFound(_) => "book_not_found",
            Error::TrackNotFound(_) => "track_not_found",
            Error::MalformedRange { .. } => "range_not_satisfiable",
            Error::TrackUnavailable { .. } => "track_unavailable",
            Error::Unauthorized(_) => "unauthorized",
            Error::Io { .. } => "io_error",
            Error::Serialize(_) => "serialize_error",
            Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.inner.to_string(),
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        let headers = response.headers_mut();

        match &self.inner {
            Error::MalformedRange { size, .. } => {
                if let Ok(value) = HeaderValue::from_str(&format!("bytes */{size}")) {
                    headers.insert(header::CONTENT_RANGE, value);
                }
            }
            Error::Unauthorized(_) => {
                if let Ok(value) = HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\"")) {
                    headers.insert(header::WWW_AUTHENTICATE, value);
                }
            }
            _ => {}
        }

        response
    }
}
