//! The single catalog endpoint and its three faces.
//!
//! `GET /?a=<book>&f=<track>` streams a track, `GET /?a=<book>` returns the
//! book's RSS feed and a bare `GET /` lists the library. The index is read
//! from the cache on every request so a rescan is picked up without a
//! restart.

use crate::server::auth::check_basic_auth;
use crate::server::error::AppError;
use crate::server::AppContext;
use crate::streaming::serve_track;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shelfcast_common::{Error, LibraryIndex, Result};
use shelfcast_feed::FeedBuilder;
use std::path::PathBuf;

/// Content type of rendered feeds.
pub const FEED_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

pub fn catalog_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(catalog))
        .route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Book hash
    a: Option<String>,
    /// Track hash
    f: Option<String>,
}

/// One row of the library listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookSummary {
    pub hash: String,
    pub title: String,
    pub author: String,
    pub duration_seconds: u64,
    pub duration_display: String,
    pub size_bytes: u64,
    pub size_display: String,
    pub tracks: usize,
    pub feed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

async fn catalog(
    State(ctx): State<AppContext>,
    Query(query): Query<CatalogQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> std::result::Result<Response, AppError> {
    let book = query.a.filter(|a| !a.is_empty());
    let response = match (book, query.f) {
        (Some(book), Some(track)) => stream(&ctx, &book, &track, &headers).await,
        (Some(book), None) => feed(&ctx, &book, &headers, &uri).await,
        (None, _) => listing(&ctx, &headers, &uri).await,
    };
    Ok(response?)
}

/// Load the cached index on the blocking pool.
async fn load_index(ctx: &AppContext) -> Result<LibraryIndex> {
    let cache = ctx.cache.clone();
    tokio::task::spawn_blocking(move || cache.load())
        .await
        .map_err(|e| Error::Internal(format!("index load task failed: {e}")))?
}

/// Public URL enclosures and feed links point at.
///
/// The configured base URL wins; otherwise it is rebuilt from the `Host`
/// header and the request path.
fn base_url(ctx: &AppContext, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(url) = &ctx.config.server.base_url {
        return url.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", ctx.config.server.host, ctx.config.server.port));

    format!("http://{}{}", host, uri.path())
}

async fn stream(ctx: &AppContext, book: &str, track: &str, headers: &HeaderMap) -> Result<Response> {
    let index = load_index(ctx).await?;
    let (_, track) = index.track(book, track)?;

    let range = headers.get(header::RANGE);
    tracing::debug!(path = %track.path.display(), range = ?range, "Streaming track");

    serve_track(&track.path, range).await
}

async fn feed(ctx: &AppContext, book: &str, headers: &HeaderMap, uri: &Uri) -> Result<Response> {
    let index = load_index(ctx).await?;
    let xml = FeedBuilder::new(base_url(ctx, headers, uri)).feed_for(&index, book)?;

    Ok(([(header::CONTENT_TYPE, FEED_CONTENT_TYPE)], xml).into_response())
}

async fn listing(ctx: &AppContext, headers: &HeaderMap, uri: &Uri) -> Result<Response> {
    check_basic_auth(&ctx.config.auth, headers)?;

    let index = load_index(ctx).await?;
    let base = base_url(ctx, headers, uri);
    let show_path = ctx.config.server.show_path;

    let books: Vec<BookSummary> = index
        .by_title()
        .into_iter()
        .map(|(hash, book)| BookSummary {
            hash: hash.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            duration_seconds: book.duration_seconds,
            duration_display: book.duration_display.clone(),
            size_bytes: book.size_bytes,
            size_display: book.size_display.clone(),
            tracks: book.files.len(),
            feed_url: format!("{base}?a={hash}"),
            path: show_path.then(|| book.path.clone()),
        })
        .collect();

    Ok(Json(books).into_response())
}
