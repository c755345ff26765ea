//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which lays out a small library in a temp
//! directory, writes its index cache and builds a full [`AppContext`]. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use shelfcast::config::Config;
use shelfcast::server::{create_router, AppContext};
use shelfcast_common::{Book, ContentHash, LibraryIndex, Track};
use shelfcast_library::{CacheStore, Fingerprinter};
use tempfile::TempDir;
use tower::ServiceExt;

/// One indexed track on disk.
pub struct Fixture {
    pub hash: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Test harness wrapping an [`AppContext`] over a temp library.
pub struct TestHarness {
    pub dir: TempDir,
    pub ctx: AppContext,
    pub book_hash: String,
    /// Tracks in feed order.
    pub tracks: Vec<Fixture>,
}

fn track(path: PathBuf, number: u32, size: u64) -> Track {
    let filename = path.file_name().unwrap().to_string_lossy().into_owned();
    Track {
        title: format!("Chapter {number} <&>"),
        author: "Frank Herbert".into(),
        album: "Dune".into(),
        track_number: Some(number),
        duration_seconds: 600,
        duration_display: "0:10:00".into(),
        size_bytes: size,
        filename,
        path,
    }
}

impl TestHarness {
    /// Library with one book of two tracks; the first is exactly 1000 bytes.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Same library, with the cache and root paths filled into `config`.
    pub fn with_config(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = dir.path().join("library");
        let book_dir = root.join("Dune");
        std::fs::create_dir_all(&book_dir).unwrap();

        let mut fingerprinter = Fingerprinter::new();
        let mut tracks = Vec::new();
        let mut entries = Vec::new();

        for (number, name, len) in [(1u32, "01.mp3", 1000usize), (2, "02.mp3", 300)] {
            let path = book_dir.join(name);
            let bytes: Vec<u8> = (0..=255u8).cycle().skip(number as usize).take(len).collect();
            std::fs::write(&path, &bytes).unwrap();

            let hash = fingerprinter.add_file(&path).unwrap();
            entries.push((hash.clone(), track(path.clone(), number, len as u64)));
            tracks.push(Fixture {
                hash: hash.to_string(),
                path,
                bytes,
            });
        }

        let book_hash = fingerprinter.finish().unwrap();
        let mut index = LibraryIndex::new();
        index.insert(book_hash.clone(), Book::from_tracks(&book_dir, entries));

        config.library.root = root;
        config.library.cache_path = dir.path().join("cache").join("audiobooks.json");
        CacheStore::new(&config.library.cache_path)
            .save(&index)
            .expect("failed to write cache");

        let ctx = AppContext::new(config);

        Self {
            dir,
            ctx,
            book_hash: book_hash.to_string(),
            tracks,
        }
    }

    /// Harness whose listing requires `username`/`password`.
    pub fn with_auth(username: &str, password: &str) -> Self {
        let mut config = Config::default();
        config.auth.username = Some(username.to_string());
        config.auth.password = Some(password.to_string());
        Self::with_config(config)
    }

    pub fn cache(&self) -> CacheStore {
        (*self.ctx.cache).clone()
    }

    /// Book hash that is not in the index.
    pub fn unknown_hash() -> String {
        ContentHash::from_digest([0u8; 32]).to_string()
    }

    /// Send one request through the router without binding a socket.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        create_router(self.ctx.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    /// `GET uri` with optional extra headers.
    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
        let mut builder = Request::get(uri).header("host", "books.test");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// Collect a response body.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Collect a response body as UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
