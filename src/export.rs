//! Static feed export for serving from any web server.

use shelfcast_common::{LibraryIndex, Result};
use shelfcast_feed::FeedBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `<hash>.xml` into `dir` for every book in `index`.
///
/// Returns the written paths in hash order.
pub fn export_feeds(index: &LibraryIndex, dir: &Path, base_url: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let builder = FeedBuilder::new(base_url);

    let mut written = Vec::with_capacity(index.len());
    for (hash, book) in index.iter() {
        let xml = builder.build(hash.as_str(), book)?;
        let path = dir.join(format!("{hash}.xml"));
        fs::write(&path, xml)?;
        tracing::debug!(path = %path.display(), title = %book.title, "Wrote feed");
        written.push(path);
    }

    tracing::info!(feeds = written.len(), dir = %dir.display(), "Export complete");
    Ok(written)
}
