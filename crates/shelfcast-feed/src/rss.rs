//! Podcast RSS generation.
//!
//! One book becomes one RSS 2.0 channel with an item per track. Podcast apps
//! sort episodes newest first, so publication dates count down one day per
//! position from a fixed epoch: the first track is always the "latest" one.

use chrono::{Days, NaiveDate};
use std::fmt::{self, Write};

use shelfcast_common::{Book, ContentHash, Error, LibraryIndex, Result, Track};

use crate::escape::escape_xml;
use crate::order::{has_ignore_sentinel, order_tracks};

/// Namespaces declared on the `<rss>` root element.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("itunes", "http://www.itunes.com/dtds/podcast-1.0.dtd"),
    ("googleplay", "http://www.google.com/schemas/play-podcasts/1.0"),
    ("atom", "http://www.w3.org/2005/Atom"),
    ("media", "http://search.yahoo.com/mrss/"),
    ("content", "http://purl.org/rss/1.0/modules/content/"),
];

/// Text used for channel and item descriptions.
pub const DESCRIPTION: &str = "Audiobook served by shelfcast";

/// Enclosure MIME type announced for every track.
pub const ENCLOSURE_TYPE: &str = "audio/mpeg";

/// Publication date of the first item.
const EPOCH: (i32, u32, u32) = (2000, 12, 31);

/// `pubDate` for the item at `position`, RFC 2822 in UTC.
pub fn pub_date(position: usize) -> String {
    let (y, m, d) = EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.checked_sub_days(Days::new(position as u64)))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc2822())
        .unwrap_or_default()
}

/// Builds feeds whose enclosures point back at `base_url`.
#[derive(Debug, Clone)]
pub struct FeedBuilder {
    base_url: String,
}

impl FeedBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Enclosure URL for one track.
    pub fn track_url(&self, book: &str, track: &str) -> String {
        format!("{}?a={}&f={}", self.base_url, book, track)
    }

    /// Render the feed for the book stored under `hash`.
    pub fn feed_for(&self, index: &LibraryIndex, hash: &str) -> Result<String> {
        let book = index.book(hash)?;
        self.build(hash, book)
    }

    /// Render the feed for `book`, consulting its directory for the
    /// `ignore_tracknum` sentinel.
    pub fn build(&self, hash: &str, book: &Book) -> Result<String> {
        let force_filename = has_ignore_sentinel(&book.path);
        let tracks = order_tracks(book, force_filename);

        tracing::debug!(
            book = hash,
            tracks = tracks.len(),
            filename_order = force_filename,
            "Rendering feed"
        );

        self.render(hash, book, &tracks)
            .map_err(|e| Error::Internal(format!("feed rendering failed: {e}")))
    }

    fn render(
        &self,
        hash: &str,
        book: &Book,
        tracks: &[(&ContentHash, &Track)],
    ) -> std::result::Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        write!(out, "<rss")?;
        for (prefix, uri) in NAMESPACES {
            write!(out, r#" xmlns:{prefix}="{uri}""#)?;
        }
        writeln!(out, r#" version="2.0">"#)?;

        writeln!(out, "<channel>")?;
        writeln!(out, "<title>{}</title>", escape_xml(&book.title))?;
        writeln!(out, "<itunes:author>{}</itunes:author>", escape_xml(&book.author))?;
        writeln!(out, "<description>{DESCRIPTION}</description>")?;

        for (position, (track_hash, track)) in tracks.iter().enumerate() {
            self.render_item(&mut out, hash, track_hash.as_str(), track, position)?;
        }

        writeln!(out, "</channel>")?;
        writeln!(out, "</rss>")?;
        Ok(out)
    }

    fn render_item(
        &self,
        out: &mut String,
        book: &str,
        hash: &str,
        track: &Track,
        position: usize,
    ) -> fmt::Result {
        writeln!(out, "<item>")?;
        writeln!(out, "<title>{}</title>", escape_xml(&track.title))?;
        writeln!(out, "<itunes:author>{}</itunes:author>", escape_xml(&track.author))?;
        writeln!(out, "<itunes:category>Book</itunes:category>")?;
        writeln!(out, "<itunes:explicit>no</itunes:explicit>")?;
        writeln!(out, "<itunes:summary>{DESCRIPTION}</itunes:summary>")?;
        writeln!(out, "<description>{DESCRIPTION}</description>")?;
        writeln!(out, "<itunes:duration>{}</itunes:duration>", track.duration_display)?;
        writeln!(out, r#"<guid isPermaLink="false">{hash}</guid>"#)?;
        writeln!(out, "<pubDate>{}</pubDate>", pub_date(position))?;
        writeln!(
            out,
            r#"<enclosure url="{}" length="{}" type="{ENCLOSURE_TYPE}"/>"#,
            escape_xml(&self.track_url(book, hash)),
            track.size_bytes
        )?;
        writeln!(out, "</item>")
    }
}

/// Render the feed for `hash` with enclosures under `base_url`.
pub fn feed_for(index: &LibraryIndex, hash: &str, base_url: &str) -> Result<String> {
    FeedBuilder::new(base_url).feed_for(index, hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(filename: &str, title: &str, number: Option<u32>, size: u64) -> Track {
        Track {
            path: PathBuf::from("/nonexistent/book").join(filename),
            filename: filename.to_string(),
            title: title.to_string(),
            author: "Frank Herbert".into(),
            album: "Dune".into(),
            track_number: number,
            duration_seconds: 61,
            duration_display: "0:01:01".into(),
            size_bytes: size,
        }
    }

    fn index() -> LibraryIndex {
        let book = Book::from_tracks(
            "/nonexistent/book",
            vec![
                (ContentHash::from("t2"), track("02.mp3", "Second", Some(2), 200)),
                (ContentHash::from("t1"), track("01.mp3", "First <&\u{1}>", Some(1), 100)),
            ],
        );
        let mut index = LibraryIndex::new();
        index.insert(ContentHash::from("book"), book);
        index
    }

    #[test]
    fn pub_dates_count_down_from_epoch() {
        assert_eq!(pub_date(0), "Sun, 31 Dec 2000 00:00:00 +0000");
        assert_eq!(pub_date(1), "Sat, 30 Dec 2000 00:00:00 +0000");
        assert_eq!(pub_date(31), "Thu, 30 Nov 2000 00:00:00 +0000");
    }

    #[test]
    fn unknown_book_is_not_found() {
        let result = feed_for(&index(), "missing", "http://host/");
        assert!(matches!(result, Err(Error::BookNotFound(h)) if h == "missing"));
    }

    #[test]
    fn feed_has_channel_and_items_in_order() {
        let xml = feed_for(&index(), "book", "http://host/").unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd""#));
        assert!(xml.contains(r#"version="2.0""#));
        assert!(xml.contains("<title>Dune</title>"));
        assert_eq!(xml.matches("<item>").count(), 2);

        let first = xml.find(r#"<guid isPermaLink="false">t1</guid>"#).unwrap();
        let second = xml.find(r#"<guid isPermaLink="false">t2</guid>"#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn item_fields() {
        let xml = feed_for(&index(), "book", "http://host/").unwrap();

        assert!(xml.contains("<title>First &lt;&amp;&gt;</title>"));
        assert!(xml.contains("<itunes:category>Book</itunes:category>"));
        assert!(xml.contains("<itunes:explicit>no</itunes:explicit>"));
        assert!(xml.contains("<itunes:duration>0:01:01</itunes:duration>"));
        assert!(xml.contains(
            r#"<enclosure url="http://host/?a=book&amp;f=t1" length="100" type="audio/mpeg"/>"#
        ));
        assert!(xml.contains("<pubDate>Sun, 31 Dec 2000 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<pubDate>Sat, 30 Dec 2000 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn track_url_appends_query() {
        let builder = FeedBuilder::new("https://books.example/");
        assert_eq!(builder.track_url("a1", "f2"), "https://books.example/?a=a1&f=f2");
    }
}
