//! Shelfcast-Feed: per-book podcast feeds.
//!
//! [`order`] decides the episode order of a book's tracks, [`escape`] makes
//! tag text safe for XML, and [`rss`] renders the channel.
//!
//! ```
//! use shelfcast_common::LibraryIndex;
//! use shelfcast_feed::feed_for;
//!
//! let index = LibraryIndex::new();
//! assert!(feed_for(&index, "unknown", "http://localhost:8085/").is_err());
//! ```

pub mod escape;
pub mod order;
pub mod rss;

pub use escape::escape_xml;
pub use order::{natural_cmp, order_tracks, OrderStrategy, IGNORE_TRACKNUM};
pub use rss::{feed_for, FeedBuilder};
