//! Canonical track order within a book.
//!
//! Tag track numbers win when every track has a non-zero one and no two
//! collide.
//! Anything less falls back to a natural sort of file names, so
//! `track2.mp3` sorts before `track10.mp3`.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use shelfcast_common::{Book, ContentHash, Track};

/// File name that, when present in a book directory, forces filename order.
pub const IGNORE_TRACKNUM: &str = "ignore_tracknum";

/// How a book's tracks were ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStrategy {
    TrackNumber,
    Filename,
}

/// Whether `dir` contains the [`IGNORE_TRACKNUM`] sentinel.
pub fn has_ignore_sentinel(dir: &Path) -> bool {
    dir.join(IGNORE_TRACKNUM).exists()
}

/// Pick the ordering strategy for a set of tracks.
pub fn strategy_for<'a>(
    tracks: impl IntoIterator<Item = &'a Track>,
    force_filename: bool,
) -> OrderStrategy {
    if force_filename {
        return OrderStrategy::Filename;
    }

    let mut seen = HashSet::new();
    for track in tracks {
        match track.track_number {
            Some(n) if n != 0 && seen.insert(n) => {}
            _ => return OrderStrategy::Filename,
        }
    }
    OrderStrategy::TrackNumber
}

/// Tracks of `book` in feed order.
///
/// Ties are broken by raw filename and then by hash so the order never
/// depends on map iteration.
pub fn order_tracks(book: &Book, force_filename: bool) -> Vec<(&ContentHash, &Track)> {
    let mut tracks: Vec<_> = book.files.iter().collect();

    match strategy_for(book.files.values(), force_filename) {
        OrderStrategy::TrackNumber => {
            tracks.sort_by_key(|(_, t)| t.track_number);
        }
        OrderStrategy::Filename => {
            tracks.sort_by(|(ha, a), (hb, b)| {
                natural_cmp(&a.filename, &b.filename)
                    .then_with(|| a.filename.cmp(&b.filename))
                    .then_with(|| ha.cmp(hb))
            });
        }
    }

    tracks
}

/// One run of a file name: either digits or everything between digits.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Number(&'a str),
}

/// Split into alternating text and digit runs, always starting with text
/// (possibly empty) so segments at the same position have the same kind.
fn segments(s: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = false;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        if is_digit != in_digits {
            out.push(if in_digits {
                Segment::Number(&s[start..i])
            } else {
                Segment::Text(&s[start..i])
            });
            start = i;
            in_digits = is_digit;
        }
    }

    out.push(if in_digits {
        Segment::Number(&s[start..])
    } else {
        Segment::Text(&s[start..])
    });
    out
}

/// Compare digit runs by value without parsing, so arbitrarily long runs work.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural ordering of two names: digit runs by numeric value, text runs
/// case-insensitively.
///
/// ```
/// use shelfcast_feed::order::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("track2.mp3", "track10.mp3"), Ordering::Less);
/// assert_eq!(natural_cmp("Part 01", "part 1"), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let sa = segments(a);
    let sb = segments(b);

    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = match (x, y) {
            (Segment::Number(x), Segment::Number(y)) => cmp_digits(x, y),
            (Segment::Text(x), Segment::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            // Alternation keeps kinds aligned; unreachable in practice.
            (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    sa.len().cmp(&sb.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(filename: &str, number: Option<u32>) -> Track {
        Track {
            path: PathBuf::from("/books/x").join(filename),
            filename: filename.to_string(),
            title: filename.to_string(),
            author: "A".into(),
            album: "B".into(),
            track_number: number,
            duration_seconds: 1,
            duration_display: "0:00:01".into(),
            size_bytes: 1,
        }
    }

    fn book(tracks: &[(&str, &str, Option<u32>)]) -> Book {
        Book::from_tracks(
            "/books/x",
            tracks
                .iter()
                .map(|(hash, name, n)| (ContentHash::from(*hash), track(name, *n)))
                .collect(),
        )
    }

    fn names(book: &Book, force: bool) -> Vec<String> {
        order_tracks(book, force)
            .into_iter()
            .map(|(_, t)| t.filename.clone())
            .collect()
    }

    #[test]
    fn segments_alternate_starting_with_text() {
        assert_eq!(
            segments("ch10b"),
            vec![Segment::Text("ch"), Segment::Number("10"), Segment::Text("b")]
        );
        assert_eq!(
            segments("07"),
            vec![Segment::Text(""), Segment::Number("07"), Segment::Text("")]
        );
        assert_eq!(segments(""), vec![Segment::Text("")]);
    }

    #[test]
    fn natural_order() {
        let mut names = vec!["track10.mp3", "Track2.mp3", "track1.mp3", "intro.mp3", "track02b.mp3"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec!["intro.mp3", "track1.mp3", "Track2.mp3", "track02b.mp3", "track10.mp3"]
        );
    }

    #[test]
    fn huge_digit_runs_do_not_overflow() {
        let a = "part 99999999999999999999999999.mp3";
        let b = "part 100000000000000000000000000.mp3";
        assert_eq!(natural_cmp(a, b), Ordering::Less);
    }

    #[test]
    fn distinct_track_numbers_win_over_names() {
        let b = book(&[
            ("h1", "a.mp3", Some(3)),
            ("h2", "b.mp3", Some(1)),
            ("h3", "c.mp3", Some(2)),
        ]);
        assert_eq!(names(&b, false), vec!["b.mp3", "c.mp3", "a.mp3"]);
    }

    #[test]
    fn duplicate_track_number_falls_back_to_names() {
        let b = book(&[
            ("h1", "track10.mp3", Some(1)),
            ("h2", "track2.mp3", Some(1)),
            ("h3", "track1.mp3", Some(2)),
        ]);
        assert_eq!(names(&b, false), vec!["track1.mp3", "track2.mp3", "track10.mp3"]);
    }

    #[test]
    fn missing_track_number_falls_back_to_names() {
        let b = book(&[
            ("h1", "track10.mp3", Some(1)),
            ("h2", "track2.mp3", None),
        ]);
        assert_eq!(strategy_for(b.files.values(), false), OrderStrategy::Filename);
        assert_eq!(names(&b, false), vec!["track2.mp3", "track10.mp3"]);
    }

    #[test]
    fn track_number_zero_counts_as_missing() {
        let b = book(&[
            ("h1", "track10.mp3", Some(0)),
            ("h2", "track2.mp3", Some(1)),
        ]);
        assert_eq!(strategy_for(b.files.values(), false), OrderStrategy::Filename);
        assert_eq!(names(&b, false), vec!["track2.mp3", "track10.mp3"]);
    }

    #[test]
    fn sentinel_forces_names() {
        let b = book(&[("h1", "b.mp3", Some(1)), ("h2", "a.mp3", Some(2))]);
        assert_eq!(names(&b, true), vec!["a.mp3", "b.mp3"]);

        let dir = tempfile::tempdir().unwrap();
        assert!(!has_ignore_sentinel(dir.path()));
        std::fs::write(dir.path().join(IGNORE_TRACKNUM), b"").unwrap();
        assert!(has_ignore_sentinel(dir.path()));
    }

    #[test]
    fn equal_natural_keys_are_deterministic() {
        let b = book(&[("h2", "Part1.mp3", None), ("h1", "part1.mp3", None)]);
        // Raw filename breaks the tie: uppercase sorts first.
        assert_eq!(names(&b, false), vec!["Part1.mp3", "part1.mp3"]);
    }
}
