//! `Range` header parsing against a known file size.

use shelfcast_common::{Error, Result};

/// An inclusive byte span inside a file of `size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub size: u64,
}

impl ByteRange {
    /// Number of bytes covered.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a `206` response.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.size)
    }
}

/// Parse a `Range: bytes=START-END` header value against `size`.
///
/// Either bound may be omitted: a missing start means `0`, a missing end means
/// the last byte. An end past the file is clamped. Only the first range of a
/// multi-range header is honoured.
///
/// ```
/// use shelfcast::streaming::parse_range_header;
///
/// let range = parse_range_header("bytes=100-199", 1000).unwrap();
/// assert_eq!((range.start, range.end, range.len()), (100, 199, 100));
/// assert!(parse_range_header("bytes=1000-", 1000).is_err());
/// ```
pub fn parse_range_header(value: &str, size: u64) -> Result<ByteRange> {
    let malformed = || Error::malformed_range(value, size);

    let spec = value
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(malformed)?;
    let first = spec.split(',').next().unwrap_or_default();
    let (start_str, end_str) = first.split_once('-').ok_or_else(malformed)?;
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    let start: u64 = if start_str.is_empty() {
        0
    } else {
        start_str.parse().map_err(|_| malformed())?
    };

    let last = size.checked_sub(1).ok_or_else(malformed)?;
    let end: u64 = if end_str.is_empty() {
        last
    } else {
        end_str.parse::<u64>().map_err(|_| malformed())?.min(last)
    };

    if start >= size || start > end {
        return Err(malformed());
    }

    Ok(ByteRange { start, end, size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(value: &str) -> Option<(u64, u64)> {
        parse_range_header(value, 1000).ok().map(|r| (r.start, r.end))
    }

    #[test]
    fn closed_range() {
        let range = parse_range_header("bytes=100-199", 1000).unwrap();
        assert_eq!(range.len(), 100);
        assert_eq!(range.content_range(), "bytes 100-199/1000");
    }

    #[test]
    fn open_bounds() {
        assert_eq!(parse("bytes=500-"), Some((500, 999)));
        assert_eq!(parse("bytes=-100"), Some((0, 100)));
        assert_eq!(parse("bytes=-"), Some((0, 999)));
    }

    #[test]
    fn end_is_clamped() {
        assert_eq!(parse("bytes=900-5000"), Some((900, 999)));
        assert_eq!(parse("bytes=999-999"), Some((999, 999)));
    }

    #[test]
    fn only_first_range_counts() {
        assert_eq!(parse("bytes=0-9, 20-29"), Some((0, 9)));
    }

    #[test]
    fn unsatisfiable_or_garbled() {
        for value in [
            "bytes=1000-",
            "bytes=200-100",
            "bytes=abc-def",
            "bytes=10",
            "items=0-10",
            "",
        ] {
            assert_matches!(
                parse_range_header(value, 1000),
                Err(Error::MalformedRange { .. }),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_file_has_no_satisfiable_range() {
        assert!(parse_range_header("bytes=0-", 0).is_err());
    }
}
