//! XML text escaping for feed content.
//!
//! Tag values come straight from user files and may hold anything. Markup
//! characters are entity-escaped; characters XML 1.0 forbids or discourages
//! are dropped.

/// Whether `c` may not appear in an XML 1.0 document (or is discouraged).
fn is_illegal(c: char) -> bool {
    let cp = c as u32;
    match cp {
        0x09 | 0x0A | 0x0D => false,
        0x00..=0x1F => true,
        0x7F..=0x84 | 0x86..=0x9F => true,
        0xFDD0..=0xFDEF => true,
        _ => (cp & 0xFFFE) == 0xFFFE,
    }
}

/// Escape `s` for use as XML text or a double-quoted attribute value.
///
/// ```
/// use shelfcast_feed::escape::escape_xml;
///
/// assert_eq!(escape_xml("Tom & Jerry <3"), "Tom &amp; Jerry &lt;3");
/// assert_eq!(escape_xml("bell\u{7}"), "bell");
/// ```
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_illegal(c) => {}
            c => out.push(c),
        }
    }
    out
}
