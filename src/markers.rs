//! Inline markers used in annotated text.
//!
//! Markers are SGR escape sequences, so annotated text stays printable on a
//! plain terminal and `textwrap` measures it without counting the markers.

/// Starts a link's visible text
pub const LINK_MARKER: &str = "\x1b[32m";
/// Starts a heading's emphasised text
pub const HEADING_MARKER: &str = "\x1b[31m";
/// Ends a link or heading span
pub const RESET_MARKER: &str = "\x1b[0m";
/// Inverts the following text up to the next reset
pub const HIGHLIGHT_MARKER: &str = "\x1b[7m";

/// Number of links in `text`.
pub fn count_links(text: &str) -> usize {
    text.matches(LINK_MARKER).count()
}

/// Mark the `index`-th link (0-based) of `text` as highlighted.
///
/// The highlight marker goes right after that link's marker, in front of its
/// visible text. Every other character is copied as is. An index past the
/// last link leaves the text unchanged.
pub fn highlight(text: &str, index: usize) -> String {
    let mut buffer = String::with_capacity(text.len() + HIGHLIGHT_MARKER.len());
    let mut rest = text;
    let mut link_count = 0;

    while let Some(pos) = rest.find(LINK_MARKER) {
        let marker_end = pos + LINK_MARKER.len();
        buffer.push_str(&rest[..marker_end]);
        rest = &rest[marker_end..];

        if link_count == index {
            buffer.push_str(HIGHLIGHT_MARKER);
            break;
        }
        link_count += 1;
    }

    buffer.push_str(rest);
    buffer
}

/// Zero-based line of `text` on which the `index`-th link starts.
pub fn link_line(text: &str, index: usize) -> Option<usize> {
    let (pos, _) = text.match_indices(LINK_MARKER).nth(index)?;
    Some(text[..pos].matches('\n').count())
}
