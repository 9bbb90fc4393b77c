pub mod classifier;
pub mod walker;

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use log::{debug, error};
use markup5ever_rcdom::RcDom;

use crate::types::Page;
pub use walker::{DEFAULT_TITLE_CLASS, DocumentWalker};

/// Parse raw bytes into a DOM.
///
/// html5ever recovers from malformed markup, so the only failure here is an
/// I/O error from the input reader.
pub fn parse_dom(bytes: &[u8]) -> std::io::Result<RcDom> {
    let mut input = bytes;
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut input)?;

    if !dom.errors.is_empty() {
        debug!("html5ever recovered from {} parse errors", dom.errors.len());
    }
    Ok(dom)
}

/// Parse and walk a document with the default title marker.
pub fn parse_html(bytes: &[u8]) -> Page {
    parse_html_with(&DocumentWalker::default(), bytes)
}

pub fn parse_html_with(walker: &DocumentWalker, bytes: &[u8]) -> Page {
    match parse_dom(bytes) {
        Ok(dom) => walker.walk(&dom.document),
        Err(e) => {
            error!("Failed to parse document: {e}");
            Page::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_markup_is_recovered() {
        let page = parse_html(b"<p>unclosed <a href=x>link<p>second");
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[0].plain_text(), "unclosed link");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_html(b"").is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let page = parse_html(b"<p>caf\xe9</p>");
        assert_eq!(page.blocks.len(), 1);
        assert!(page.blocks[0].plain_text().starts_with("caf"));
    }
}
