use html5ever::local_name;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData};

use super::classifier::{Contribution, attribute, classify, tag_name};
use crate::types::{Block, BlockKind, Page, Segment};

/// Class that marks the page title element on MediaWiki pages
pub const DEFAULT_TITLE_CLASS: &str = "mw-page-title-main";

/// Elements whose raw text never reaches the reader
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Turns a parsed document into a [`Page`].
///
/// Only second-level headings and paragraphs are surfaced; text outside them
/// is dropped.
#[derive(Debug, Clone)]
pub struct DocumentWalker {
    title_class: String,
}

impl Default for DocumentWalker {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_CLASS)
    }
}

impl DocumentWalker {
    pub fn new(title_class: impl Into<String>) -> Self {
        Self {
            title_class: title_class.into(),
        }
    }

    pub fn walk(&self, root: &Handle) -> Page {
        let mut page = Page::empty();
        let mut title: Option<String> = None;
        let mut stack = vec![root.clone()];

        while let Some(node) = stack.pop() {
            if title.is_none() && self.is_title_marker(&node) {
                let text = collect_segments(&node)
                    .iter()
                    .map(Segment::visible_text)
                    .collect::<String>();
                debug!("Found page title: {text:?}");
                title = Some(text);
            }

            if let NodeData::Element { name, .. } = &node.data {
                let kind = if name.local == local_name!("h2") {
                    Some(BlockKind::Heading)
                } else if name.local == local_name!("p") {
                    Some(BlockKind::Paragraph)
                } else {
                    None
                };
                if let Some(kind) = kind {
                    page.blocks.push(Block::new(kind, collect_segments(&node)));
                }
            }

            // Reverse so the leftmost child is visited next
            for child in node.children.borrow().iter().rev() {
                stack.push(child.clone());
            }
        }

        page.title = title.unwrap_or_default();
        debug!(
            "Walked document: {} blocks, title {:?}",
            page.blocks.len(),
            page.title
        );
        page
    }

    fn is_title_marker(&self, node: &Handle) -> bool {
        attribute(node, "class").is_some_and(|class| class == self.title_class)
    }
}

/// Contributions of `node` and all of its descendants, in document order.
pub fn collect_segments(node: &Handle) -> Vec<Segment> {
    let mut segments = Vec::new();
    collect_into(node, &mut segments);
    segments
}

fn collect_into(node: &Handle, segments: &mut Vec<Segment>) {
    if tag_name(node).is_some_and(|tag| SKIPPED_ELEMENTS.contains(&tag)) {
        return;
    }

    match classify(node) {
        Contribution::Nothing => {}
        Contribution::Text(text) => match segments.last_mut() {
            Some(Segment::Text(previous)) => previous.push_str(&text),
            _ => segments.push(Segment::Text(text)),
        },
        Contribution::Link(link) => segments.push(Segment::Link(link)),
    }

    for child in node.children.borrow().iter() {
        collect_into(child, segments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{HEADING_MARKER, LINK_MARKER, RESET_MARKER, count_links};
    use crate::parsing::parse_html;
    use crate::types::{LinkIndex, LinkInfo};

    #[test]
    fn test_paragraph_with_link() {
        let page = parse_html(br#"<p>Hello <a href="x">world</a>!</p>"#);
        assert_eq!(
            page.annotated_text(),
            format!("Hello {LINK_MARKER}world{RESET_MARKER}!\n")
        );
        assert_eq!(
            page.blocks[0].segments,
            vec![
                Segment::Text("Hello ".to_string()),
                Segment::Link(LinkInfo::new("world", Some("x".to_string()))),
                Segment::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_title_found_anywhere() {
        let html = br#"<html><body><div><div><header>
            <h1><span class="mw-page-title-main">Example</span></h1>
            </header></div></div><p>Body</p></body></html>"#;
        let page = parse_html(html);
        assert_eq!(page.title, "Example");
        assert_eq!(page.annotated_text(), "Body\n");
    }

    #[test]
    fn test_first_title_wins() {
        let html = br#"<span class="mw-page-title-main">First</span>
            <span class="mw-page-title-main">Second</span>"#;
        assert_eq!(parse_html(html).title, "First");
    }

    #[test]
    fn test_missing_title_is_empty() {
        assert_eq!(parse_html(b"<p>no title</p>").title, "");
    }

    #[test]
    fn test_custom_title_class() {
        let walker = DocumentWalker::new("headline");
        let dom = crate::parsing::parse_dom(br#"<div class="headline">News <a>today</a></div>"#)
            .unwrap();
        let page = walker.walk(&dom.document);
        assert_eq!(page.title, "News today");
    }

    #[test]
    fn test_headings_and_paragraphs_in_order() {
        let html = b"<h2>One</h2><p>Middle</p><h2>Two</h2>";
        let page = parse_html(html);
        let kinds: Vec<BlockKind> = page.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Heading, BlockKind::Paragraph, BlockKind::Heading]
        );
        assert_eq!(
            page.annotated_text(),
            format!(
                "{HEADING_MARKER}One{RESET_MARKER}\nMiddle\n{HEADING_MARKER}Two{RESET_MARKER}\n"
            )
        );
    }

    #[test]
    fn test_links_keep_document_order() {
        let html = br#"<h2>Intro <a href="/a">alpha</a></h2>
            <p>see <a href="/b">beta</a> and <a href="/c">gamma</a></p>
            <div><a href="/d">outside any block</a></div>
            <p><a href="/e">delta</a></p>"#;
        let page = parse_html(html);
        let index = LinkIndex::from_page(&page);
        let names: Vec<&str> = index.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma", "delta"]);
        assert_eq!(count_links(&page.annotated_text()), 4);
    }

    #[test]
    fn test_text_outside_blocks_is_dropped() {
        let page = parse_html(b"<div>loose text</div><h3>minor heading</h3><p>kept</p>");
        assert_eq!(page.annotated_text(), "kept\n");
    }

    #[test]
    fn test_no_anchors_means_no_markers() {
        let page = parse_html(b"<h2>Title</h2><p>one</p><p>two</p>");
        assert_eq!(count_links(&page.annotated_text()), 0);
    }

    #[test]
    fn test_script_and_style_are_skipped() {
        let html = b"<p>shown<script>var hidden = 1;</script><style>p{}</style></p>";
        assert_eq!(parse_html(html).annotated_text(), "shown\n");
    }

    #[test]
    fn test_escape_sequences_in_prose_do_not_forge_links() {
        let page = parse_html(b"<p>a \x1b[32mfake</p><p><a href=x>real</a></p>");
        let index = LinkIndex::from_page(&page);
        assert_eq!(index.len(), 1);
        assert_eq!(count_links(&page.annotated_text()), index.len());
        assert_eq!(
            page.annotated_text(),
            format!("a [32mfake\n{LINK_MARKER}real{RESET_MARKER}\n")
        );
    }

    #[test]
    fn test_heading_link_keeps_heading_emphasis() {
        let page = parse_html(br#"<h2>See <a href="/x">this</a> now</h2>"#);
        assert_eq!(
            page.annotated_text(),
            format!(
                "{HEADING_MARKER}See {LINK_MARKER}this{RESET_MARKER}{HEADING_MARKER} now{RESET_MARKER}\n"
            )
        );
    }

    #[test]
    fn test_nested_anchor_text_emitted_once() {
        let page = parse_html(b"<p><a href=x><b>bold</b> tail</a></p>");
        assert_eq!(
            page.annotated_text(),
            format!("{LINK_MARKER}bold{RESET_MARKER}\n")
        );
    }
}
