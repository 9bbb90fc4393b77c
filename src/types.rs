/// A hyperlink as it appears in the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Visible text, as rendered between the link and reset markers
    pub text: String,
    /// Raw `href` attribute. Kept for inspection only, links are not followed.
    pub href: Option<String>,
}

impl LinkInfo {
    pub fn new(text: impl Into<String>, href: Option<String>) -> Self {
        Self {
            text: text.into(),
            href,
        }
    }
}

/// One typed run of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(LinkInfo),
}

impl Segment {
    /// Text a reader sees, with no markers.
    pub fn visible_text(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Link(link) => &link.text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Second-level heading, rendered with emphasis
    Heading,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub segments: Vec<Segment>,
}

impl Block {
    pub fn new(kind: BlockKind, segments: Vec<Segment>) -> Self {
        Self { kind, segments }
    }

    pub fn plain_text(&self) -> String {
        self.segments.iter().map(Segment::visible_text).collect()
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkInfo> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Link(link) => Some(link),
            Segment::Text(_) => None,
        })
    }
}

/// Readable content of one fetched document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Empty when the document carries no title marker
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Encode the page as annotated text: headings wrapped in the heading
    /// marker, links wrapped in the link marker, one line break per block.
    /// Inside a heading the heading marker is repeated after each link.
    pub fn annotated_text(&self) -> String {
        use crate::markers::{HEADING_MARKER, LINK_MARKER, RESET_MARKER};

        let mut buffer = String::new();
        for block in &self.blocks {
            if block.kind == BlockKind::Heading {
                buffer.push_str(HEADING_MARKER);
            }
            for segment in &block.segments {
                match segment {
                    Segment::Text(text) => buffer.push_str(text),
                    Segment::Link(link) => {
                        buffer.push_str(LINK_MARKER);
                        buffer.push_str(&link.text);
                        buffer.push_str(RESET_MARKER);
                        // The reset also ends the heading style
                        if block.kind == BlockKind::Heading {
                            buffer.push_str(HEADING_MARKER);
                        }
                    }
                }
            }
            if block.kind == BlockKind::Heading {
                buffer.push_str(RESET_MARKER);
            }
            buffer.push('\n');
        }
        buffer
    }
}

/// Ordered links of a page, 0-based in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIndex {
    links: Vec<LinkInfo>,
}

impl LinkIndex {
    pub fn from_page(page: &Page) -> Self {
        Self {
            links: page.blocks.iter().flat_map(Block::links).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LinkInfo> {
        self.links.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkInfo> {
        self.links.iter()
    }
}
