use html5ever::local_name;
use markup5ever_rcdom::{Handle, NodeData};
use std::rc::Weak;

use crate::types::LinkInfo;

/// What a single node adds to the output, ignoring its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contribution {
    Nothing,
    Text(String),
    Link(LinkInfo),
}

/// Classify one node.
///
/// Rules, first match wins:
/// 1. an anchor yields a link carrying the first non-empty text under it;
/// 2. anything inside an anchor yields nothing, rule 1 already emitted it;
/// 3. a text node yields its literal text;
/// 4. everything else yields nothing.
pub fn classify(node: &Handle) -> Contribution {
    if is_anchor(node) {
        let text = first_text(node).unwrap_or_default();
        return Contribution::Link(LinkInfo::new(text, attribute(node, "href")));
    }

    if has_anchor_ancestor(node) {
        return Contribution::Nothing;
    }

    match &node.data {
        NodeData::Text { contents } => Contribution::Text(strip_controls(&contents.borrow())),
        _ => Contribution::Nothing,
    }
}

pub fn is_anchor(node: &Handle) -> bool {
    matches!(&node.data, NodeData::Element { name, .. } if name.local == local_name!("a"))
}

/// Local tag name of an element node.
pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn attribute(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == key)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

pub fn parent_of(node: &Handle) -> Option<Handle> {
    // The parent link lives in a Cell, so it has to be taken and put back
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

fn has_anchor_ancestor(node: &Handle) -> bool {
    let mut current = parent_of(node);
    while let Some(parent) = current {
        if is_anchor(&parent) {
            return true;
        }
        current = parent_of(&parent);
    }
    false
}

/// Page text with control characters removed, so it can never forge a marker.
/// Line breaks and tabs survive.
pub fn strip_controls(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// First non-whitespace text under `node` in document order, falling back
/// to the first text node when all of it is whitespace.
fn first_text(node: &Handle) -> Option<String> {
    find_text(node, &|text| !text.trim().is_empty())
        .or_else(|| find_text(node, &|_| true))
        .map(|text| strip_controls(&text))
}

fn find_text(node: &Handle, accept: &dyn Fn(&str) -> bool) -> Option<String> {
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            let contents = contents.borrow();
            if accept(&contents) {
                return Some(contents.to_string());
            }
        } else if let Some(text) = find_text(child, accept) {
            return Some(text);
        }
    }
    None
}
