// src/render/tree.rs
// =============================================================================
// A minimal read-only view over a parsed HTML tree.
//
// The flattener only needs to ask a node a handful of questions:
// what kind is it, what's its tag, what attributes does it have, what text
// does it hold, and where are its first child and next sibling.
// `TreeView` captures exactly that, so the flattener never names a concrete
// parser type. The scraper/ego_tree implementation lives here too.
//
// Rust concepts:
// - Traits: an interface the flattener is generic over
// - Copy: node handles are small references, passed around by value
// =============================================================================

use ego_tree::NodeRef;
use scraper::{Html, Node};
use tracing::debug;

// The kinds of node the flattener distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Document or fragment root: a transparent container.
    Document,
    /// Comments, doctypes, processing instructions.
    Other,
}

// Read-only navigation over a foreign node structure.
pub trait TreeView: Copy {
    fn kind(&self) -> NodeKind;

    // Lowercase tag name for element nodes, `None` otherwise.
    fn tag_name(&self) -> Option<&str>;

    fn attr(&self, name: &str) -> Option<&str>;

    // Raw text for text nodes, `None` otherwise.
    fn text(&self) -> Option<&str>;

    fn first_child(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;
}

impl<'a> TreeView for NodeRef<'a, Node> {
    fn kind(&self) -> NodeKind {
        match self.value() {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::Document | Node::Fragment => NodeKind::Document,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self) -> Option<&str> {
        match self.value() {
            Node::Element(element) => Some(element.name()),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match self.value() {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        }
    }

    fn first_child(&self) -> Option<Self> {
        NodeRef::first_child(self)
    }

    fn next_sibling(&self) -> Option<Self> {
        NodeRef::next_sibling(self)
    }
}

// Parses an HTML snippet (such as rendered markdown) into a tree.
//
// html5ever never rejects input; it recovers and records what it fixed.
// Those recoveries are logged and otherwise ignored.
pub fn parse_html(html: &str) -> Html {
    let document = Html::parse_fragment(html);
    for error in &document.errors {
        debug!(%error, "html parser recovered from malformed markup");
    }
    document
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of using scraper directly?
//    - The flattener is generic over TreeView
//    - Switching HTML parsers means writing a new impl, nothing else
//
// 2. Why NodeRef::first_child(self) inside the impl?
//    - NodeRef has its own first_child method with the same name
//    - The Type::method path picks ego_tree's one explicitly
//
// 3. What is &**text?
//    - text is &Text; *text is Text; **text is the str it wraps
//    - & borrows that str
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_document_kind() {
        let html = parse_html("<p>hi</p>");
        assert_eq!(html.tree.root().kind(), NodeKind::Document);
    }

    #[test]
    fn test_element_accessors() {
        let html = parse_html(r#"<a href="https://example.com">x</a>"#);
        let root = html.tree.root();
        // fragment root -> <html> wrapper -> <a>
        let wrapper = TreeView::first_child(&root).unwrap();
        let link = TreeView::first_child(&wrapper).unwrap();

        assert_eq!(link.kind(), NodeKind::Element);
        assert_eq!(link.tag_name(), Some("a"));
        assert_eq!(link.attr("href"), Some("https://example.com"));
        assert_eq!(link.attr("title"), None);

        let text = TreeView::first_child(&link).unwrap();
        assert_eq!(text.kind(), NodeKind::Text);
        assert_eq!(text.text(), Some("x"));
        assert_eq!(text.tag_name(), None);
    }

    #[test]
    fn test_comment_is_other_kind() {
        let html = parse_html("<!-- note --><p>x</p>");
        let wrapper = TreeView::first_child(&html.tree.root()).unwrap();
        let comment = TreeView::first_child(&wrapper).unwrap();
        assert_eq!(comment.kind(), NodeKind::Other);
        assert_eq!(TreeView::next_sibling(&comment).unwrap().tag_name(), Some("p"));
    }
}
