// src/render/flatten.rs
// =============================================================================
// Flattens a parsed HTML tree into an ordered sequence of typed Elements.
//
// How it works:
// 1. Walk a node and all of its following siblings, in document order
// 2. For each node, dispatch on its kind:
//    - element: look the tag up in TAG_TABLE
//        * known tag   -> build one Element (content, children, attributes)
//        * unknown tag -> emit nothing itself, splice in its children
//    - text: trim; emit a text Element unless it was whitespace only
//    - document root: transparent, splice in its children
//    - other (comments, doctypes): skipped
// 3. Concatenate everything, preserving pre-order, depth-first order
//
// A recognized container's children come ONLY from flattening its own first
// child (and that child's siblings). Nothing is walked twice.
//
// Depth limit:
// - Every step down into children adds one to `depth`
// - Past MAX_DEPTH the subtree is no longer turned into nested Elements;
//   its non-empty text is spliced in as flat text leaves instead
// - Those text walks (and deep_text) use an explicit stack, not recursion
// So a README nested 20 000 levels deep still flattens on a small stack.
//
// The flattener cannot fail: odd markup just produces fewer Elements.
//
// Rust concepts:
// - Generics: `flatten` works over any TreeView, not just scraper nodes
// - const tables: the tag dispatch is plain data
// - Recursion (bounded) for structure, a Vec as a stack for deep text
// =============================================================================

use tracing::{debug, trace};

use super::element::{Attributes, Element, ElementType};
use super::tree::{NodeKind, TreeView};

// Deepest child level that still produces nested Elements
pub const MAX_DEPTH: usize = 128;

// Where an element's `content` string comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRule {
    /// No content
    None,
    /// Immediate text children only, concatenated then trimmed
    InnerText,
    /// Text of every descendant, concatenated then trimmed
    DeepText,
}

// How one tag turns into an Element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub kind: ElementType,
    pub content: ContentRule,
    /// Flatten the first child (and its siblings) into `children`
    pub children: bool,
    /// HTML attributes copied into `Attributes`
    pub attrs: &'static [&'static str],
}

const fn rule(
    kind: ElementType,
    content: ContentRule,
    children: bool,
    attrs: &'static [&'static str],
) -> TagRule {
    TagRule {
        kind,
        content,
        children,
        attrs,
    }
}

const fn container(kind: ElementType) -> TagRule {
    rule(kind, ContentRule::None, true, &[])
}

const fn heading() -> TagRule {
    rule(ElementType::Heading, ContentRule::InnerText, false, &[])
}

// Tag name -> rule. Adding a tag is one line here.
pub const TAG_TABLE: &[(&str, TagRule)] = &[
    ("h1", heading()),
    ("h2", heading()),
    ("h3", heading()),
    ("h4", heading()),
    ("h5", heading()),
    ("h6", heading()),
    ("p", container(ElementType::Paragraph)),
    ("a", rule(ElementType::Link, ContentRule::None, true, &["href", "title"])),
    (
        "img",
        rule(
            ElementType::Image,
            ContentRule::None,
            false,
            &["src", "alt", "title", "width", "height"],
        ),
    ),
    ("code", rule(ElementType::Code, ContentRule::InnerText, false, &[])),
    ("pre", rule(ElementType::CodeBlock, ContentRule::DeepText, false, &[])),
    ("strong", container(ElementType::Strong)),
    ("b", container(ElementType::Strong)),
    ("em", container(ElementType::Emphasis)),
    ("i", container(ElementType::Emphasis)),
    ("ul", container(ElementType::UnorderedList)),
    ("ol", container(ElementType::OrderedList)),
    ("li", container(ElementType::ListItem)),
    ("table", container(ElementType::Table)),
    ("tr", container(ElementType::TableRow)),
    ("th", rule(ElementType::TableHeaderCell, ContentRule::InnerText, true, &[])),
    ("td", rule(ElementType::TableCell, ContentRule::InnerText, true, &[])),
];

// Looks up the rule for a (lowercase) tag name
pub fn lookup(tag: &str) -> Option<&'static TagRule> {
    TAG_TABLE
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, rule)| rule)
}

// Flattens the subtree rooted at `root`
// (siblings of the root itself are not visited)
pub fn flatten<N: TreeView>(root: N) -> Vec<Element> {
    let mut out = Vec::new();
    visit(root, 0, &mut out);
    out
}

// Flattens `first` and every sibling after it, in document order
fn flatten_siblings<N: TreeView>(first: Option<N>, depth: usize) -> Vec<Element> {
    let mut out = Vec::new();
    let mut current = first;
    while let Some(node) = current {
        if depth > MAX_DEPTH {
            push_text_leaves(node, &mut out);
        } else {
            visit(node, depth, &mut out);
        }
        current = node.next_sibling();
    }
    out
}

fn visit<N: TreeView>(node: N, depth: usize, out: &mut Vec<Element>) {
    match node.kind() {
        NodeKind::Element => visit_element(node, depth, out),
        NodeKind::Text => push_text(node.text().unwrap_or_default(), out),
        NodeKind::Document => out.extend(flatten_siblings(node.first_child(), depth + 1)),
        NodeKind::Other => trace!("skipping non-element, non-text node"),
    }
}

fn visit_element<N: TreeView>(node: N, depth: usize, out: &mut Vec<Element>) {
    let tag = node.tag_name().unwrap_or_default();
    match lookup(tag) {
        Some(rule) => out.push(build(node, tag, rule, depth)),
        None => {
            // Unsupported markup is invisible, but its text still counts
            debug!(tag, "unrecognized tag, flattening its children in place");
            out.extend(flatten_siblings(node.first_child(), depth + 1));
        }
    }
}

fn build<N: TreeView>(node: N, tag: &str, rule: &TagRule, depth: usize) -> Element {
    let mut element = Element::new(rule.kind);

    let content = match rule.content {
        ContentRule::None => String::new(),
        ContentRule::InnerText => inner_text(node),
        ContentRule::DeepText => deep_text(node),
    };
    if !content.is_empty() {
        element = element.with_content(content);
    }

    if rule.children {
        element = element.with_children(flatten_siblings(node.first_child(), depth + 1));
    }

    let mut attributes = Attributes::default();
    for name in rule.attrs {
        if let Some(value) = node.attr(name) {
            attributes.set(name, value);
        }
    }
    if rule.kind == ElementType::Heading {
        if let Some(level) = heading_level(tag) {
            attributes.level = Some(level.to_string());
        }
    }
    element.with_attributes(attributes)
}

fn push_text(raw: &str, out: &mut Vec<Element>) {
    let text = raw.trim();
    if !text.is_empty() {
        out.push(Element::text(text));
    }
}

// Too deep to keep the structure: every text node below `node` becomes a
// flat text leaf, in document order
fn push_text_leaves<N: TreeView>(node: N, out: &mut Vec<Element>) {
    walk_text(node, |chunk| push_text(chunk, out));
}

// Calls `f` with the text of `node` and of every descendant, pre-order.
//
// The stack holds, per open level, the next sibling still to visit, so the
// walk never recurses no matter how deep the tree is.
fn walk_text<N: TreeView>(node: N, mut f: impl FnMut(&str)) {
    if let Some(chunk) = node.text() {
        f(chunk);
    }

    let mut stack = vec![node.first_child()];
    while let Some(slot) = stack.last_mut() {
        let Some(current) = *slot else {
            stack.pop();
            continue;
        };
        *slot = current.next_sibling();
        if let Some(chunk) = current.text() {
            f(chunk);
        }
        stack.push(current.first_child());
    }
}

// "h3" -> Some('3'). Anything that isn't h1-h6 -> None.
pub fn heading_level(tag: &str) -> Option<char> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h'), Some(digit @ '1'..='6'), None) => Some(digit),
        _ => None,
    }
}

// Concatenated text of the immediate text children, trimmed
pub fn inner_text<N: TreeView>(node: N) -> String {
    let mut text = String::new();
    let mut child = node.first_child();
    while let Some(current) = child {
        if let Some(chunk) = current.text() {
            text.push_str(chunk);
        }
        child = current.next_sibling();
    }
    text.trim().to_string()
}

// Concatenated text of all descendants, trimmed
pub fn deep_text<N: TreeView>(node: N) -> String {
    let mut text = String::new();
    walk_text(node, |chunk| text.push_str(chunk));
    text.trim().to_string()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a const fn?
//    - A function the compiler can run while building constants
//    - It lets TAG_TABLE be written with short helpers like container()
//
// 2. What does `digit @ '1'..='6'` mean?
//    - Match any char in the range, and bind it to the name `digit`
//
// 3. What is `let Some(x) = .. else { .. };`?
//    - let-else: bind x if the pattern matches, otherwise run the else block
//    - The else block must leave the scope (here: continue)
//
// 4. Why a Vec as a stack in walk_text?
//    - Each recursive call uses thread stack, which is small and fixed
//    - A Vec grows on the heap, so deep trees can't overflow it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::parse_html;
    use serde_json::json;

    fn flatten_str(html: &str) -> Vec<Element> {
        let document = parse_html(html);
        flatten(document.tree.root())
    }

    fn to_json(elements: &[Element]) -> serde_json::Value {
        serde_json::to_value(elements).unwrap()
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(flatten_str("   \n\t  ").is_empty());
        assert!(flatten_str("<div>\n   </div>\n<span> </span>").is_empty());
    }

    #[test]
    fn test_heading_and_paragraph_scenario() {
        let elements = flatten_str("<h2>Title</h2><p>Hello <strong>world</strong></p>");
        assert_eq!(
            to_json(&elements),
            json!([
                {"type": "heading", "content": "Title", "attributes": {"level": "2"}},
                {"type": "paragraph", "children": [
                    {"type": "text", "content": "Hello"},
                    {"type": "strong", "children": [{"type": "text", "content": "world"}]}
                ]}
            ])
        );
    }

    #[test]
    fn test_heading_levels_match_tag_suffix() {
        for level in 1..=6 {
            let elements = flatten_str(&format!("<h{level}>x</h{level}>"));
            assert_eq!(elements.len(), 1);
            let attributes = elements[0].attributes.as_ref().unwrap();
            assert_eq!(attributes.level, Some(level.to_string()));
            assert!(elements[0].children.is_none());
        }
    }

    #[test]
    fn test_image_has_only_attributes() {
        let elements = flatten_str(r#"<img src="a.png" alt="pic">"#);
        assert_eq!(
            to_json(&elements),
            json!([{"type": "image", "attributes": {"src": "a.png", "alt": "pic"}}])
        );
    }

    #[test]
    fn test_unknown_tag_is_transparent() {
        let elements = flatten_str("<p><span>hello</span></p>");
        assert_eq!(
            to_json(&elements),
            json!([{"type": "paragraph", "children": [{"type": "text", "content": "hello"}]}])
        );
    }

    #[test]
    fn test_link_captures_href_and_children() {
        let elements = flatten_str(r#"<a href="https://rust-lang.org" title="Rust">the <em>site</em></a>"#);
        assert_eq!(
            to_json(&elements),
            json!([{
                "type": "link",
                "children": [
                    {"type": "text", "content": "the"},
                    {"type": "emphasis", "children": [{"type": "text", "content": "site"}]}
                ],
                "attributes": {"href": "https://rust-lang.org", "title": "Rust"}
            }])
        );
    }

    #[test]
    fn test_containers_are_not_emitted_twice() {
        let elements = flatten_str("<ul><li>one</li><li>two</li></ul>");
        assert_eq!(elements.len(), 1);
        assert_eq!(
            to_json(&elements),
            json!([{"type": "unordered_list", "children": [
                {"type": "list_item", "children": [{"type": "text", "content": "one"}]},
                {"type": "list_item", "children": [{"type": "text", "content": "two"}]}
            ]}])
        );
    }

    #[test]
    fn test_pre_code_block_uses_nested_text() {
        let elements = flatten_str("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>");
        assert_eq!(
            to_json(&elements),
            json!([{"type": "code_block", "content": "fn main() {}"}])
        );
    }

    #[test]
    fn test_inline_code_and_bold_italic_aliases() {
        let elements = flatten_str("<p><code> x </code><b>B</b><i>I</i></p>");
        let children = elements[0].children.as_ref().unwrap();
        let kinds: Vec<_> = children.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ElementType::Code, ElementType::Strong, ElementType::Emphasis]
        );
        assert_eq!(children[0].content.as_deref(), Some("x"));
    }

    #[test]
    fn test_table_cells_carry_text_and_children() {
        let html = "<table><thead><tr><th>Name</th></tr></thead>\
                    <tbody><tr><td>value</td></tr></tbody></table>";
        let elements = flatten_str(html);
        assert_eq!(
            to_json(&elements),
            json!([{"type": "table", "children": [
                {"type": "table_row", "children": [
                    {"type": "table_header_cell", "content": "Name",
                     "children": [{"type": "text", "content": "Name"}]}
                ]},
                {"type": "table_row", "children": [
                    {"type": "table_cell", "content": "value",
                     "children": [{"type": "text", "content": "value"}]}
                ]}
            ]}])
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let elements = flatten_str("<h1>a</h1><p>b</p><!-- c --><h3>d</h3>text");
        let kinds: Vec<_> = elements.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementType::Heading,
                ElementType::Paragraph,
                ElementType::Heading,
                ElementType::Text
            ]
        );
    }

    #[test]
    fn test_flattening_twice_is_identical() {
        let document = parse_html("<h1>x</h1><ol><li><a href=\"/y\">y</a></li></ol>");
        let first = flatten(document.tree.root());
        let second = flatten(document.tree.root());
        assert_eq!(first, second);
    }

    #[test]
    fn test_heading_level_parse() {
        assert_eq!(heading_level("h1"), Some('1'));
        assert_eq!(heading_level("h6"), Some('6'));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("h10"), None);
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(lookup("b").unwrap().kind, ElementType::Strong);
        assert_eq!(lookup("pre").unwrap().content, ContentRule::DeepText);
        assert!(lookup("img").unwrap().attrs.contains(&"src"));
        assert!(!lookup("img").unwrap().children);
        assert!(lookup("span").is_none());
        assert!(lookup("div").is_none());
    }

    fn nesting(elements: &[Element]) -> usize {
        elements
            .iter()
            .map(|e| 1 + e.children.as_deref().map_or(0, nesting))
            .max()
            .unwrap_or(0)
    }

    fn texts(elements: &[Element], out: &mut Vec<String>) {
        for element in elements {
            if element.kind == ElementType::Text {
                out.extend(element.content.clone());
            }
            if let Some(children) = &element.children {
                texts(children, out);
            }
        }
    }

    #[test]
    fn test_nesting_is_capped_and_text_kept() {
        let html = format!("{}bottom", "<ul>".repeat(1_000));
        let elements = flatten_str(&html);

        assert!(nesting(&elements) <= MAX_DEPTH);
        let mut found = Vec::new();
        texts(&elements, &mut found);
        assert_eq!(found, vec!["bottom".to_string()]);
    }

    #[test]
    fn test_shallow_nesting_keeps_structure() {
        let html = format!("{}x{}", "<ul>".repeat(10), "</ul>".repeat(10));
        assert_eq!(nesting(&flatten_str(&html)), 11);
    }

    #[test]
    fn test_deep_pre_on_small_stack() {
        let html = format!("<pre>{}code</pre>", "<span>".repeat(20_000));
        let elements = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || flatten_str(&html))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(
            elements,
            vec![Element::new(ElementType::CodeBlock).with_content("code")]
        );
    }
}
