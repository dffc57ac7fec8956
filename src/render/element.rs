// src/render/element.rs
// =============================================================================
// The typed content nodes the flattener produces.
//
// An Element is what a front end renders: a heading, a paragraph, a link...
// Leaf types (heading, image, code, text) carry `content` and/or
// `attributes`; container types (paragraph, list, table, ...) carry
// `children`. Text elements are always leaves with non-empty trimmed content.
//
// JSON shape:
//   { "type": "...", "content"?: "...", "children"?: [...], "attributes"?: {...} }
// =============================================================================

use serde::Serialize;

// The closed set of element types.
//
// Serialized in snake_case, e.g. `ElementType::CodeBlock` -> `"code_block"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Heading,
    Paragraph,
    Link,
    Image,
    Code,
    CodeBlock,
    Strong,
    Emphasis,
    UnorderedList,
    OrderedList,
    ListItem,
    Table,
    TableRow,
    TableHeaderCell,
    TableCell,
    Text,
}

// Structured extras captured from the source tag.
//
// Every field is optional and omitted from JSON when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // Stores `value` under the HTML attribute name `name`.
    //
    // Names outside the captured set are ignored.
    pub fn set(&mut self, name: &str, value: &str) {
        let slot = match name {
            "href" => &mut self.href,
            "src" => &mut self.src,
            "alt" => &mut self.alt,
            "title" => &mut self.title,
            "width" => &mut self.width,
            "height" => &mut self.height,
            "level" => &mut self.level,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

// One flattened unit of README content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Element>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Element {
    // A bare element of the given type, no payload at all.
    pub fn new(kind: ElementType) -> Self {
        Self {
            kind,
            content: None,
            children: None,
            attributes: None,
        }
    }

    // A text leaf. Callers pass already-trimmed, non-empty text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new(ElementType::Text)
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = Some(children);
        self
    }

    // Attaches attributes, dropping them entirely when none were captured.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = (!attributes.is_empty()).then_some(attributes);
        self
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does skip_serializing_if do?
//    - Leaves a field out of the JSON when the check returns true
//    - So a text element is just {"type": "text", "content": "..."}
//
// 2. What is the `with_*` pattern?
//    - Each method takes self, changes one field, and returns self
//    - Element::new(kind).with_content(..).with_children(..)
//
// 3. Why `impl Into<String>`?
//    - Callers can pass &str or String, whichever they have
// -----------------------------------------------------------------------------
