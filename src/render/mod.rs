// src/render/mod.rs
// =============================================================================
// This module turns README markdown into structured content.
//
// Submodules:
// - markdown: renders markdown to an HTML string (pulldown-cmark)
// - tree: parses HTML and exposes it through the TreeView trait (scraper)
// - flatten: walks a TreeView and produces typed Elements
// - element: the Element / Attributes data model
//
// Pipeline:
//   markdown --markdown_to_html--> HTML --parse_html--> tree --flatten--> Vec<Element>
// =============================================================================

mod element;
mod flatten;
mod markdown;
mod tree;

pub use element::Element;

use flatten::flatten;
use markdown::markdown_to_html;
use tree::parse_html;

// Renders markdown all the way down to Elements
pub fn render_elements(markdown: &str) -> Vec<Element> {
    let html = markdown_to_html(markdown);
    let document = parse_html(&html);
    flatten(document.tree.root())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is only Element public here?
//    - Callers need the result type and render_elements()
//    - How the pipeline is put together stays private to this module
// -----------------------------------------------------------------------------
