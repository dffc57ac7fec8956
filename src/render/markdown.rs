// src/render/markdown.rs
// =============================================================================
// This module renders Markdown text to HTML.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Ships an HTML writer that turns those events back into markup
//
// GitHub READMEs lean on a few extensions beyond CommonMark (tables,
// ~~strikethrough~~, task lists, footnotes), so we switch those on.
// =============================================================================

use pulldown_cmark::{html, Options, Parser};

// Renders a Markdown document to an HTML string
//
// Example:
//   "# Hi" -> "<h1>Hi</h1>\n"
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);

    // Rendered HTML is usually a bit longer than the source
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Options?
//    - A set of bit flags; insert() switches one extension on
//
// 2. What does push_html do?
//    - Consumes the parser's event iterator and appends HTML to a String
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading() {
        assert_eq!(markdown_to_html("# Hello"), "<h1>Hello</h1>\n");
    }

    #[test]
    fn test_render_link() {
        let html = markdown_to_html("Check out [Rust](https://www.rust-lang.org)!");
        assert!(html.contains(r#"<a href="https://www.rust-lang.org">Rust</a>"#));
    }

    #[test]
    fn test_render_table_extension() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let html = markdown_to_html(markdown);
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_fenced_code() {
        let html = markdown_to_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre><code class=\"language-rust\">"));
    }
}
