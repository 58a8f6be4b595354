//! Markdown to Matrix HTML rendering for outgoing messages.

use pulldown_cmark::{html, Parser};

/// Render markdown `text` as HTML for `formatted_body`.
///
/// Raw HTML blocks and inline HTML in `text` pass through unchanged.
pub fn render_html(text: &str) -> String {
    let parser = Parser::new(text);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
