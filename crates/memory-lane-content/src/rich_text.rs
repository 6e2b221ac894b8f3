//! Rich-text rendering for hotspot info.

use pulldown_cmark::{Parser, html};

/// Renders Markdown to HTML. Inline HTML, such as colored spans, passes
/// through unchanged.
#[must_use]
pub fn render_rich_text(source: &str) -> String {
    let parser = Parser::new(source);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
