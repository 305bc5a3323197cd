//! HTML sanitization for untrusted content.
//!
//! Sanitization is content-preserving except for the stripped dangerous
//! subtrees: `<script>` elements (and their bodies) and other active
//! constructs are removed, surrounding markup structure survives. This is
//! not a blanket escape of all markup.

use std::borrow::Cow;

use ammonia::Builder;

/// Strip active content from HTML, preserving safe markup.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    builder().clean(html).to_string()
}

/// Allowlist builder on top of ammonia's defaults, which already remove
/// `<script>`/`<style>` together with their contents and restrict URL
/// schemes to non-executable ones.
fn builder() -> Builder<'static> {
    let mut builder = Builder::default();

    // Heading anchors and language-tagged code blocks survive cleaning.
    builder.add_generic_attributes(&["id", "class"]);
    // Task list checkboxes as emitted by the markdown renderer.
    builder.add_tags(&["input"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    // Inline images carry typed data URIs; data: anywhere else stays banned.
    builder.add_url_schemes(["data"].iter().copied());
    builder.attribute_filter(|element, attribute, value| {
        if (attribute == "src" || attribute == "href")
            && value.trim_start().to_ascii_lowercase().starts_with("data:")
            && !(element == "img"
                && attribute == "src"
                && value.trim_start().to_ascii_lowercase().starts_with("data:image/"))
        {
            return None;
        }
        Some(Cow::Borrowed(value))
    });

    builder
}
