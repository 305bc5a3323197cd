//! HTML rendering with a sanitization gate.

use serde_json::Value;

use bento_mime::{Artifact, MimeRenderer, RenderContext, RenderError, Safety};

use crate::resolve::rewrite_references;
use crate::sanitize::sanitize_html;

/// Renders `text/html` payloads.
///
/// Untrusted payloads are sanitized before exposure: active subtrees are
/// stripped, surrounding markup survives. Trusted payloads pass through
/// raw. Relative `src`/`href` references are rewritten through the
/// resolver when the document context provides one.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl MimeRenderer for HtmlRenderer {
    fn safety(&self) -> Safety {
        Safety::Sanitizable
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        let source = value
            .as_str()
            .ok_or_else(|| RenderError::malformed(ctx.mimetype, "expected a string payload"))?;

        let html = if ctx.trusted {
            source.to_owned()
        } else {
            tracing::debug!(mimetype = %ctx.mimetype, "sanitizing untrusted markup");
            sanitize_html(source)
        };
        let html = match ctx.resolver {
            Some(resolver) => rewrite_references(&html, resolver),
            None => html,
        };

        Ok(Artifact::markup(ctx.mimetype, html))
    }
}
