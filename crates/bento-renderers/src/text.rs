//! Plain text rendering, the universal fallback.

use serde_json::Value;

use bento_mime::{Artifact, MimeRenderer, RenderContext, RenderError, Safety};

/// Renders `text/plain` payloads as preformatted text.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl MimeRenderer for TextRenderer {
    fn safety(&self) -> Safety {
        Safety::Safe
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        let text = value
            .as_str()
            .ok_or_else(|| RenderError::malformed(ctx.mimetype, "expected a string payload"))?;
        Ok(Artifact::text(ctx.mimetype, text))
    }
}
