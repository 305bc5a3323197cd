//! JavaScript rendering, trusted bundles only.

use serde_json::Value;

use bento_mime::{Artifact, MimeRenderer, RenderContext, RenderError, Safety};

/// Renders `text/javascript`/`application/javascript` payloads as a
/// script element artifact.
///
/// There is no sanitization path for code whose only meaningful behavior
/// is executing: the renderer is classified unsafe, so selection skips it
/// for untrusted bundles, and it refuses if invoked without trust anyway.
#[derive(Debug, Default)]
pub struct JavascriptRenderer;

impl MimeRenderer for JavascriptRenderer {
    fn safety(&self) -> Safety {
        Safety::Unsafe
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        if !ctx.trusted {
            return Err(RenderError::UntrustedActiveContent(ctx.mimetype.to_owned()));
        }
        let source = value
            .as_str()
            .ok_or_else(|| RenderError::malformed(ctx.mimetype, "expected a string payload"))?;
        Ok(Artifact::markup(
            ctx.mimetype,
            format!("<script>{source}</script>"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_trusted_renders_script_element() {
        let ctx = RenderContext::new("text/javascript", true);
        let artifact = JavascriptRenderer.render(&json!("window.x = 1;"), &ctx).unwrap();

        assert_eq!(artifact.as_str(), "<script>window.x = 1;</script>");
    }

    #[test]
    fn test_untrusted_refused() {
        let ctx = RenderContext::new("text/javascript", false);
        let err = JavascriptRenderer
            .render(&json!("window.x = 1;"), &ctx)
            .unwrap_err();

        assert!(matches!(err, RenderError::UntrustedActiveContent(_)));
    }
}
