//! Raster and vector image rendering.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde_json::Value;

use bento_mime::{Artifact, MimeRenderer, RenderContext, RenderError, Safety};

/// Renders base64-encoded raster images (`image/png`, `image/jpeg`,
/// `image/gif`) as typed data URIs.
///
/// One instance serves every raster type; the context's mimetype types
/// the data URI.
#[derive(Debug, Default)]
pub struct ImageRenderer;

impl MimeRenderer for ImageRenderer {
    fn safety(&self) -> Safety {
        Safety::Safe
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        let payload = value.as_str().ok_or_else(|| {
            RenderError::malformed(ctx.mimetype, "expected a base64 string payload")
        })?;
        // Producers often wrap base64 payloads; whitespace is not data.
        let payload: String = payload.split_whitespace().collect();
        BASE64_STANDARD.decode(payload.as_bytes()).map_err(|e| {
            RenderError::malformed(ctx.mimetype, format!("invalid base64 payload: {e}"))
        })?;

        Ok(Artifact::markup(
            ctx.mimetype,
            format!(r#"<img src="data:{};base64,{payload}">"#, ctx.mimetype),
        ))
    }
}

/// Renders `image/svg+xml` markup.
///
/// SVG can carry scripts and event handlers, so this renderer is
/// classified unsafe: selection never offers it for untrusted bundles,
/// and the renderer refuses if invoked anyway.
#[derive(Debug, Default)]
pub struct SvgRenderer;

impl MimeRenderer for SvgRenderer {
    fn safety(&self) -> Safety {
        Safety::Unsafe
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        if !ctx.trusted {
            return Err(RenderError::UntrustedActiveContent(ctx.mimetype.to_owned()));
        }
        let markup = value
            .as_str()
            .ok_or_else(|| RenderError::malformed(ctx.mimetype, "expected a string payload"))?;
        Ok(Artifact::markup(ctx.mimetype, markup))
    }
}
