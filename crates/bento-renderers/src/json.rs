//! Structured JSON rendering.

use serde_json::Value;

use bento_mime::{Artifact, MimeRenderer, RenderContext, RenderError, Safety};

/// Renders `application/json` payloads as pretty-printed text.
///
/// Accepts structured values directly, or a string carrying JSON text.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl MimeRenderer for JsonRenderer {
    fn safety(&self) -> Safety {
        Safety::Safe
    }

    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
        let structured = match value {
            Value::String(text) => serde_json::from_str::<Value>(text).map_err(|e| {
                RenderError::malformed(ctx.mimetype, format!("string payload is not JSON: {e}"))
            })?,
            other => other.clone(),
        };
        let pretty = serde_json::to_string_pretty(&structured)
            .map_err(|e| RenderError::malformed(ctx.mimetype, e.to_string()))?;
        Ok(Artifact::text(ctx.mimetype, pretty))
    }
}
