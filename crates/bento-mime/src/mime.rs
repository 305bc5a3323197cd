//! Well-known MIME type strings.

/// Plain text, the universal fallback representation.
pub const TEXT_PLAIN: &str = "text/plain";
/// HTML markup.
pub const TEXT_HTML: &str = "text/html";
/// Markdown source.
pub const TEXT_MARKDOWN: &str = "text/markdown";
/// JavaScript source (legacy type string).
pub const TEXT_JAVASCRIPT: &str = "text/javascript";
/// JavaScript source.
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";
/// Structured JSON data.
pub const APPLICATION_JSON: &str = "application/json";
/// PNG image, base64-encoded payload.
pub const IMAGE_PNG: &str = "image/png";
/// JPEG image, base64-encoded payload.
pub const IMAGE_JPEG: &str = "image/jpeg";
/// GIF image, base64-encoded payload.
pub const IMAGE_GIF: &str = "image/gif";
/// SVG markup.
pub const IMAGE_SVG: &str = "image/svg+xml";
