//! Built-in renderer set for bento.
//!
//! Provides [`MimeRenderer`](bento_mime::MimeRenderer) implementations for
//! plain text, JSON, HTML, Markdown, raster images, SVG and JavaScript,
//! together with [`default_registry`] — the default registry snapshot an
//! engine is usually constructed from.
//!
//! The default set is an explicit value, not a process-wide singleton:
//! every call builds a fresh registry, so engines built from it (and their
//! clones) can diverge safely.
//!
//! # Example
//!
//! ```
//! use bento_engine::RenderEngine;
//! use bento_mime::MimeBundle;
//! use bento_renderers::default_registry;
//! use serde_json::json;
//!
//! let engine = RenderEngine::new(default_registry());
//! let mut bundle = MimeBundle::new();
//! bundle.insert("text/html", json!("<h1>hi</h1>"));
//! bundle.insert("text/plain", json!("hi"));
//!
//! assert_eq!(engine.preferred_mimetype(&bundle, false), Some("text/html"));
//! ```

mod html;
mod image;
mod javascript;
mod json;
mod markdown;
mod resolve;
mod sanitize;
mod text;
mod util;

use std::sync::Arc;

use bento_engine::RendererRegistry;
use bento_mime::{MimeRenderer, mime};

pub use html::HtmlRenderer;
pub use image::{ImageRenderer, SvgRenderer};
pub use javascript::JavascriptRenderer;
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use resolve::BaseResolver;
pub use sanitize::sanitize_html;
pub use text::TextRenderer;

/// Default precedence order, most preferred first.
///
/// Richer and structured visual types outrank plain text; `text/plain`
/// is the lowest-precedence catch-all since a plain-text view is
/// typically derivable for any value.
pub const DEFAULT_ORDER: [&str; 10] = [
    mime::TEXT_JAVASCRIPT,
    mime::APPLICATION_JAVASCRIPT,
    mime::TEXT_HTML,
    mime::TEXT_MARKDOWN,
    mime::IMAGE_SVG,
    mime::IMAGE_PNG,
    mime::IMAGE_JPEG,
    mime::IMAGE_GIF,
    mime::APPLICATION_JSON,
    mime::TEXT_PLAIN,
];

/// Build the default registry snapshot in [`DEFAULT_ORDER`].
///
/// The raster image types share one renderer instance; the JavaScript
/// type strings share another.
#[must_use]
pub fn default_registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    let javascript: Arc<dyn MimeRenderer> = Arc::new(JavascriptRenderer);
    let image: Arc<dyn MimeRenderer> = Arc::new(ImageRenderer);

    append(&mut registry, mime::TEXT_JAVASCRIPT, Arc::clone(&javascript));
    append(&mut registry, mime::APPLICATION_JAVASCRIPT, javascript);
    append(&mut registry, mime::TEXT_HTML, Arc::new(HtmlRenderer));
    append(&mut registry, mime::TEXT_MARKDOWN, Arc::new(MarkdownRenderer));
    append(&mut registry, mime::IMAGE_SVG, Arc::new(SvgRenderer));
    append(&mut registry, mime::IMAGE_PNG, Arc::clone(&image));
    append(&mut registry, mime::IMAGE_JPEG, Arc::clone(&image));
    append(&mut registry, mime::IMAGE_GIF, image);
    append(&mut registry, mime::APPLICATION_JSON, Arc::new(JsonRenderer));
    append(&mut registry, mime::TEXT_PLAIN, Arc::new(TextRenderer));

    registry
}

fn append(registry: &mut RendererRegistry, mimetype: &str, renderer: Arc<dyn MimeRenderer>) {
    let end = registry.len();
    registry.add(mimetype, renderer, Some(end));
}
