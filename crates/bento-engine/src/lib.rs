//! Trust-aware mime bundle rendering engine.
//!
//! The engine turns a [`MimeBundle`](bento_mime::MimeBundle) — several
//! representations of one logical value — into a single renderable
//! artifact, while enforcing a trust policy that keeps untrusted content
//! from executing code.
//!
//! # Architecture
//!
//! - [`RendererRegistry`]: ordered bindings from MIME type to renderer;
//!   the order encodes precedence, most preferred first.
//! - Selection: the first MIME type in precedence order that is present in
//!   the bundle and admissible under the trust flag wins. Unsafe renderers
//!   are skipped for untrusted bundles, never downgraded or substituted;
//!   substitution emerges from first-match-wins over the ordered list.
//! - [`RenderEngine`]: the facade. Selects, resolves the renderer, passes
//!   trust through so sanitizable renderers can decide to sanitize, and
//!   optionally surfaces companion representations to an injector hook.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bento_engine::{RenderEngine, RendererRegistry};
//! use bento_mime::{Artifact, MimeBundle, MimeRenderer, RenderContext, RenderError, Safety};
//! use serde_json::{Value, json};
//!
//! struct PlainText;
//!
//! impl MimeRenderer for PlainText {
//!     fn safety(&self) -> Safety {
//!         Safety::Safe
//!     }
//!
//!     fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
//!         let text = value.as_str().unwrap_or_default();
//!         Ok(Artifact::text(ctx.mimetype, text))
//!     }
//! }
//!
//! let mut registry = RendererRegistry::new();
//! registry.add("text/plain", Arc::new(PlainText), None);
//!
//! let engine = RenderEngine::new(registry);
//! let mut bundle = MimeBundle::new();
//! bundle.insert("text/plain", json!("hello"));
//!
//! let artifact = engine.render(&bundle, false).unwrap().unwrap();
//! assert_eq!(artifact.as_str(), "hello");
//! ```

mod engine;
mod registry;
mod select;

pub use engine::RenderEngine;
pub use registry::RendererRegistry;
