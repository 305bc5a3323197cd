//! CLI command implementations.

mod mimetypes;
mod render;

pub(crate) use mimetypes::MimetypesArgs;
pub(crate) use render::RenderArgs;

use std::sync::Arc;

use bento_config::Config;
use bento_engine::RenderEngine;
use bento_renderers::{BaseResolver, default_registry};

/// Build an engine from the default registry, applying the configured
/// precedence override and resolver.
pub(crate) fn build_engine(config: &Config) -> RenderEngine {
    let mut registry = default_registry();

    if let Some(order) = &config.render.order {
        for (index, mimetype) in order.iter().enumerate() {
            if let Some(renderer) = registry.get(mimetype) {
                registry.add(mimetype, Arc::clone(renderer), Some(index));
            } else {
                tracing::warn!(mimetype = %mimetype, "config orders an unregistered mimetype");
            }
        }
    }

    let mut engine = RenderEngine::new(registry);
    if let Some(base_url) = &config.resolver.base_url {
        engine.set_resolver(Some(Arc::new(BaseResolver::new(base_url.clone()))));
    }
    engine
}
