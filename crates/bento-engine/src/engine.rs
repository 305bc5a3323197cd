//! The render engine facade.

use std::sync::Arc;

use serde_json::Value;

use bento_mime::{Artifact, MimeBundle, MimeRenderer, RenderContext, RenderError, UrlResolver, mime};

use crate::registry::RendererRegistry;
use crate::select;

/// Renders mime bundles into artifacts under a trust policy.
///
/// Owns one [`RendererRegistry`] and an optional resolver collaborator.
/// Create one per logical document context; [`Clone`] produces an engine
/// with an independent registry (new map and order, same renderer objects)
/// and an independently reassignable resolver slot.
///
/// The engine is single-threaded and synchronous: every call runs to
/// completion against a snapshot of the order taken at entry. Callers that
/// need concurrent consumers give each its own clone.
#[derive(Clone, Default)]
pub struct RenderEngine {
    registry: RendererRegistry,
    resolver: Option<Arc<dyn UrlResolver>>,
}

impl RenderEngine {
    /// Create an engine over a registry snapshot.
    ///
    /// The default renderer set is an explicit configuration value (see
    /// `bento-renderers`), never a process-wide singleton, so engines and
    /// their clones can diverge safely.
    #[must_use]
    pub fn new(registry: RendererRegistry) -> Self {
        Self {
            registry,
            resolver: None,
        }
    }

    /// Attach a resolver collaborator.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn UrlResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// The resolver collaborator, if one is set.
    #[must_use]
    pub fn resolver(&self) -> Option<&Arc<dyn UrlResolver>> {
        self.resolver.as_ref()
    }

    /// Replace or clear the resolver collaborator.
    ///
    /// Reassigning the resolver on a clone does not affect the original.
    pub fn set_resolver(&mut self, resolver: Option<Arc<dyn UrlResolver>>) {
        self.resolver = resolver;
    }

    /// Render the best admissible representation of a bundle.
    ///
    /// Returns `Ok(None)` when no MIME type in the bundle is both
    /// registered and admissible under `trusted` — an expected, common
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Propagates the selected renderer's failure. There is no automatic
    /// fallback to the next candidate: selection stays deterministic, and
    /// a malformed entry under the winning type surfaces instead of being
    /// papered over.
    pub fn render(
        &self,
        bundle: &MimeBundle,
        trusted: bool,
    ) -> Result<Option<Artifact>, RenderError> {
        self.render_inner(bundle, trusted, None)
    }

    /// Render, additionally surfacing companion representations.
    ///
    /// The injector receives `(mimetype, value)` pairs out-of-band,
    /// independent of which MIME type is selected for visual rendering.
    /// Exactly two companions are surfaced for a non-empty bundle, in
    /// order: a `text/plain` view and an `application/json` view of the
    /// logical value. Each uses the bundle's own entry when present and is
    /// otherwise synthesized from the bundle's primary value (the
    /// highest-precedence registered entry, else the first entry).
    ///
    /// # Errors
    ///
    /// Same contract as [`render`](Self::render); companions are surfaced
    /// before selection, so they arrive even when rendering then fails or
    /// selects nothing.
    pub fn render_with_injector(
        &self,
        bundle: &MimeBundle,
        trusted: bool,
        injector: &mut dyn FnMut(&str, &Value),
    ) -> Result<Option<Artifact>, RenderError> {
        self.render_inner(bundle, trusted, Some(injector))
    }

    /// The MIME type [`render`](Self::render) would select, without
    /// rendering.
    ///
    /// For callers that need to know what would be chosen, e.g. to offer a
    /// "show alternate representation" action.
    #[must_use]
    pub fn preferred_mimetype<'b>(&self, bundle: &'b MimeBundle, trusted: bool) -> Option<&'b str> {
        select::preferred_mimetype(&self.registry, bundle, trusted)
    }

    /// Insert a renderer binding. See [`RendererRegistry::add`].
    pub fn add_renderer(
        &mut self,
        mimetype: &str,
        renderer: Arc<dyn MimeRenderer>,
        index: Option<usize>,
    ) {
        self.registry.add(mimetype, renderer, index);
    }

    /// Remove a renderer binding. See [`RendererRegistry::remove`].
    pub fn remove_renderer(&mut self, mimetype: &str) {
        self.registry.remove(mimetype);
    }

    /// Look up the renderer bound to a MIME type.
    #[must_use]
    pub fn renderer(&self, mimetype: &str) -> Option<&Arc<dyn MimeRenderer>> {
        self.registry.get(mimetype)
    }

    /// Registered MIME types in precedence order (snapshot).
    #[must_use]
    pub fn mimetypes(&self) -> std::vec::IntoIter<String> {
        self.registry.mimetypes()
    }

    fn render_inner(
        &self,
        bundle: &MimeBundle,
        trusted: bool,
        injector: Option<&mut dyn FnMut(&str, &Value)>,
    ) -> Result<Option<Artifact>, RenderError> {
        if let Some(inject) = injector {
            self.inject_companions(bundle, inject);
        }

        let Some(mimetype) = select::preferred_mimetype(&self.registry, bundle, trusted) else {
            tracing::debug!(trusted, "no renderable representation in bundle");
            return Ok(None);
        };
        let (Some(renderer), Some(value)) = (self.registry.get(mimetype), bundle.get(mimetype))
        else {
            // Selection only returns registered bundle entries.
            return Ok(None);
        };

        tracing::debug!(mimetype = %mimetype, trusted, "rendering bundle entry");
        let ctx = RenderContext {
            mimetype,
            trusted,
            resolver: self.resolver.as_deref(),
        };
        renderer.render(value, &ctx).map(Some)
    }

    /// Surface the canonical text and JSON views of the bundle's logical
    /// value, whatever its declared MIME types. Empty bundles surface
    /// nothing.
    fn inject_companions(&self, bundle: &MimeBundle, inject: &mut dyn FnMut(&str, &Value)) {
        let Some(primary) = self.primary_value(bundle) else {
            return;
        };

        match bundle.get(mime::TEXT_PLAIN) {
            Some(text) => inject(mime::TEXT_PLAIN, text),
            None => inject(mime::TEXT_PLAIN, &Value::String(display_text(primary))),
        }
        match bundle.get(mime::APPLICATION_JSON) {
            Some(json) => inject(mime::APPLICATION_JSON, json),
            None => inject(mime::APPLICATION_JSON, primary),
        }
    }

    /// The bundle's highest-precedence registered entry, falling back to
    /// its first entry when nothing is registered. Trust is irrelevant
    /// here: the injector is a raw-value side channel, not rendering.
    fn primary_value<'b>(&self, bundle: &'b MimeBundle) -> Option<&'b Value> {
        for mimetype in self.registry.mimetypes() {
            if let Some(value) = bundle.get(&mimetype) {
                return Some(value);
            }
        }
        bundle.iter().next().map(|(_, value)| value)
    }
}

/// Plain-text view of a representation value: strings pass through,
/// anything else is compactly serialized.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl std::fmt::Debug for RenderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEngine")
            .field("registry", &self.registry)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_mime::Safety;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Stub {
        safety: Safety,
    }

    impl MimeRenderer for Stub {
        fn safety(&self) -> Safety {
            self.safety
        }

        fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError> {
            match value {
                Value::String(s) => Ok(Artifact::text(ctx.mimetype, s.as_str())),
                other => Ok(Artifact::text(ctx.mimetype, other.to_string())),
            }
        }
    }

    struct Failing;

    impl MimeRenderer for Failing {
        fn safety(&self) -> Safety {
            Safety::Safe
        }

        fn render(
            &self,
            _value: &Value,
            ctx: &RenderContext<'_>,
        ) -> Result<Artifact, RenderError> {
            Err(RenderError::malformed(ctx.mimetype, "always fails"))
        }
    }

    fn renderer(safety: Safety) -> Arc<dyn MimeRenderer> {
        Arc::new(Stub { safety })
    }

    /// Engine with the order: javascript (unsafe), html (sanitizable),
    /// png (safe), plain (safe).
    fn engine() -> RenderEngine {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", renderer(Safety::Safe), None);
        registry.add("image/png", renderer(Safety::Safe), None);
        registry.add("text/html", renderer(Safety::Sanitizable), None);
        registry.add("text/javascript", renderer(Safety::Unsafe), None);
        RenderEngine::new(registry)
    }

    fn bundle(entries: &[(&str, Value)]) -> MimeBundle {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn test_preferred_follows_precedence_when_trusted() {
        let engine = engine();
        let bundle = bundle(&[
            ("text/plain", json!("foo")),
            ("text/javascript", json!("window.x=1")),
        ]);

        assert_eq!(
            engine.preferred_mimetype(&bundle, true),
            Some("text/javascript")
        );
    }

    #[test]
    fn test_preferred_never_returns_unsafe_untrusted() {
        let engine = engine();
        let bundle = bundle(&[
            ("text/plain", json!("foo")),
            ("text/javascript", json!("window.x=1")),
            ("image/png", json!("aGVsbG8=")),
        ]);

        assert_eq!(engine.preferred_mimetype(&bundle, false), Some("image/png"));
    }

    #[test]
    fn test_sanitizable_admissible_either_way() {
        let engine = engine();
        let bundle = bundle(&[
            ("text/plain", json!("foo")),
            ("text/html", json!("<h1>foo</h1>")),
        ]);

        assert_eq!(engine.preferred_mimetype(&bundle, false), Some("text/html"));
        assert_eq!(engine.preferred_mimetype(&bundle, true), Some("text/html"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let engine = engine();
        let bundle = bundle(&[("application/x-custom", json!("?"))]);

        assert_eq!(engine.preferred_mimetype(&bundle, true), None);
        assert!(engine.render(&bundle, true).unwrap().is_none());
    }

    #[test]
    fn test_unsafe_only_bundle_untrusted_renders_nothing() {
        let engine = engine();
        let bundle = bundle(&[("text/javascript", json!("window.x=1"))]);

        assert!(engine.render(&bundle, false).unwrap().is_none());
        assert!(engine.render(&bundle, true).unwrap().is_some());
    }

    #[test]
    fn test_remove_then_preferred_returns_none() {
        let mut engine = engine();
        let bundle = bundle(&[("text/plain", json!("foo"))]);

        engine.remove_renderer("text/plain");

        assert_eq!(engine.preferred_mimetype(&bundle, true), None);
    }

    #[test]
    fn test_add_without_index_takes_top_precedence() {
        let mut engine = engine();
        engine.add_renderer("application/vnd.new", renderer(Safety::Safe), None);

        assert_eq!(
            engine.mimetypes().next().as_deref(),
            Some("application/vnd.new")
        );
    }

    #[test]
    fn test_render_returns_selected_artifact() {
        let engine = engine();
        let bundle = bundle(&[
            ("text/plain", json!("foo")),
            ("text/html", json!("<h1>foo</h1>")),
        ]);

        let artifact = engine.render(&bundle, false).unwrap().unwrap();
        assert_eq!(artifact.mimetype(), "text/html");
        assert_eq!(artifact.as_str(), "<h1>foo</h1>");
    }

    #[test]
    fn test_renderer_failure_propagates_without_fallback() {
        let mut engine = engine();
        engine.add_renderer("application/json", Arc::new(Failing), None);
        let bundle = bundle(&[
            ("application/json", json!({"foo": 1})),
            ("text/plain", json!("foo")),
        ]);

        let err = engine.render(&bundle, false).unwrap_err();
        assert!(matches!(err, RenderError::MalformedEntry { .. }));
    }

    #[test]
    fn test_clone_diverges_from_original() {
        let engine = engine();
        let before: Vec<_> = engine.mimetypes().collect();

        let mut copy = engine.clone();
        assert_eq!(copy.mimetypes().collect::<Vec<_>>(), before);

        copy.add_renderer("application/vnd.clone-only", renderer(Safety::Safe), None);
        copy.remove_renderer("text/plain");

        assert_eq!(engine.mimetypes().collect::<Vec<_>>(), before);
        assert!(copy.renderer("application/vnd.clone-only").is_some());
        assert!(engine.renderer("application/vnd.clone-only").is_none());
    }

    #[test]
    fn test_clone_shares_renderer_objects() {
        let mut registry = RendererRegistry::new();
        let shared = renderer(Safety::Safe);
        registry.add("text/plain", Arc::clone(&shared), None);
        let engine = RenderEngine::new(registry);

        let copy = engine.clone();

        assert!(Arc::ptr_eq(copy.renderer("text/plain").unwrap(), &shared));
    }

    #[test]
    fn test_clone_resolver_slot_is_independent() {
        struct Identity;
        impl UrlResolver for Identity {
            fn resolve(&self, reference: &str) -> String {
                reference.to_owned()
            }
        }

        let engine = engine().with_resolver(Arc::new(Identity));
        let mut copy = engine.clone();

        copy.set_resolver(None);

        assert!(engine.resolver().is_some());
        assert!(copy.resolver().is_none());
    }

    #[test]
    fn test_injector_surfaces_existing_companions() {
        let engine = engine();
        let bundle = bundle(&[
            ("text/plain", json!("foo")),
            ("application/json", json!({"foo": 1})),
        ]);

        let mut injected = Vec::new();
        engine
            .render_with_injector(&bundle, false, &mut |mt, value| {
                injected.push((mt.to_owned(), value.clone()));
            })
            .unwrap();

        assert_eq!(
            injected,
            vec![
                ("text/plain".to_owned(), json!("foo")),
                ("application/json".to_owned(), json!({"foo": 1})),
            ]
        );
    }

    #[test]
    fn test_injector_synthesizes_from_unrelated_mimetype() {
        let engine = engine();
        let bundle = bundle(&[("image/png", json!("aGVsbG8="))]);

        let mut injected = Vec::new();
        engine
            .render_with_injector(&bundle, false, &mut |mt, value| {
                injected.push((mt.to_owned(), value.clone()));
            })
            .unwrap();

        // Both canonical views synthesized from the png payload.
        assert_eq!(
            injected,
            vec![
                ("text/plain".to_owned(), json!("aGVsbG8=")),
                ("application/json".to_owned(), json!("aGVsbG8=")),
            ]
        );
    }

    #[test]
    fn test_injector_text_view_of_structured_value() {
        let mut registry = RendererRegistry::new();
        registry.add("application/json", renderer(Safety::Safe), None);
        let engine = RenderEngine::new(registry);
        let bundle = bundle(&[("application/json", json!({"foo": 1}))]);

        let mut injected = Vec::new();
        engine
            .render_with_injector(&bundle, false, &mut |mt, value| {
                injected.push((mt.to_owned(), value.clone()));
            })
            .unwrap();

        assert_eq!(injected[0], ("text/plain".to_owned(), json!(r#"{"foo":1}"#)));
        assert_eq!(
            injected[1],
            ("application/json".to_owned(), json!({"foo": 1}))
        );
    }

    #[test]
    fn test_injector_runs_even_when_nothing_selected() {
        let engine = engine();
        let bundle = bundle(&[("application/x-custom", json!("raw"))]);

        let mut injected = Vec::new();
        let artifact = engine
            .render_with_injector(&bundle, false, &mut |mt, value| {
                injected.push((mt.to_owned(), value.clone()));
            })
            .unwrap();

        assert!(artifact.is_none());
        assert_eq!(injected.len(), 2);
    }

    #[test]
    fn test_injector_empty_bundle_surfaces_nothing() {
        let engine = engine();

        let mut injected = Vec::new();
        engine
            .render_with_injector(&MimeBundle::new(), false, &mut |mt, value| {
                injected.push((mt.to_owned(), value.clone()));
            })
            .unwrap();

        assert!(injected.is_empty());
    }
}
