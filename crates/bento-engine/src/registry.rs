//! Ordered renderer bindings.

use std::collections::HashMap;
use std::sync::Arc;

use bento_mime::MimeRenderer;

/// An ordered collection of MIME type → renderer bindings.
///
/// The order encodes rendering precedence, most preferred first. Every
/// MIME type in the order has exactly one binding and vice versa; the two
/// are kept in lockstep by the mutation methods.
///
/// Renderer instances are held behind [`Arc`] so cloning a registry gives
/// an independent map and order that share the same renderer objects.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    bindings: HashMap<String, Arc<dyn MimeRenderer>>,
    order: Vec<String>,
}

impl RendererRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding.
    ///
    /// With no `index` the MIME type takes the highest-precedence position
    /// (index 0). When a binding for the type already exists, the renderer
    /// is replaced in place; the position only changes when an explicit
    /// `index` differs from the current one. Indices past the end append.
    ///
    /// An empty mimetype is malformed input and is silently ignored.
    pub fn add(&mut self, mimetype: &str, renderer: Arc<dyn MimeRenderer>, index: Option<usize>) {
        if mimetype.is_empty() {
            tracing::debug!("ignoring renderer binding for empty mimetype");
            return;
        }

        let replaced = self
            .bindings
            .insert(mimetype.to_owned(), renderer)
            .is_some();

        if replaced {
            let current = self.order.iter().position(|m| m == mimetype);
            match (current, index) {
                (Some(current), Some(target)) if target != current => {
                    let entry = self.order.remove(current);
                    let target = target.min(self.order.len());
                    self.order.insert(target, entry);
                }
                (Some(_), _) => {}
                // Order fell out of lockstep with the map; restore it.
                (None, _) => self.insert_into_order(mimetype, index),
            }
        } else {
            self.insert_into_order(mimetype, index);
        }
    }

    /// Delete a binding and drop the MIME type from the order.
    ///
    /// No-op when the type is not registered.
    pub fn remove(&mut self, mimetype: &str) {
        if self.bindings.remove(mimetype).is_some() {
            self.order.retain(|m| m != mimetype);
        }
    }

    /// Look up the renderer bound to a MIME type.
    #[must_use]
    pub fn get(&self, mimetype: &str) -> Option<&Arc<dyn MimeRenderer>> {
        self.bindings.get(mimetype)
    }

    /// Registered MIME types in current precedence order.
    ///
    /// The returned iterator is a finite, restartable snapshot taken at
    /// call time; mutating the registry mid-iteration does not affect it.
    #[must_use]
    pub fn mimetypes(&self) -> std::vec::IntoIter<String> {
        self.order.clone().into_iter()
    }

    /// Number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert_into_order(&mut self, mimetype: &str, index: Option<usize>) {
        let target = index.unwrap_or(0).min(self.order.len());
        self.order.insert(target, mimetype.to_owned());
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_mime::{Artifact, RenderContext, RenderError, Safety};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    struct Stub;

    impl bento_mime::MimeRenderer for Stub {
        fn safety(&self) -> Safety {
            Safety::Safe
        }

        fn render(
            &self,
            _value: &Value,
            ctx: &RenderContext<'_>,
        ) -> Result<Artifact, RenderError> {
            Ok(Artifact::text(ctx.mimetype, ""))
        }
    }

    fn stub() -> Arc<dyn bento_mime::MimeRenderer> {
        Arc::new(Stub)
    }

    fn order_of(registry: &RendererRegistry) -> Vec<String> {
        registry.mimetypes().collect()
    }

    #[test]
    fn test_add_without_index_prepends() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.add("text/html", stub(), None);

        assert_eq!(order_of(&registry), vec!["text/html", "text/plain"]);
    }

    #[test]
    fn test_add_with_index_inserts_at_position() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.add("text/html", stub(), None);
        registry.add("application/json", stub(), Some(1));

        assert_eq!(
            order_of(&registry),
            vec!["text/html", "application/json", "text/plain"]
        );
    }

    #[test]
    fn test_add_index_past_end_appends() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.add("text/html", stub(), Some(99));

        assert_eq!(order_of(&registry), vec!["text/plain", "text/html"]);
    }

    #[test]
    fn test_replace_keeps_position_without_index() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.add("text/html", stub(), None);

        let replacement = stub();
        registry.add("text/plain", Arc::clone(&replacement), None);

        assert_eq!(order_of(&registry), vec!["text/html", "text/plain"]);
        assert!(Arc::ptr_eq(
            registry.get("text/plain").unwrap(),
            &replacement
        ));
    }

    #[test]
    fn test_replace_with_differing_index_moves() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.add("text/html", stub(), None);
        registry.add("application/json", stub(), None);

        registry.add("text/plain", stub(), Some(0));

        assert_eq!(
            order_of(&registry),
            vec!["text/plain", "application/json", "text/html"]
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_replace_with_same_index_stays_put() {
        let mut registry = RendererRegistry::new();
        registry.add("text/html", stub(), None);
        registry.add("text/plain", stub(), Some(1));

        registry.add("text/plain", stub(), Some(1));

        assert_eq!(order_of(&registry), vec!["text/html", "text/plain"]);
    }

    #[test]
    fn test_empty_mimetype_is_noop() {
        let mut registry = RendererRegistry::new();
        registry.add("", stub(), None);

        assert!(registry.is_empty());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_remove_drops_binding_and_order_entry() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.remove("text/plain");

        assert!(registry.is_empty());
        assert!(registry.get("text/plain").is_none());
    }

    #[test]
    fn test_remove_unregistered_is_noop() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);
        registry.remove("image/png");

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mimetypes_is_a_snapshot() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);

        let snapshot = registry.mimetypes();
        registry.remove("text/plain");

        assert_eq!(snapshot.collect::<Vec<_>>(), vec!["text/plain"]);
        assert_eq!(registry.mimetypes().count(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut registry = RendererRegistry::new();
        registry.add("text/plain", stub(), None);

        let mut copy = registry.clone();
        copy.add("text/html", stub(), None);
        copy.remove("text/plain");

        assert_eq!(order_of(&registry), vec!["text/plain"]);
        assert_eq!(order_of(&copy), vec!["text/html"]);
    }

    #[test]
    fn test_clone_shares_renderer_instances() {
        let mut registry = RendererRegistry::new();
        let renderer = stub();
        registry.add("text/plain", Arc::clone(&renderer), None);

        let copy = registry.clone();

        assert!(Arc::ptr_eq(copy.get("text/plain").unwrap(), &renderer));
    }
}
