//! Relative-reference resolution collaborator.

/// External capability that resolves relative references against the
/// current document context.
///
/// Consumed only by renderers that embed references (HTML, Markdown,
/// image-by-reference). The engine stores a resolver but never interprets
/// it; keep implementations injectable so renderers stay testable with a
/// stub.
pub trait UrlResolver: Send + Sync {
    /// Resolve a reference to an absolute, renderable reference.
    ///
    /// Absolute, external and fragment-only references are returned
    /// unchanged.
    fn resolve(&self, reference: &str) -> String;
}
