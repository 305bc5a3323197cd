//! The renderer capability contract.

use serde_json::Value;

use crate::artifact::Artifact;
use crate::error::RenderError;
use crate::resolver::UrlResolver;

/// Safety classification of a renderer, fixed at construction.
///
/// Governs whether a renderer is admissible for untrusted bundles:
/// `Safe` and `Sanitizable` renderers always are, `Unsafe` renderers only
/// when the caller vouches for the bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Safety {
    /// No injection risk regardless of trust (images, plain text, JSON).
    Safe,
    /// May contain active content, rendered after stripping dangerous
    /// constructs when untrusted (HTML, Markdown).
    Sanitizable,
    /// May execute arbitrary code if rendered directly; never renderable
    /// from untrusted data (scripts, scriptable vector markup).
    Unsafe,
}

impl Safety {
    /// Whether a renderer with this classification may handle a bundle
    /// with the given trust flag.
    #[must_use]
    pub fn admissible(self, trusted: bool) -> bool {
        trusted || !matches!(self, Self::Unsafe)
    }

    /// Classification as a display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Sanitizable => "sanitizable",
            Self::Unsafe => "unsafe",
        }
    }
}

/// Per-call context handed to [`MimeRenderer::render`].
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// MIME type selected for this render.
    pub mimetype: &'a str,
    /// Whether the caller vouches the bundle may execute active content.
    ///
    /// Sanitizable renderers must sanitize when this is `false` and may
    /// skip sanitization when it is `true`.
    pub trusted: bool,
    /// Collaborator for resolving relative references, if the document
    /// context provides one.
    pub resolver: Option<&'a dyn UrlResolver>,
}

impl<'a> RenderContext<'a> {
    /// Context without a resolver.
    #[must_use]
    pub fn new(mimetype: &'a str, trusted: bool) -> Self {
        Self {
            mimetype,
            trusted,
            resolver: None,
        }
    }

    /// Attach a resolver collaborator.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn UrlResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

/// Capability that turns one MIME type's value into a renderable artifact.
///
/// Implementations are deterministic and side-effect-free beyond producing
/// the artifact. One renderer instance may be bound to several MIME types;
/// the context carries the type selected for the call.
pub trait MimeRenderer: Send + Sync {
    /// Safety classification, fixed for the lifetime of the renderer.
    fn safety(&self) -> Safety;

    /// Render a representation value into an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedEntry`] when the value cannot be
    /// interpreted as this renderer's representation, and
    /// [`RenderError::UntrustedActiveContent`] when an unsafe renderer is
    /// invoked without trust.
    fn render(&self, value: &Value, ctx: &RenderContext<'_>) -> Result<Artifact, RenderError>;
}
