//! Renderable artifacts handed back to the UI layer.

use serde::{Deserialize, Serialize};

/// The opaque renderable result of a render call.
///
/// Carries the MIME type it was rendered from so callers can offer
/// alternate-representation actions without re-running selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    mimetype: String,
    content: ArtifactContent,
}

/// Payload of an [`Artifact`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactContent {
    /// Markup ready for insertion into a document.
    Markup(String),
    /// Preformatted plain text.
    Text(String),
}

impl Artifact {
    /// Create a markup artifact.
    #[must_use]
    pub fn markup(mimetype: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            mimetype: mimetype.into(),
            content: ArtifactContent::Markup(markup.into()),
        }
    }

    /// Create a plain-text artifact.
    #[must_use]
    pub fn text(mimetype: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mimetype: mimetype.into(),
            content: ArtifactContent::Text(text.into()),
        }
    }

    /// MIME type the artifact was rendered from.
    #[must_use]
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Artifact payload.
    #[must_use]
    pub fn content(&self) -> &ArtifactContent {
        &self.content
    }

    /// Payload string regardless of kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.content {
            ArtifactContent::Markup(s) | ArtifactContent::Text(s) => s,
        }
    }

    /// Whether the payload is markup (as opposed to plain text).
    #[must_use]
    pub fn is_markup(&self) -> bool {
        matches!(self.content, ArtifactContent::Markup(_))
    }
}
