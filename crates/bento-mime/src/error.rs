//! Render error taxonomy.
//!
//! "Nothing renderable" is not an error: selection misses are reported as
//! `None` by the engine, and registry lookups on unregistered types return
//! `None`/no-op. Errors here cover only failures of a renderer on the
//! entry that was actually selected.

/// Error returned when a renderer fails on its selected entry.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The value under a MIME type cannot be interpreted by the renderer
    /// bound to that type (e.g. a structured value under a textual type,
    /// or an invalid base64 payload under an image type).
    #[error("malformed {mimetype} payload: {reason}")]
    MalformedEntry {
        /// MIME type of the offending entry.
        mimetype: String,
        /// What the renderer expected.
        reason: String,
    },
    /// An unsafe renderer was invoked for an untrusted bundle.
    ///
    /// Selection already excludes unsafe renderers from untrusted bundles;
    /// renderers re-check rather than trusting their caller.
    #[error("refusing to render active {0} content from an untrusted bundle")]
    UntrustedActiveContent(String),
}

impl RenderError {
    /// Build a [`RenderError::MalformedEntry`].
    #[must_use]
    pub fn malformed(mimetype: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            mimetype: mimetype.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_entry_message() {
        let err = RenderError::malformed("application/json", "expected JSON text");
        assert_eq!(
            err.to_string(),
            "malformed application/json payload: expected JSON text"
        );
    }

    #[test]
    fn test_untrusted_message_names_mimetype() {
        let err = RenderError::UntrustedActiveContent("text/javascript".to_owned());
        assert!(err.to_string().contains("text/javascript"));
    }
}
