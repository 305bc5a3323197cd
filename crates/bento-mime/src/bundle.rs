//! Multi-representation payloads keyed by MIME type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A mapping from MIME type to a representation of the same logical value.
///
/// Key order is irrelevant; rendering priority comes from the registry's
/// precedence order, never from the bundle itself. Textual MIME types carry
/// string values, `application/json` carries a structured value, and binary
/// types (images) carry base64-encoded string payloads.
///
/// Deserializes from a plain JSON object:
///
/// ```
/// use bento_mime::MimeBundle;
///
/// let bundle: MimeBundle = serde_json::from_str(
///     r#"{"text/plain": "foo", "application/json": {"foo": 1}}"#,
/// ).unwrap();
/// assert_eq!(bundle.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeBundle {
    entries: BTreeMap<String, Value>,
}

impl MimeBundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a representation, replacing any existing value for the type.
    pub fn insert(&mut self, mimetype: impl Into<String>, value: Value) {
        self.entries.insert(mimetype.into(), value);
    }

    /// Get the representation stored under a MIME type.
    #[must_use]
    pub fn get(&self, mimetype: &str) -> Option<&Value> {
        self.entries.get(mimetype)
    }

    /// Get the stored key and value for a MIME type.
    ///
    /// Useful when the returned key must outlive a lookup string.
    #[must_use]
    pub fn get_entry(&self, mimetype: &str) -> Option<(&str, &Value)> {
        self.entries
            .get_key_value(mimetype)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Whether a representation exists for a MIME type.
    #[must_use]
    pub fn contains(&self, mimetype: &str) -> bool {
        self.entries.contains_key(mimetype)
    }

    /// Number of representations in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle holds no representations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all representations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for MimeBundle {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
