//! Precedence-order mimetype selection.

use bento_mime::MimeBundle;

use crate::registry::RendererRegistry;

/// Pick the first MIME type in precedence order that is present in the
/// bundle and admissible under the trust flag.
///
/// Earlier entries in the order always outrank later ones, even if a later
/// entry is "more trustworthy". Walks a snapshot of the order, so registry
/// mutations started mid-call are not observed.
pub(crate) fn preferred_mimetype<'b>(
    registry: &RendererRegistry,
    bundle: &'b MimeBundle,
    trusted: bool,
) -> Option<&'b str> {
    for mimetype in registry.mimetypes() {
        let Some((key, _)) = bundle.get_entry(&mimetype) else {
            continue;
        };
        let Some(renderer) = registry.get(&mimetype) else {
            continue;
        };
        if !renderer.safety().admissible(trusted) {
            tracing::debug!(mimetype = %mimetype, "skipping unsafe renderer for untrusted bundle");
            continue;
        }
        return Some(key);
    }
    None
}
