//! Relative reference resolution against a document base.

use std::sync::LazyLock;

use regex::Regex;

use bento_mime::UrlResolver;

static REFERENCE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(src|href)="([^"]*)""#).unwrap());

/// Rewrite `src`/`href` attribute references in markup through a resolver.
///
/// The resolver decides what to touch; absolute and external references
/// come back unchanged by the stock implementations.
#[must_use]
pub(crate) fn rewrite_references(html: &str, resolver: &dyn UrlResolver) -> String {
    REFERENCE_ATTR
        .replace_all(html, |caps: &regex::Captures<'_>| {
            // Quotes in a resolved reference would break out of the attribute.
            let resolved = resolver.resolve(&caps[2]).replace('"', "%22");
            format!(r#"{}="{resolved}""#, &caps[1])
        })
        .into_owned()
}

/// Resolves relative references against a base URL.
///
/// The base is treated as a directory-like prefix, e.g.
/// `https://example.com/files/` or `/notebooks/current/`. `.` and `..`
/// segments collapse against the base path; `..` never climbs past the
/// base origin. Absolute, external, root-relative and fragment-only
/// references pass through unchanged.
#[derive(Clone, Debug)]
pub struct BaseResolver {
    base: String,
}

impl BaseResolver {
    /// Create a resolver over a directory-like base URL.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl UrlResolver for BaseResolver {
    fn resolve(&self, reference: &str) -> String {
        if reference.is_empty() || !is_relative(reference) {
            return reference.to_owned();
        }
        join_base(&self.base, reference)
    }
}

/// Whether a reference needs resolution at all.
fn is_relative(reference: &str) -> bool {
    !(reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
        || reference.starts_with('/')
        || reference.starts_with('#'))
}

/// Join a relative reference onto a base, collapsing `.`/`..` segments.
fn join_base(base: &str, reference: &str) -> String {
    // Split off scheme://authority so `..` cannot climb into it.
    let (prefix, path) = match base.find("://") {
        Some(idx) => {
            let after_scheme = idx + 3;
            match base[after_scheme..].find('/') {
                Some(slash) => base.split_at(after_scheme + slash),
                None => (base, ""),
            }
        }
        None => ("", base),
    };

    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    for component in reference.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                // Already at the base origin: ignore, preventing traversal.
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    format!("{prefix}/{}", segments.join("/"))
}
