// ABOUTME: Namespace-based link classification and self-link synthesis.
// ABOUTME: A link is the feed's self-link iff it is Atom-namespaced with rel="self".

use crate::models::Link;

/// Namespace URI of RFC 4287 (Atom) elements.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Media type given to synthesized self-links.
pub const RSS_MEDIA_TYPE: &str = "application/rss+xml";

/// Result of classifying a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkClass {
    pub is_self: bool,
}

impl Link {
    /// True when the element was in the Atom namespace.
    pub fn is_atom(&self) -> bool {
        self.namespace.as_deref() == Some(ATOM_NAMESPACE)
    }

    pub fn classify(&self) -> LinkClass {
        LinkClass {
            is_self: self.is_atom() && self.rel == "self",
        }
    }

    /// Builds `<atom:link rel="self" type="application/rss+xml" href="..."/>`.
    pub fn atom_self(href: impl Into<String>) -> Self {
        Link {
            namespace: Some(ATOM_NAMESPACE.to_string()),
            href: href.into(),
            media_type: RSS_MEDIA_TYPE.to_string(),
            rel: "self".to_string(),
            ..Link::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(namespace: Option<&str>, rel: &str) -> Link {
        Link {
            namespace: namespace.map(str::to_string),
            rel: rel.to_string(),
            ..Link::default()
        }
    }

    #[test]
    fn atom_self_is_self() {
        assert!(link(Some(ATOM_NAMESPACE), "self").classify().is_self);
    }

    #[test]
    fn plain_link_with_self_rel_is_not_self() {
        // Shape doesn't matter, only the namespace does.
        let mut l = link(None, "self");
        l.href = "https://example.com/feed.xml".to_string();
        assert!(!l.classify().is_self);
    }

    #[test]
    fn other_namespace_or_rel_is_not_self() {
        assert!(!link(Some("http://purl.org/rss/1.0/"), "self").classify().is_self);
        assert!(!link(Some(ATOM_NAMESPACE), "alternate").classify().is_self);
        assert!(!link(Some(ATOM_NAMESPACE), "Self").classify().is_self);
    }

    #[test]
    fn synthesized_self_link() {
        let l = Link::atom_self("https://example.com/rss");
        assert!(l.classify().is_self);
        assert_eq!(l.media_type, RSS_MEDIA_TYPE);
        assert_eq!(l.url(), "https://example.com/rss");
    }

    #[test]
    fn url_picks_field_by_namespace() {
        let mut plain = link(None, "");
        plain.value = "https://example.com/".to_string();
        plain.href = "ignored".to_string();
        assert_eq!(plain.url(), "https://example.com/");

        let mut atom = link(Some(ATOM_NAMESPACE), "alternate");
        atom.href = "https://example.com/a".to_string();
        assert_eq!(atom.url(), "https://example.com/a");
    }
}
