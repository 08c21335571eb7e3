// ABOUTME: Selection tokens exchanged with the transport: "feed:N", "item:N", and navigation words.
// ABOUTME: Tokens are positional and only meaningful relative to the active view.

use std::fmt;
use std::str::FromStr;

use crate::error::NavigationError;

/// Which collection an entry token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Feed,
    Item,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Feed => "feed",
            EntryKind::Item => "item",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed selection token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Entry(EntryKind, usize),
    Back,
    Next,
    Previous,
    /// The page-number control. Accepted, does nothing.
    Page,
}

impl Selection {
    pub fn feed(index: usize) -> Self {
        Selection::Entry(EntryKind::Feed, index)
    }

    pub fn item(index: usize) -> Self {
        Selection::Entry(EntryKind::Item, index)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Entry(kind, index) => write!(f, "{kind}:{index}"),
            Selection::Back => f.write_str("back"),
            Selection::Next => f.write_str("next"),
            Selection::Previous => f.write_str("previous"),
            Selection::Page => f.write_str("page"),
        }
    }
}

impl FromStr for Selection {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let unknown = || NavigationError::UnknownToken(token.to_string());

        match token {
            "back" => return Ok(Selection::Back),
            "next" => return Ok(Selection::Next),
            "previous" => return Ok(Selection::Previous),
            "page" => return Ok(Selection::Page),
            _ => {}
        }

        let (kind, index) = token.split_once(':').ok_or_else(unknown)?;
        let kind = match kind {
            "feed" => EntryKind::Feed,
            "item" => EntryKind::Item,
            _ => return Err(unknown()),
        };
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown());
        }
        let index = index.parse::<usize>().map_err(|_| unknown())?;

        Ok(Selection::Entry(kind, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entry_tokens() {
        assert_eq!("feed:2".parse::<Selection>(), Ok(Selection::feed(2)));
        assert_eq!(" item:0 ".parse::<Selection>(), Ok(Selection::item(0)));
    }

    #[test]
    fn parses_navigation_words() {
        assert_eq!("back".parse::<Selection>(), Ok(Selection::Back));
        assert_eq!("next".parse::<Selection>(), Ok(Selection::Next));
        assert_eq!("previous".parse::<Selection>(), Ok(Selection::Previous));
        assert_eq!("page".parse::<Selection>(), Ok(Selection::Page));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "feed", "feed:", "feed:-1", "feed:+1", "feed:1a", "post:1", "Back", "X"] {
            assert!(
                matches!(bad.parse::<Selection>(), Err(NavigationError::UnknownToken(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Selection::feed(12).to_string(), "feed:12");
        assert_eq!(Selection::item(3).to_string(), "item:3");
        assert_eq!(Selection::Previous.to_string(), "previous");
    }
}
