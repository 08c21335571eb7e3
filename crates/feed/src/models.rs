// ABOUTME: Typed RSS 2.0 document model: Document -> Channel -> Item[].
// ABOUTME: Value objects (Image, Cloud, Enclosure, Category, Guid, Source, Link) mirror the XML bindings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `<image>`: a GIF/JPEG/PNG that can be displayed with the channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: String,
}

/// `<cloud>`: rssCloud registration endpoint, all attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    pub domain: String,
    pub port: Option<u16>,
    pub path: String,
    pub register_procedure: String,
    pub protocol: String,
}

/// `<source>`: the channel an item came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub value: String,
}

/// `<enclosure>`: a media object attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    pub length: Option<u64>,
    pub mime_type: String,
}

/// `<category>` with its optional taxonomy `domain`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub domain: String,
    pub value: String,
}

/// `<guid>`: a unique identifier for an item.
///
/// `is_perma_link` keeps the raw attribute text. After ingestion it is always a
/// recognized boolean spelling (absent or unrecognized input becomes "true").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guid {
    pub is_perma_link: String,
    pub value: String,
}

impl Guid {
    /// Interprets the normalized flag; anything unrecognized counts as a permalink.
    pub fn is_perma_link(&self) -> bool {
        parse_flag(&self.is_perma_link).unwrap_or(true)
    }
}

/// Parses the boolean spellings accepted for `isPermaLink`.
pub(crate) fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// A channel or item link.
///
/// Plain RSS `<link>` carries its URL as character data (`value`). An Atom
/// `<atom:link>` carries it in `href` plus relation metadata. Which one it is
/// depends on `namespace` alone, never on which fields happen to be filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Resolved XML namespace URI, `None` for a plain RSS link.
    pub namespace: Option<String>,
    pub href: String,
    pub hreflang: String,
    pub length: Option<u64>,
    pub title: String,
    pub media_type: String,
    pub rel: String,
    pub value: String,
}

impl Link {
    /// The URL this link points at, whichever form it came in.
    pub fn url(&self) -> &str {
        if self.is_atom() {
            &self.href
        } else {
            &self.value
        }
    }
}

/// One entry of a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub links: Vec<Link>,
    /// Raw, possibly HTML, body text.
    pub description: String,
    pub author: String,
    pub categories: Vec<Category>,
    pub comments: String,
    pub enclosure: Option<Enclosure>,
    pub guid: Option<Guid>,
    pub pub_date: Option<DateTime<Utc>>,
    pub source: Option<Source>,
}

impl Item {
    /// First link URL of the item, if any.
    pub fn primary_link(&self) -> Option<&str> {
        self.links.iter().map(Link::url).find(|u| !u.trim().is_empty())
    }
}

/// Feed-level metadata plus the ordered items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,
    /// Several links are common: the site link plus an `atom:link rel="self"`.
    pub links: Vec<Link>,
    pub description: String,
    pub language: String,
    pub copyright: String,
    pub managing_editor: String,
    pub web_master: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_build_date: Option<DateTime<Utc>>,
    pub categories: Vec<Category>,
    pub generator: String,
    pub docs: String,
    pub cloud: Option<Cloud>,
    pub ttl: Option<u32>,
    pub image: Option<Image>,
    pub rating: String,
    pub skip_hours: Vec<u8>,
    pub skip_days: Vec<String>,
    pub items: Vec<Item>,
}

/// Root of one parsed `<rss>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub version: String,
    pub channel: Channel,
}

impl Document {
    /// Canonical source URL: the href of the Atom `rel="self"` channel link.
    pub fn self_link(&self) -> Option<&str> {
        self.channel
            .links
            .iter()
            .find(|l| l.classify().is_self)
            .map(|l| l.href.as_str())
    }
}
