// ABOUTME: RSS 2.0 document library for rsspager.
// ABOUTME: Decoding, date normalization, link classification, validation, and plain-text rendering.

pub mod error;
pub mod html_utils;
pub mod link;
pub mod models;
pub mod parser;
pub mod time_parse;
pub mod validate;

pub use error::{DateParseError, FeedError};
pub use html_utils::html_to_text;
pub use link::{LinkClass, ATOM_NAMESPACE, RSS_MEDIA_TYPE};
pub use models::{Category, Channel, Cloud, Document, Enclosure, Guid, Image, Item, Link, Source};
pub use parser::{decode_document, parse_document};
pub use time_parse::parse_feed_date;
pub use validate::{ValidationOptions, SUPPORTED_VERSION};
