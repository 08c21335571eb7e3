// ABOUTME: Error types for feed decoding, date normalization, and validation.
// ABOUTME: Provides FeedError (one variant per failure class) and DateParseError.

use std::fmt;
use thiserror::Error;

/// A feed date that matched neither the named-zone nor the numeric-offset layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse feed date {raw:?}")]
pub struct DateParseError {
    /// The offending text, untrimmed, exactly as it appeared in the feed.
    pub raw: String,
}

/// Errors that abort document creation.
///
/// No partially valid document is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The bytes are not well-formed XML or the root element is not `<rss>`.
    #[error("malformed feed: {0}")]
    Decode(String),

    /// A numeric element or attribute holds non-integer text.
    #[error("invalid number {value:?} in `{element}`")]
    InvalidNumber { element: String, value: String },

    /// A present date field could not be normalized.
    #[error(transparent)]
    Date(#[from] DateParseError),

    /// The `version` attribute of `<rss>` is not "2.0".
    #[error("unsupported rss document version {found:?}: only \"2.0\" is supported")]
    SchemaVersion { found: String },

    /// A mandatory channel field is missing or blank.
    #[error("`{container}` element doesn't contain required `{field}` element or it's empty")]
    RequiredField {
        container: &'static str,
        field: &'static str,
    },

    /// An item has neither a title nor a description (only when that rule is enabled).
    #[error("item {index} must contain either a `title` or a `description` element")]
    ItemText { index: usize },
}

impl FeedError {
    /// Creates a Decode error from an underlying XML error.
    pub fn decode(err: impl fmt::Display) -> Self {
        FeedError::Decode(err.to_string())
    }

    /// Creates an InvalidNumber error for the named element or attribute.
    pub fn invalid_number(element: impl Into<String>, value: impl Into<String>) -> Self {
        FeedError::InvalidNumber {
            element: element.into(),
            value: value.into(),
        }
    }
}
