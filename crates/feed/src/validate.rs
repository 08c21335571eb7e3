// ABOUTME: Ingestion-time normalization and structural validation of decoded documents.
// ABOUTME: Guid.isPermaLink defaulting, self-link synthesis, version and required-field checks.

use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::models::{parse_flag, Document, Link};

/// The only `<rss version>` the field bindings are written for.
pub const SUPPORTED_VERSION: &str = "2.0";

/// Optional validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Reject items that have neither a title nor a description.
    pub require_item_text: bool,
}

impl Document {
    /// Normalizes every item's `isPermaLink` flag.
    ///
    /// Absent or non-boolean values become "true"; recognized spellings are kept verbatim.
    pub fn postprocess(&mut self) {
        for guid in self
            .channel
            .items
            .iter_mut()
            .filter_map(|item| item.guid.as_mut())
        {
            if parse_flag(&guid.is_perma_link).is_none() {
                guid.is_perma_link = "true".to_string();
            }
        }
    }

    /// Appends an Atom self-link pointing at `origin_url` unless one exists already.
    ///
    /// Returns true when a link was added.
    pub fn resolve_self_link(&mut self, origin_url: &str) -> bool {
        if self.self_link().is_some() || origin_url.trim().is_empty() {
            return false;
        }
        self.channel.links.push(Link::atom_self(origin_url));
        true
    }

    /// Read-only structural checks; the first violation is returned.
    pub fn validate(&self, options: &ValidationOptions) -> Result<(), FeedError> {
        if self.version != SUPPORTED_VERSION {
            return Err(FeedError::SchemaVersion {
                found: self.version.clone(),
            });
        }

        let channel = &self.channel;
        require_non_blank(&channel.description, "description", "channel")?;
        require_non_blank(&channel.title, "title", "channel")?;

        if options.require_item_text {
            for (index, item) in channel.items.iter().enumerate() {
                if item.title.trim().is_empty() && item.description.trim().is_empty() {
                    return Err(FeedError::ItemText { index });
                }
            }
        }

        Ok(())
    }
}

fn require_non_blank(
    value: &str,
    field: &'static str,
    container: &'static str,
) -> Result<(), FeedError> {
    if value.trim().is_empty() {
        return Err(FeedError::RequiredField { container, field });
    }
    Ok(())
}
