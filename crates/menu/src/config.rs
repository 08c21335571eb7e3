// ABOUTME: Menu configuration: entries per page and item preview length.
// ABOUTME: Deserializable so the binary can load it from a [menu] TOML table.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const DEFAULT_PREVIEW_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Entries shown per page. Zero is treated as one.
    pub page_size: usize,

    /// Characters of the description shown for items without a title.
    pub preview_chars: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl MenuConfig {
    /// Page size with the lower bound applied.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MenuConfig::default();
        assert_eq!(config.page_size, 3);
        assert_eq!(config.preview_chars, 10);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let config = MenuConfig {
            page_size: 0,
            ..MenuConfig::default()
        };
        assert_eq!(config.effective_page_size(), 1);
    }
}
