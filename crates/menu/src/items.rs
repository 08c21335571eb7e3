// ABOUTME: Menu over the items of one feed.
// ABOUTME: Untitled items are shown by a character-safe prefix of their description.

use std::sync::Arc;

use rsspager_feed::{Document, Item};

use crate::page::{PageCursor, SelectMenu};
use crate::token::EntryKind;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone)]
pub struct ItemMenu {
    feed_index: usize,
    feed: Arc<Document>,
    cursor: PageCursor,
    preview_chars: usize,
}

impl ItemMenu {
    pub fn new(
        feed_index: usize,
        feed: Arc<Document>,
        page_size: usize,
        preview_chars: usize,
    ) -> Self {
        Self {
            feed_index,
            feed,
            cursor: PageCursor::new(page_size),
            preview_chars,
        }
    }

    /// Position of the bound feed in the feed collection at selection time.
    pub fn feed_index(&self) -> usize {
        self.feed_index
    }

    pub fn feed(&self) -> &Arc<Document> {
        &self.feed
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.feed.channel.items.get(index)
    }
}

impl SelectMenu for ItemMenu {
    fn kind(&self) -> EntryKind {
        EntryKind::Item
    }

    fn len(&self) -> usize {
        self.feed.channel.items.len()
    }

    fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut PageCursor {
        &mut self.cursor
    }

    fn display_text(&self, index: usize) -> Option<String> {
        self.item(index).map(|item| item_label(item, self.preview_chars))
    }
}

/// Title when present, otherwise the first `preview_chars` characters of the description.
pub fn item_label(item: &Item, preview_chars: usize) -> String {
    if !item.title.trim().is_empty() {
        return item.title.clone();
    }
    let mut label: String = item.description.chars().take(preview_chars).collect();
    label.push_str(ELLIPSIS);
    label
}
