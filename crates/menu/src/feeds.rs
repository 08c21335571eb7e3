// ABOUTME: Menu over the session's feed collection.
// ABOUTME: Entries are shown by channel title and selected with "feed:N".

use std::sync::Arc;

use rsspager_feed::Document;

use crate::page::{PageCursor, SelectMenu};
use crate::token::EntryKind;

#[derive(Debug, Clone)]
pub struct FeedMenu {
    feeds: Vec<Arc<Document>>,
    cursor: PageCursor,
}

impl FeedMenu {
    pub fn new(page_size: usize) -> Self {
        Self {
            feeds: Vec::new(),
            cursor: PageCursor::new(page_size),
        }
    }

    /// Appends a feed and returns its index.
    pub fn push(&mut self, feed: Arc<Document>) -> usize {
        self.feeds.push(feed);
        self.feeds.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Document>> {
        self.feeds.get(index)
    }

    pub fn feeds(&self) -> &[Arc<Document>] {
        &self.feeds
    }
}

impl SelectMenu for FeedMenu {
    fn kind(&self) -> EntryKind {
        EntryKind::Feed
    }

    fn len(&self) -> usize {
        self.feeds.len()
    }

    fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut PageCursor {
        &mut self.cursor
    }

    fn display_text(&self, index: usize) -> Option<String> {
        self.feeds.get(index).map(|doc| doc.channel.title.clone())
    }
}
