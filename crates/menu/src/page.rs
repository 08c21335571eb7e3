// ABOUTME: The pagination abstraction shared by feed and item menus.
// ABOUTME: PageCursor holds the page bounds; SelectMenu exposes per-entry text and tokens.

use std::ops::Range;

use serde::Serialize;

use crate::token::{EntryKind, Selection};

/// Current page of a collection, with fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    page_size: usize,
}

impl PageCursor {
    /// A cursor at page 0. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }

    /// True when another page starts before `total`.
    pub fn can_advance(&self, total: usize) -> bool {
        self.offset() + self.page_size < total
    }

    pub fn can_retreat(&self) -> bool {
        self.page > 0
    }

    /// Moves forward one page if allowed. Returns whether the page changed.
    pub fn advance(&mut self, total: usize) -> bool {
        if !self.can_advance(total) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Moves back one page if allowed. Returns whether the page changed.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Indexes visible on the current page, clamped to `total`.
    pub fn visible(&self, total: usize) -> Range<usize> {
        let start = self.offset().min(total);
        let end = (self.offset() + self.page_size).min(total);
        start..end
    }
}

/// One row of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub text: String,
    pub token: String,
}

/// Everything a transport needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub entries: Vec<PageEntry>,
    /// Zero-based page number.
    pub page: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageView {
    /// One-based page label as shown on the page-number control.
    pub fn page_label(&self) -> String {
        (self.page + 1).to_string()
    }
}

/// A page-bounded view over an ordered collection of selectable entries.
pub trait SelectMenu {
    /// Token namespace of this menu's entries.
    fn kind(&self) -> EntryKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cursor(&self) -> &PageCursor;

    fn cursor_mut(&mut self) -> &mut PageCursor;

    /// Display text for entry `index`, or None when out of range.
    fn display_text(&self, index: usize) -> Option<String>;

    /// `"<kind>:<index>"`, or None when out of range.
    fn selection_token(&self, index: usize) -> Option<String> {
        (index < self.len()).then(|| Selection::Entry(self.kind(), index).to_string())
    }

    fn page(&self) -> usize {
        self.cursor().page()
    }

    fn offset(&self) -> usize {
        self.cursor().offset()
    }

    fn page_next(&mut self) -> bool {
        let total = self.len();
        self.cursor_mut().advance(total)
    }

    fn page_previous(&mut self) -> bool {
        self.cursor_mut().retreat()
    }

    fn page_view(&self) -> PageView {
        let total = self.len();
        let cursor = self.cursor();
        let entries = cursor
            .visible(total)
            .filter_map(|i| {
                Some(PageEntry {
                    text: self.display_text(i)?,
                    token: self.selection_token(i)?,
                })
            })
            .collect();

        PageView {
            entries,
            page: cursor.page(),
            has_previous: cursor.can_retreat(),
            has_next: cursor.can_advance(total),
        }
    }
}
