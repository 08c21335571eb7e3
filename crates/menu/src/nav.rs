// ABOUTME: Two-state navigation controller: viewing feeds, or viewing one feed's items.
// ABOUTME: Applies selection tokens to whichever menu is active; the feed page survives item viewing.

use std::sync::Arc;

use rsspager_feed::Document;
use tracing::debug;

use crate::config::MenuConfig;
use crate::error::NavigationError;
use crate::feeds::FeedMenu;
use crate::items::ItemMenu;
use crate::page::{PageView, SelectMenu};
use crate::token::{EntryKind, Selection};

/// Navigation state tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    ViewingFeeds,
    ViewingItems { feed_index: usize },
}

/// The menu bound to the active view.
#[derive(Debug, Clone)]
enum ActiveView {
    Feeds,
    Items(ItemMenu),
}

/// What the caller should do after a selection was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The active page changed and should be redrawn.
    Redraw,
    /// Nothing changed.
    Unchanged,
    /// An item was picked; navigation state is untouched.
    Open {
        feed: Arc<Document>,
        item_index: usize,
    },
}

impl Outcome {
    fn moved(changed: bool) -> Self {
        if changed {
            Outcome::Redraw
        } else {
            Outcome::Unchanged
        }
    }
}

/// Owns the feed collection and the active view.
///
/// Starts in `ViewingFeeds` at page 0 and has no terminal state.
#[derive(Debug, Clone)]
pub struct Navigator {
    config: MenuConfig,
    feeds: FeedMenu,
    view: ActiveView,
}

impl Navigator {
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            feeds: FeedMenu::new(config.effective_page_size()),
            view: ActiveView::Feeds,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn state(&self) -> NavState {
        match &self.view {
            ActiveView::Feeds => NavState::ViewingFeeds,
            ActiveView::Items(menu) => NavState::ViewingItems {
                feed_index: menu.feed_index(),
            },
        }
    }

    pub fn feeds(&self) -> &FeedMenu {
        &self.feeds
    }

    /// The menu currently being paged.
    pub fn active(&self) -> &dyn SelectMenu {
        match &self.view {
            ActiveView::Feeds => &self.feeds,
            ActiveView::Items(menu) => menu,
        }
    }

    fn active_mut(&mut self) -> &mut dyn SelectMenu {
        match &mut self.view {
            ActiveView::Feeds => &mut self.feeds,
            ActiveView::Items(menu) => menu,
        }
    }

    pub fn page_view(&self) -> PageView {
        self.active().page_view()
    }

    /// Extends the feed collection. An active item view is left alone.
    pub fn add_feed(&mut self, feed: Arc<Document>) -> usize {
        self.feeds.push(feed)
    }

    /// Parses and applies a raw token from the transport.
    pub fn select(&mut self, token: &str) -> Result<Outcome, NavigationError> {
        let selection = token.parse::<Selection>()?;
        self.apply(selection)
    }

    pub fn apply(&mut self, selection: Selection) -> Result<Outcome, NavigationError> {
        let outcome = match (selection, self.state()) {
            (Selection::Entry(EntryKind::Feed, index), NavState::ViewingFeeds) => {
                self.open_feed(index)?
            }
            (Selection::Entry(EntryKind::Item, index), NavState::ViewingItems { .. }) => {
                self.open_item(index)?
            }
            (Selection::Entry(kind, _), _) => return Err(NavigationError::WrongView { kind }),
            (Selection::Back, NavState::ViewingFeeds) => Outcome::Unchanged,
            (Selection::Back, NavState::ViewingItems { .. }) => {
                self.view = ActiveView::Feeds;
                Outcome::Redraw
            }
            (Selection::Next, _) => Outcome::moved(self.active_mut().page_next()),
            (Selection::Previous, _) => Outcome::moved(self.active_mut().page_previous()),
            (Selection::Page, _) => Outcome::Unchanged,
        };

        debug!(%selection, state = ?self.state(), page = self.active().page(), "applied selection");
        Ok(outcome)
    }

    fn open_feed(&mut self, index: usize) -> Result<Outcome, NavigationError> {
        let feed = self
            .feeds
            .get(index)
            .cloned()
            .ok_or_else(|| NavigationError::OutOfRange {
                kind: EntryKind::Feed,
                index,
                len: self.feeds.len(),
            })?;

        self.view = ActiveView::Items(ItemMenu::new(
            index,
            feed,
            self.config.effective_page_size(),
            self.config.preview_chars,
        ));
        Ok(Outcome::Redraw)
    }

    fn open_item(&self, index: usize) -> Result<Outcome, NavigationError> {
        let ActiveView::Items(menu) = &self.view else {
            return Err(NavigationError::WrongView {
                kind: EntryKind::Item,
            });
        };
        if index >= menu.len() {
            return Err(NavigationError::OutOfRange {
                kind: EntryKind::Item,
                index,
                len: menu.len(),
            });
        }
        Ok(Outcome::Open {
            feed: Arc::clone(menu.feed()),
            item_index: index,
        })
    }
}
