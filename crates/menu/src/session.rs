// ABOUTME: One browsing session: a feed collection, its navigation state, and its collaborators.
// ABOUTME: Adds feeds through the Fetcher port and turns selection tokens into replies for the transport.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rsspager_feed::{parse_document, Document, ValidationOptions};
use serde::Serialize;
use tracing::{debug, info, warn, Level};
use url::Url;

use crate::config::MenuConfig;
use crate::error::{FetchError, NavigationError, SessionError};
use crate::nav::{NavState, Navigator, Outcome};
use crate::page::PageView;
use crate::ports::{Fetcher, Renderer};
use crate::token::EntryKind;

/// An opened item, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// Description after passing through the session's Renderer.
    pub body: String,
}

/// What the transport should show after a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Reply {
    Page(PageView),
    Article(Article),
}

/// Accepts only absolute http(s) URLs.
pub fn parse_feed_url(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

/// Events must be applied one at a time, in arrival order.
pub struct Session<F, R> {
    fetcher: F,
    renderer: R,
    navigator: Navigator,
    validation: ValidationOptions,
}

impl<F: Fetcher, R: Renderer> Session<F, R> {
    pub fn new(fetcher: F, renderer: R, menu: MenuConfig, validation: ValidationOptions) -> Self {
        Self {
            fetcher,
            renderer,
            navigator: Navigator::new(menu),
            validation,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    pub fn page_view(&self) -> PageView {
        self.navigator.page_view()
    }

    /// Fetches, parses, and appends the feed at `raw_url`.
    ///
    /// The URL doubles as the origin for self-link synthesis. On any error the
    /// collection is left unchanged.
    pub fn add_feed(&mut self, raw_url: &str) -> Result<usize, SessionError> {
        let url = parse_feed_url(raw_url)?;
        debug!(%url, "fetching feed");
        let bytes = self.fetcher.fetch(&url)?;
        self.add_feed_bytes(&bytes, Some(url.as_str()))
    }

    /// Parses already-acquired bytes and appends the document.
    pub fn add_feed_bytes(
        &mut self,
        data: &[u8],
        origin: Option<&str>,
    ) -> Result<usize, SessionError> {
        let doc = parse_document(data, origin, &self.validation).map_err(|source| {
            SessionError::Feed {
                origin: origin.unwrap_or("<input>").to_string(),
                source,
            }
        })?;
        log_document(&doc);

        let title = doc.channel.title.clone();
        let index = self.navigator.add_feed(Arc::new(doc));
        info!(index, %title, origin = origin.unwrap_or_default(), "added feed");
        Ok(index)
    }

    /// Applies a selection token. Rejected tokens are logged and leave the page as it was.
    pub fn handle(&mut self, token: &str) -> Reply {
        match self.try_handle(token) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(token, error = %err, "ignoring selection");
                Reply::Page(self.page_view())
            }
        }
    }

    pub fn try_handle(&mut self, token: &str) -> Result<Reply, NavigationError> {
        match self.navigator.select(token)? {
            Outcome::Open { feed, item_index } => self.open_article(&feed, item_index),
            Outcome::Redraw | Outcome::Unchanged => Ok(Reply::Page(self.page_view())),
        }
    }

    fn open_article(&self, feed: &Document, index: usize) -> Result<Reply, NavigationError> {
        let items = &feed.channel.items;
        let item = items.get(index).ok_or(NavigationError::OutOfRange {
            kind: EntryKind::Item,
            index,
            len: items.len(),
        })?;

        Ok(Reply::Article(Article {
            title: item.title.clone(),
            link: item.primary_link().map(str::to_string),
            published: item.pub_date,
            body: self.renderer.render(&item.description),
        }))
    }
}

fn log_document(doc: &Document) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    match serde_json::to_string_pretty(doc) {
        Ok(json) => debug!(document = %json, "parsed feed document"),
        Err(err) => debug!(error = %err, "could not serialize feed document"),
    }
}
