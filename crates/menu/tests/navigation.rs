// ABOUTME: Integration tests for paging, navigation, and browsing sessions.
// ABOUTME: Uses in-memory documents and closure collaborators; no network access.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rsspager_feed::{Document, Item, ValidationOptions};
use rsspager_menu::{
    FetchError, MenuConfig, NavState, NavigationError, Navigator, PageCursor, Reply,
    SelectMenu, Session, SessionError,
};
use url::Url;

fn feed(title: &str, items: usize) -> Arc<Document> {
    let mut doc = Document {
        version: "2.0".to_string(),
        ..Document::default()
    };
    doc.channel.title = title.to_string();
    doc.channel.description = format!("{title} description");
    doc.channel.items = (0..items)
        .map(|i| Item {
            title: format!("{title} item {i}"),
            ..Item::default()
        })
        .collect();
    Arc::new(doc)
}

fn navigator_with_feeds(count: usize) -> Navigator {
    let mut nav = Navigator::new(MenuConfig::default());
    for i in 0..count {
        nav.add_feed(feed(&format!("Feed {i}"), 4));
    }
    nav
}

const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <link>https://example.com/</link>
    <description>Latest</description>
    <item>
      <title>Launch</title>
      <link>https://example.com/launch</link>
      <description>&lt;p&gt;We &lt;b&gt;launched&lt;/b&gt;.&lt;/p&gt;</description>
      <pubDate>Mon, 02 Jan 2006 15:04:05 -0700</pubDate>
    </item>
    <item>
      <description>An untitled note about things</description>
    </item>
  </channel>
</rss>"#;

fn strip_tags(description: &str) -> String {
    rsspager_feed::html_to_text(description)
}

fn serving_rss(url: &Url) -> Result<Vec<u8>, FetchError> {
    if url.host_str() == Some("example.com") {
        Ok(RSS.as_bytes().to_vec())
    } else {
        Err(FetchError::transport(url.as_str(), "connection refused"))
    }
}

type FetchFn = fn(&Url) -> Result<Vec<u8>, FetchError>;
type RenderFn = fn(&str) -> String;

fn session() -> Session<FetchFn, RenderFn> {
    Session::new(
        serving_rss as FetchFn,
        strip_tags as RenderFn,
        MenuConfig::default(),
        ValidationOptions::default(),
    )
}

#[test]
fn test_feed_page_survives_item_round_trip() {
    let mut nav = navigator_with_feeds(7);
    nav.select("next").unwrap();
    assert_eq!(nav.active().page(), 1);

    nav.select("feed:4").unwrap();
    assert_eq!(nav.state(), NavState::ViewingItems { feed_index: 4 });
    assert_eq!(nav.active().page(), 0);

    nav.select("back").unwrap();
    assert_eq!(nav.state(), NavState::ViewingFeeds);
    assert_eq!(nav.active().page(), 1);
}

#[test]
fn test_feed_2_then_back_keeps_page_zero() {
    let mut nav = navigator_with_feeds(3);
    nav.select("feed:2").unwrap();
    nav.select("back").unwrap();
    assert_eq!(nav.state(), NavState::ViewingFeeds);
    assert_eq!(nav.active().page(), 0);
}

#[test]
fn test_item_view_pages_reset_per_feed() {
    let mut nav = navigator_with_feeds(2);
    nav.select("feed:0").unwrap();
    nav.select("next").unwrap();
    assert_eq!(nav.active().page(), 1);

    nav.select("back").unwrap();
    nav.select("feed:1").unwrap();
    assert_eq!(nav.active().page(), 0);
}

#[test]
fn test_page_view_rows_and_controls() {
    let mut nav = navigator_with_feeds(4);
    let first = nav.page_view();
    let tokens: Vec<&str> = first.entries.iter().map(|e| e.token.as_str()).collect();
    assert_eq!(tokens, vec!["feed:0", "feed:1", "feed:2"]);
    assert_eq!(first.entries[0].text, "Feed 0");
    assert!(!first.has_previous);
    assert!(first.has_next);
    assert_eq!(first.page_label(), "1");

    nav.select("next").unwrap();
    let second = nav.page_view();
    assert_eq!(second.entries.len(), 1);
    assert_eq!(second.entries[0].token, "feed:3");
    assert!(second.has_previous);
    assert!(!second.has_next);
}

#[test]
fn test_rejections_leave_state_alone() {
    let mut nav = navigator_with_feeds(2);
    nav.select("next").unwrap();
    let before = nav.page_view();

    assert_eq!(
        nav.select("feed:9"),
        Err(NavigationError::OutOfRange {
            kind: rsspager_menu::EntryKind::Feed,
            index: 9,
            len: 2,
        })
    );
    assert!(matches!(
        nav.select("bogus"),
        Err(NavigationError::UnknownToken(_))
    ));
    assert_eq!(nav.state(), NavState::ViewingFeeds);
    assert_eq!(nav.page_view(), before);
}

#[test]
fn test_tokens_are_positional_per_view() {
    // The same text token names different entries once the view is rebound.
    let mut nav = navigator_with_feeds(2);
    let feed_view_token = nav.page_view().entries[1].token.clone();
    nav.select("feed:0").unwrap();
    let item_view_token = nav.page_view().entries[1].token.clone();

    assert_eq!(feed_view_token, "feed:1");
    assert_eq!(item_view_token, "item:1");
    assert!(nav.select(&feed_view_token).is_err());
}

#[test]
fn test_adding_feed_does_not_disturb_item_view() {
    let mut nav = navigator_with_feeds(1);
    nav.select("feed:0").unwrap();
    let before = nav.page_view();

    nav.add_feed(feed("Late", 2));
    assert_eq!(nav.state(), NavState::ViewingItems { feed_index: 0 });
    assert_eq!(nav.page_view(), before);

    nav.select("back").unwrap();
    assert_eq!(nav.feeds().len(), 2);
}

#[test]
fn test_session_add_and_open_article() {
    let mut session = session();
    let index = session.add_feed("https://example.com/rss").unwrap();
    assert_eq!(index, 0);

    let doc = session.navigator().feeds().get(0).unwrap().clone();
    assert_eq!(doc.self_link(), Some("https://example.com/rss"));

    match session.handle("feed:0") {
        Reply::Page(view) => {
            let texts: Vec<&str> = view.entries.iter().map(|e| e.text.as_str()).collect();
            assert_eq!(texts, vec!["Launch", "An untitle..."]);
        }
        other => panic!("expected a page, got {other:?}"),
    }

    match session.handle("item:0") {
        Reply::Article(article) => {
            assert_eq!(article.title, "Launch");
            assert_eq!(article.link.as_deref(), Some("https://example.com/launch"));
            assert_eq!(article.body, "We launched.");
            assert!(article.published.is_some());
        }
        other => panic!("expected an article, got {other:?}"),
    }
    assert_eq!(session.state(), NavState::ViewingItems { feed_index: 0 });
}

#[test]
fn test_session_add_failures_leave_collection_unchanged() {
    let mut session = session();

    assert!(matches!(
        session.add_feed("not a url"),
        Err(SessionError::Fetch(FetchError::InvalidUrl { .. }))
    ));
    assert!(matches!(
        session.add_feed("https://unreachable.example.net/rss"),
        Err(SessionError::Fetch(FetchError::Transport { .. }))
    ));
    assert!(matches!(
        session.add_feed_bytes(b"<rss version=\"1.0\"/>", None),
        Err(SessionError::Feed { .. })
    ));
    assert!(session.navigator().feeds().is_empty());
}

#[test]
fn test_session_ignores_bad_tokens() {
    let mut session = session();
    session.add_feed("https://example.com/rss").unwrap();
    let before = session.page_view();

    assert_eq!(session.handle("item:0"), Reply::Page(before.clone()));
    assert_eq!(session.handle("feed:7"), Reply::Page(before.clone()));
    assert_eq!(session.handle("page"), Reply::Page(before));
    assert_eq!(session.state(), NavState::ViewingFeeds);
}

proptest! {
    #[test]
    fn page_stays_in_bounds(
        total in 0usize..40,
        page_size in 1usize..8,
        moves in proptest::collection::vec(any::<bool>(), 0..60),
    ) {
        let mut cursor = PageCursor::new(page_size);
        let last_page = if total == 0 { 0 } else { (total - 1) / page_size };

        for forward in moves {
            let before = cursor.page();
            if forward {
                let moved = cursor.advance(total);
                prop_assert_eq!(moved, before * page_size + page_size < total);
            } else {
                let moved = cursor.retreat();
                prop_assert_eq!(moved, before > 0);
            }
            prop_assert!(cursor.page() <= last_page);
        }
    }
}
