// ABOUTME: Paginated browsing over a collection of parsed feeds.
// ABOUTME: Page cursors, feed/item menus, the navigation state machine, collaborator ports, and sessions.

pub mod config;
pub mod error;
pub mod feeds;
pub mod items;
pub mod nav;
pub mod page;
pub mod ports;
pub mod session;
pub mod token;

pub use config::MenuConfig;
pub use error::{FetchError, NavigationError, SessionError};
pub use feeds::FeedMenu;
pub use items::ItemMenu;
pub use nav::{NavState, Navigator, Outcome};
pub use page::{PageCursor, PageEntry, PageView, SelectMenu};
pub use ports::{Fetcher, Renderer};
pub use session::{parse_feed_url, Article, Reply, Session};
pub use token::{EntryKind, Selection};
