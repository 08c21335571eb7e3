// ABOUTME: Collaborator ports used by browsing sessions.
// ABOUTME: Fetcher turns a feed URL into bytes; Renderer turns an item description into display text.

use url::Url;

use crate::error::FetchError;

/// Port for acquiring raw feed bytes.
///
/// Implementations may block. Closures with the matching signature implement it.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&Url) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Port for converting an item description into the transport's display format.
pub trait Renderer {
    fn render(&self, description: &str) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, description: &str) -> String {
        self(description)
    }
}
