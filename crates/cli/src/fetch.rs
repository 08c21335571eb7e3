// ABOUTME: Blocking HTTP fetch collaborator plus file/stdin target loading.
// ABOUTME: Targets are an http(s) URL, a local file path, or "-" for stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use rsspager_menu::{parse_feed_url, FetchError, Fetcher};
use url::Url;

use crate::config::FetchConfig;

/// Fetches feeds over HTTP with the configured timeout and user agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| FetchError::transport(url.as_str(), e))?;
        let bytes = response
            .bytes()
            .map_err(|e| FetchError::transport(url.as_str(), e))?;
        tracing::debug!(%url, bytes = bytes.len(), "fetched feed");
        Ok(bytes.to_vec())
    }
}

/// Where a command-line target's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<'a> {
    Stdin,
    Url(Url),
    File(&'a Path),
}

impl<'a> Target<'a> {
    pub fn classify(target: &'a str) -> Result<Self> {
        if target == "-" {
            return Ok(Target::Stdin);
        }
        if target.starts_with("http://") || target.starts_with("https://") {
            return Ok(Target::Url(parse_feed_url(target)?));
        }
        Ok(Target::File(Path::new(target)))
    }

    /// URL usable as the document's origin for self-link synthesis.
    pub fn origin(&self) -> Option<&str> {
        match self {
            Target::Url(url) => Some(url.as_str()),
            Target::Stdin | Target::File(_) => None,
        }
    }

    pub fn load(&self, fetcher: &impl Fetcher) -> Result<Vec<u8>> {
        match self {
            Target::Stdin => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf)?;
                Ok(buf)
            }
            Target::Url(url) => Ok(fetcher.fetch(url)?),
            Target::File(path) => {
                if !path.exists() {
                    return Err(anyhow!("file not found: {}", path.display()));
                }
                Ok(fs::read(path)?)
            }
        }
    }
}
