//! Page fetching boundary.
//!
//! The scrape driver only sees the [`PageSource`] trait, so the pagination
//! logic can run against canned pages in tests. The real implementation is
//! a blocking reqwest client.

use std::time::Duration;

use thiserror::Error;

use crate::config::Config;

/// How page content is obtained. `Cached` is accepted as configuration but
/// deliberately unimplemented; selecting it fails fast instead of silently
/// falling back to live fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    #[default]
    Live,
    Cached,
}

/// A fetch failure. Both variants are transient from the driver's point of
/// view and count against its retry budget.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),
}

/// Anything that can produce the body of a listing page.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    mode: FetchMode,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpFetcher {
            client,
            mode: config.fetch_mode,
        })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self.mode {
            FetchMode::Cached => unimplemented!("cached fetch mode is not implemented"),
            FetchMode::Live => {
                let response = self.client.get(url).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }
                Ok(response.text()?)
            }
        }
    }
}
