use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use super::{DocumentProvider, HtmlOptions};
use crate::error::{PageUnavailable, Result, UnavailableReason};
use crate::page::{Page, PageId};
use crate::util::decode_html;

pub const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (first-link walker)"
);

/// Fetches pages over HTTP(S), one at a time.
///
/// Requests are spaced at least `interval` apart. Page bodies are kept in
/// memory for the life of the provider. A single walk never fetches a page
/// twice, so the cache only pays off when one provider (or one
/// [`PathWalker`](crate::PathWalker)) serves several walks that overlap.
pub struct HttpProvider {
    client: Client,
    options: HtmlOptions,
    interval: Duration,
    last_request: Option<Instant>,
    cache: HashMap<PageId, String>,
}

impl HttpProvider {
    pub fn new(options: HtmlOptions) -> Result<Self> {
        Self::builder().build(options)
    }

    pub fn builder() -> HttpProviderBuilder {
        HttpProviderBuilder::default()
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    fn download(&mut self, page: &PageId) -> std::result::Result<String, UnavailableReason> {
        if !page.as_str().starts_with("http://") && !page.as_str().starts_with("https://") {
            return Err(UnavailableReason::UnsupportedScheme);
        }

        self.throttle();
        log::debug!("GET {page}");
        let response = self
            .client
            .get(page.as_str())
            .send()
            .map_err(|e| UnavailableReason::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(UnavailableReason::NotFound);
        }
        if !status.is_success() {
            return Err(UnavailableReason::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| UnavailableReason::Transport(e.to_string()))?;
        Ok(decode_html(&bytes).into_owned())
    }
}

impl DocumentProvider for HttpProvider {
    fn fetch(&mut self, page: &PageId) -> std::result::Result<Page, PageUnavailable> {
        if let Some(html) = self.cache.get(page) {
            log::debug!("cache hit: {page}");
            return Ok(self.options.build_page(page, html));
        }

        let html = self
            .download(page)
            .map_err(|reason| PageUnavailable::new(page, reason))?;
        let built = self.options.build_page(page, &html);
        self.cache.insert(page.clone(), html);
        Ok(built)
    }
}

/// Configures an [`HttpProvider`].
#[derive(Debug, Clone)]
pub struct HttpProviderBuilder {
    user_agent: String,
    interval: Duration,
    timeout: Duration,
}

impl Default for HttpProviderBuilder {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpProviderBuilder {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Minimum spacing between two requests.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self, options: HtmlOptions) -> Result<HttpProvider> {
        let client = Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()?;
        Ok(HttpProvider {
            client,
            options,
            interval: self.interval,
            last_request: None,
            cache: HashMap::new(),
        })
    }
}
