//! Error types for firstlink operations.

use thiserror::Error;

use crate::page::PageId;

/// Errors raised while setting up a walk: configuration, selectors,
/// providers. A walk itself never fails; see [`crate::WalkResult`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid content selector: {0}")]
    InvalidSelector(String),

    #[error("invalid page URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },

    #[cfg(feature = "http")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A page could not be retrieved or parsed.
///
/// Providers return this; the link scan absorbs it and reports "no link".
#[derive(Error, Debug)]
#[error("page unavailable: {page}: {reason}")]
pub struct PageUnavailable {
    pub page: PageId,
    pub reason: UnavailableReason,
}

impl PageUnavailable {
    pub fn new(page: &PageId, reason: UnavailableReason) -> Self {
        Self {
            page: page.clone(),
            reason,
        }
    }
}

#[derive(Error, Debug)]
pub enum UnavailableReason {
    #[error("not found")]
    NotFound,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an http(s) URL")]
    UnsupportedScheme,
}
