//! Document providers: where pages come from.
//!
//! The walk only needs [`DocumentProvider::fetch`]. Three sources are
//! provided:
//! - [`HttpProvider`] fetches live pages (feature `http`)
//! - [`DirectoryProvider`] reads saved `.html` files from disk
//! - [`StaticProvider`] serves HTML held in memory

mod dir;
mod html;
#[cfg(feature = "http")]
mod http;
mod memory;

pub use dir::DirectoryProvider;
pub use html::{DEFAULT_CONTENT_SELECTOR, HtmlOptions};
#[cfg(feature = "http")]
pub use http::HttpProvider;
pub use memory::StaticProvider;

use crate::error::PageUnavailable;
use crate::page::{Page, PageId};

/// Source of parsed pages.
///
/// Implementations must hand back link targets already resolved to
/// canonical absolute identifiers (see [`HtmlOptions::build_page`]) and
/// report any retrieval or decoding failure as [`PageUnavailable`].
pub trait DocumentProvider {
    fn fetch(&mut self, page: &PageId) -> Result<Page, PageUnavailable>;
}

impl<P: DocumentProvider + ?Sized> DocumentProvider for &mut P {
    fn fetch(&mut self, page: &PageId) -> Result<Page, PageUnavailable> {
        (**self).fetch(page)
    }
}

impl<P: DocumentProvider + ?Sized> DocumentProvider for Box<P> {
    fn fetch(&mut self, page: &PageId) -> Result<Page, PageUnavailable> {
        (**self).fetch(page)
    }
}
