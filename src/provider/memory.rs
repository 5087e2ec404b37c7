use std::collections::HashMap;

use super::{DocumentProvider, HtmlOptions};
use crate::error::{PageUnavailable, UnavailableReason};
use crate::page::{Page, PageId};

/// Serves pages from HTML strings held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    options: HtmlOptions,
    pages: HashMap<PageId, String>,
    fetches: usize,
}

impl StaticProvider {
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            pages: HashMap::new(),
            fetches: 0,
        }
    }

    pub fn with_page(mut self, id: impl Into<PageId>, html: impl Into<String>) -> Self {
        self.insert(id, html);
        self
    }

    pub fn insert(&mut self, id: impl Into<PageId>, html: impl Into<String>) {
        self.pages.insert(id.into(), html.into());
    }

    /// Number of successful and failed fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

impl DocumentProvider for StaticProvider {
    fn fetch(&mut self, page: &PageId) -> Result<Page, PageUnavailable> {
        self.fetches += 1;
        let html = self
            .pages
            .get(page)
            .ok_or_else(|| PageUnavailable::new(page, UnavailableReason::NotFound))?;
        Ok(self.options.build_page(page, html))
    }
}
