use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use super::{DocumentProvider, HtmlOptions};
use crate::error::{PageUnavailable, UnavailableReason};
use crate::page::{Page, PageId};
use crate::util::decode_html;

/// Reads saved pages from a directory.
///
/// A page is stored as `<title>.html`, where the title is the last path
/// segment of its identifier, percent-decoded: the page
/// `https://en.wikipedia.org/wiki/G%C3%B6del` lives in `Gödel.html`.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
    options: HtmlOptions,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>, options: HtmlOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a page would be read from, if its identifier names one.
    pub fn path_for(&self, page: &PageId) -> Option<PathBuf> {
        let id = page.as_str();
        let id = id.split(['#', '?']).next().unwrap_or_default();
        let segment = id.trim_end_matches('/').rsplit('/').next()?;
        let title = percent_decode_str(segment).decode_utf8().ok()?;

        if title.is_empty() || title == "." || title == ".." || title.contains(['/', '\\']) {
            return None;
        }
        Some(self.root.join(format!("{title}.html")))
    }
}

impl DocumentProvider for DirectoryProvider {
    fn fetch(&mut self, page: &PageId) -> Result<Page, PageUnavailable> {
        let path = self
            .path_for(page)
            .ok_or_else(|| PageUnavailable::new(page, UnavailableReason::NotFound))?;
        log::debug!("reading {} from {}", page, path.display());

        let bytes = fs::read(&path).map_err(|e| {
            let reason = match e.kind() {
                io::ErrorKind::NotFound => UnavailableReason::NotFound,
                _ => UnavailableReason::Io(e),
            };
            PageUnavailable::new(page, reason)
        })?;
        Ok(self.options.build_page(page, &decode_html(&bytes)))
    }
}
