//! `firstlink.toml` configuration.
//!
//! Every field is optional; command-line flags override whatever the file
//! sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::page::PageId;
use crate::provider::{DEFAULT_CONTENT_SELECTOR, HtmlOptions};

pub const CONFIG_FILE_NAME: &str = "firstlink.toml";

pub const DEFAULT_START: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";
pub const DEFAULT_TARGET: &str = "https://en.wikipedia.org/wiki/Philosophy";
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page the walk starts from when none is given.
    pub start: String,
    /// Page that ends the walk successfully.
    pub target: String,
    /// Bare titles given as `start` or `target` live under this URL.
    pub base_url: String,
    /// CSS selector for the content blocks of a page.
    pub content_selector: String,
    /// Ignore links to other sites and to missing pages.
    pub internal_only: bool,
    /// Minimum time between HTTP requests.
    pub request_interval_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
    /// Read pages from this directory instead of the network.
    pub pages_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            target: DEFAULT_TARGET.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            internal_only: true,
            request_interval_ms: 1000,
            timeout_secs: 30,
            user_agent: None,
            pages_dir: None,
        }
    }
}

impl Config {
    pub fn html_options(&self) -> Result<HtmlOptions> {
        Ok(HtmlOptions::new(&self.content_selector)?.internal_only(self.internal_only))
    }

    /// `start` as a page identifier; see [`PageId::canonical`].
    pub fn start_page(&self) -> Result<PageId> {
        PageId::canonical(&self.start, &self.base()?)
    }

    pub fn target_page(&self) -> Result<PageId> {
        PageId::canonical(&self.target, &self.base()?)
    }

    fn base(&self) -> Result<Url> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).map_err(|source| Error::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })
    }
}

fn parse_config_str(s: &str, path: &Path) -> Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| Error::Config {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}

fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path)?;
    let mut config = parse_config_str(&s, path)?;
    // Relative page directories are relative to the config file.
    if let Some(dir) = &config.pages_dir
        && dir.is_relative()
        && let Some(parent) = path.parent()
    {
        config.pages_dir = Some(parent.join(dir));
    }
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise the nearest
/// `firstlink.toml` in `start_dir` or its ancestors is used, and defaults
/// if there is none.
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let config = read_config(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    if let Some(path) = find_in_tree(start_dir) {
        let config = read_config(&path)?;
        log::debug!("using config {}", path.display());
        return Ok((config, Some(path)));
    }

    log::debug!("no config file found, using defaults");
    Ok((Config::default(), None))
}
