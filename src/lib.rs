//! # firstlink
//!
//! Tests the "Getting to Philosophy" conjecture: from any article, keep
//! clicking the first link of the body text that is neither parenthesized
//! nor italicized, and you end up at a fixed target page, unless the walk
//! loops or runs into a page with no links.
//!
//! ## Quick Start
//!
//! ```
//! use firstlink::{HtmlOptions, PageId, StaticProvider, WalkResult, run_conjecture};
//!
//! let provider = StaticProvider::new(HtmlOptions::new("p").unwrap())
//!     .with_page(
//!         "https://en.wikipedia.org/wiki/Rust",
//!         "<p>Rust (<a href='/wiki/Fungus'>fungus</a>) is a \
//!          <a href='/wiki/Philosophy'>philosophy</a>.</p>",
//!     );
//!
//! let result = run_conjecture(
//!     provider,
//!     &PageId::from("https://en.wikipedia.org/wiki/Rust"),
//!     &PageId::from("https://en.wikipedia.org/wiki/Philosophy"),
//! );
//! assert!(result.is_success());
//! assert_eq!(result.path().len(), 2);
//! ```
//!
//! ## Pieces
//!
//! - [`provider`]: where pages come from (HTTP, a directory, memory)
//! - [`page`]: parsed pages, content blocks and the lazy node walk
//! - [`scan`]: parenthesis tracking, link qualification, first link of a page
//! - [`path`]: the walk itself and its outcome

pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod path;
pub mod provider;
pub mod scan;
pub(crate) mod util;

pub use config::Config;
pub use error::{Error, PageUnavailable, Result, UnavailableReason};
pub use page::{ContentBlock, DocumentNode, ElementNode, Page, PageId, TextNode};
pub use path::{PathWalker, VisitedSet, WalkResult, run_conjecture};
#[cfg(feature = "http")]
pub use provider::HttpProvider;
pub use provider::{DirectoryProvider, DocumentProvider, HtmlOptions, StaticProvider};
pub use scan::{ParenthesisTracker, first_link_in_page, first_qualifying_link, is_qualifying};
