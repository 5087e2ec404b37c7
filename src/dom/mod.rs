//! HTML parsing into an arena DOM, plus CSS selector matching over it.

mod arena;
mod selector;
mod tree_sink;

pub use arena::{Ancestors, Attribute, Children, Dom, Node, NodeData, NodeId};
pub use selector::{ElementRef, SelectorList};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse a full HTML document. Parsing never fails; malformed markup is
/// repaired the way browsers repair it.
pub fn parse_html(html: &str) -> Dom {
    parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
