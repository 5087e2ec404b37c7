//! Fetched pages and the read-only node views the link scan works on.
//!
//! A [`Page`] owns its parsed DOM. Everything else here borrows from it:
//! [`ContentBlock`] is one paragraph-level unit of the body, and
//! [`DocumentNode`] is either a text run or an element inside a block.

mod walker;

pub use walker::NodeWalk;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{Dom, NodeData, NodeId};
use crate::error::{Error, Result};

/// Canonical, absolute page identifier. Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier for a page named by a user, spelled the way links to it
    /// resolve.
    ///
    /// An absolute http(s) URL is normalized (percent-encoded, fragment
    /// dropped). Anything else is a page title under `base`, which should
    /// end in `/`; spaces become underscores.
    ///
    /// ```
    /// use firstlink::PageId;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://en.wikipedia.org/wiki/").unwrap();
    /// assert_eq!(
    ///     PageId::canonical("Gödel", &base).unwrap().as_str(),
    ///     "https://en.wikipedia.org/wiki/G%C3%B6del"
    /// );
    /// ```
    pub fn canonical(input: &str, base: &Url) -> Result<Self> {
        let input = input.trim();
        let mut url = match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => base
                .join(&format!("./{}", input.replace(' ', "_")))
                .map_err(|source| Error::InvalidUrl {
                    url: input.to_string(),
                    source,
                })?,
        };
        url.set_fragment(None);
        Ok(Self(url.into()))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A parsed page body.
#[derive(Debug)]
pub struct Page {
    id: PageId,
    dom: Dom,
    blocks: Vec<NodeId>,
    targets: HashMap<NodeId, PageId>,
}

impl Page {
    /// Assemble a page from a parsed DOM.
    ///
    /// `blocks` are the content-block roots in document order. `targets`
    /// maps anchor elements to their resolved absolute identifiers; anchors
    /// missing from it have no usable target.
    pub fn new(
        id: PageId,
        dom: Dom,
        blocks: Vec<NodeId>,
        targets: HashMap<NodeId, PageId>,
    ) -> Self {
        Self {
            id,
            dom,
            blocks,
            targets,
        }
    }

    /// Identifier this page was fetched under; the base URI of all its nodes.
    pub fn id(&self) -> &PageId {
        &self.id
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Content blocks in document order.
    pub fn blocks(&self) -> impl ExactSizeIterator<Item = ContentBlock<'_>> + '_ {
        self.blocks
            .iter()
            .map(move |&root| ContentBlock { page: self, root })
    }

    /// Number of anchors that resolved to a target.
    pub fn link_count(&self) -> usize {
        self.targets.len()
    }
}

/// One paragraph-level unit of a page body.
#[derive(Debug, Clone, Copy)]
pub struct ContentBlock<'a> {
    page: &'a Page,
    root: NodeId,
}

impl<'a> ContentBlock<'a> {
    pub fn page(&self) -> &'a Page {
        self.page
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Every text and element node of the block, root first, in document
    /// order. Each call starts a fresh traversal.
    pub fn nodes(&self) -> NodeWalk<'a> {
        NodeWalk::new(*self)
    }

    /// Concatenated text of the block.
    pub fn text(&self) -> String {
        self.nodes()
            .filter_map(|n| match n {
                DocumentNode::Text(t) => Some(t.text()),
                DocumentNode::Element(_) => None,
            })
            .collect()
    }

    fn node(&self, id: NodeId) -> Option<DocumentNode<'a>> {
        match &self.page.dom.get(id)?.data {
            NodeData::Text(_) => Some(DocumentNode::Text(TextNode { block: *self, id })),
            NodeData::Element { .. } => {
                Some(DocumentNode::Element(ElementNode { block: *self, id }))
            }
            _ => None,
        }
    }
}

/// A node inside a content block.
#[derive(Debug, Clone, Copy)]
pub enum DocumentNode<'a> {
    Text(TextNode<'a>),
    Element(ElementNode<'a>),
}

impl<'a> DocumentNode<'a> {
    pub fn as_text(&self) -> Option<&TextNode<'a>> {
        match self {
            DocumentNode::Text(t) => Some(t),
            DocumentNode::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode<'a>> {
        match self {
            DocumentNode::Element(e) => Some(e),
            DocumentNode::Text(_) => None,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            DocumentNode::Text(t) => t.id,
            DocumentNode::Element(e) => e.id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextNode<'a> {
    block: ContentBlock<'a>,
    id: NodeId,
}

impl<'a> TextNode<'a> {
    pub fn text(&self) -> &'a str {
        self.block.page.dom.text_content(self.id).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ElementNode<'a> {
    block: ContentBlock<'a>,
    id: NodeId,
}

impl<'a> ElementNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Lowercase local tag name.
    pub fn tag(&self) -> &'a str {
        self.block
            .page
            .dom
            .element_name(self.id)
            .map_or("", |n| n.as_ref())
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.block.page.dom.get_attr(self.id, name)
    }

    /// Resolved absolute target, for anchors that have one.
    pub fn target(&self) -> Option<&'a PageId> {
        self.block.page.targets.get(&self.id)
    }

    /// Identifier of the page this element was extracted from.
    pub fn base_uri(&self) -> &'a PageId {
        &self.block.page.id
    }

    /// Enclosing elements, nearest first, up to and including the block
    /// root. The root's own ancestors are outside the block and not visited.
    pub fn ancestors(&self) -> impl Iterator<Item = ElementNode<'a>> + use<'a> {
        let block = self.block;
        let mut done = self.id == block.root;
        block
            .page
            .dom
            .ancestors(self.id)
            .take_while(move |&id| {
                let keep = !done;
                done |= id == block.root;
                keep
            })
            .filter(move |&id| block.page.dom.is_element(id))
            .map(move |id| ElementNode { block, id })
    }

    pub fn children(&self) -> impl Iterator<Item = DocumentNode<'a>> + use<'a> {
        let block = self.block;
        block
            .page
            .dom
            .children(self.id)
            .filter_map(move |id| block.node(id))
    }
}
