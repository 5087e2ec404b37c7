//! Turning page HTML into a [`Page`]: block selection and link resolution.

use std::collections::HashMap;

use url::Url;

use crate::dom::{Dom, NodeData, NodeId, SelectorList, parse_html};
use crate::error::Result;
use crate::page::{Page, PageId};

/// Body paragraphs of a MediaWiki article.
pub const DEFAULT_CONTENT_SELECTOR: &str = "#mw-content-text p";

/// MediaWiki marks links to pages that do not exist with this class.
const RED_LINK_CLASS: &str = "new";

/// How a provider extracts content blocks and link targets from HTML.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    blocks: SelectorList,
    internal_only: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_SELECTOR).expect("built-in content selector is valid")
    }
}

impl HtmlOptions {
    /// Options selecting content blocks with a CSS selector list.
    pub fn new(content_selector: &str) -> Result<Self> {
        Ok(Self {
            blocks: SelectorList::parse(content_selector)?,
            internal_only: true,
        })
    }

    /// Keep or drop links that leave the page's site. Red links and
    /// non-http(s) links are dropped either way while this is set.
    pub fn internal_only(mut self, internal_only: bool) -> Self {
        self.internal_only = internal_only;
        self
    }

    pub fn content_selector(&self) -> &SelectorList {
        &self.blocks
    }

    /// Parse `html` fetched as `id` into a page.
    pub fn build_page(&self, id: &PageId, html: &str) -> Page {
        let dom = parse_html(html);
        let blocks = self.blocks.select(&dom);
        let base = Url::parse(id.as_str()).ok();
        if base.is_none() {
            log::debug!("{id}: not a URL, link targets are taken verbatim");
        }

        // Links back to this page resolve to the normalized URL, which may
        // be spelled differently from `id`.
        let own = base.as_ref().map(|base| {
            let mut own = base.clone();
            own.set_fragment(None);
            String::from(own)
        });

        let targets: HashMap<NodeId, PageId> = anchors(&dom)
            .filter_map(|a| {
                let target = self.resolve(&dom, a, base.as_ref())?;
                if own.as_deref() == Some(target.as_str()) {
                    return Some((a, id.clone()));
                }
                Some((a, target))
            })
            .collect();

        log::debug!(
            "{id}: {} content blocks, {} resolved links",
            blocks.len(),
            targets.len()
        );
        Page::new(id.clone(), dom, blocks, targets)
    }

    /// Absolute identifier an anchor points at, without its fragment.
    fn resolve(&self, dom: &Dom, anchor: NodeId, base: Option<&Url>) -> Option<PageId> {
        let href = dom.get_attr(anchor, "href")?.trim();
        if href.is_empty() {
            return None;
        }

        let Some(base) = base else {
            let page = href.split('#').next().unwrap_or_default();
            if page.is_empty() {
                return None;
            }
            if self.internal_only && !is_internal_verbatim(dom, anchor, page) {
                return None;
            }
            return Some(PageId::from(page));
        };

        let mut url = base.join(href).ok()?;
        url.set_fragment(None);

        if self.internal_only && !is_internal(dom, anchor, base, &url) {
            return None;
        }
        Some(PageId::from(String::from(url)))
    }
}

fn is_internal(dom: &Dom, anchor: NodeId, base: &Url, url: &Url) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    if url.host_str() != base.host_str() {
        return false;
    }
    !is_red_link(dom, anchor, url.query())
}

/// Internal-link test for hrefs taken verbatim from a page without a URL.
/// Anything carrying its own scheme or host leaves the site.
fn is_internal_verbatim(dom: &Dom, anchor: NodeId, href: &str) -> bool {
    if href.starts_with("//") || Url::parse(href).is_ok() {
        return false;
    }
    let query = href.split_once('?').map(|(_, q)| q);
    !is_red_link(dom, anchor, query)
}

fn is_red_link(dom: &Dom, anchor: NodeId, query: Option<&str>) -> bool {
    dom.element_classes(anchor)
        .iter()
        .any(|c| c == RED_LINK_CLASS)
        || query.is_some_and(|q| {
            url::form_urlencoded::parse(q.as_bytes()).any(|(k, v)| k == "redlink" && v == "1")
        })
}

/// Every `<a>` element of the document.
fn anchors(dom: &Dom) -> impl Iterator<Item = NodeId> + '_ {
    (0..dom.len() as u32).map(NodeId).filter(|&id| {
        matches!(
            dom.get(id).map(|n| &n.data),
            Some(NodeData::Element { name, .. }) if name.local.as_ref() == "a"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://en.wikipedia.org/wiki/Rust_(programming_language)";

    fn targets(options: &HtmlOptions, html: &str) -> Vec<Option<String>> {
        let page = options.build_page(&PageId::from(BASE), html);
        let block = page.blocks().next().expect("block");
        block
            .nodes()
            .filter_map(|n| n.as_element().copied())
            .filter(|e| e.tag() == "a")
            .map(|e| e.target().map(|t| t.to_string()))
            .collect()
    }

    #[test]
    fn test_default_selects_article_paragraphs() {
        let page = HtmlOptions::default().build_page(
            &PageId::from(BASE),
            r#"<div id="siteSub"><p>From Wikipedia</p></div>
               <div id="mw-content-text"><div class="mw-parser-output"><p>Body</p></div></div>"#,
        );
        assert_eq!(page.block_count(), 1);
        assert_eq!(page.blocks().next().unwrap().text(), "Body");
    }

    #[test]
    fn test_relative_links_resolve_without_fragment() {
        let options = HtmlOptions::new("p").unwrap();
        assert_eq!(
            targets(
                &options,
                "<p><a href='/wiki/Compiler#History'>c</a><a href='Memory_safety'>m</a></p>"
            ),
            [
                Some("https://en.wikipedia.org/wiki/Compiler".to_string()),
                Some("https://en.wikipedia.org/wiki/Memory_safety".to_string()),
            ]
        );
    }

    #[test]
    fn test_external_red_and_mailto_links_dropped() {
        let options = HtmlOptions::new("p").unwrap();
        let html = "<p>\
            <a href='https://www.rust-lang.org/'>site</a>\
            <a class='new' href='/w/index.php?title=Nope&action=edit&redlink=1'>red</a>\
            <a href='/w/index.php?title=Nope2&redlink=1'>red2</a>\
            <a href='mailto:someone@example.org'>mail</a>\
            </p>";
        assert_eq!(targets(&options, html), [None, None, None, None]);
    }

    #[test]
    fn test_external_links_kept_when_allowed() {
        let options = HtmlOptions::new("p").unwrap().internal_only(false);
        assert_eq!(
            targets(&options, "<p><a href='https://www.rust-lang.org/#x'>site</a></p>"),
            [Some("https://www.rust-lang.org/".to_string())]
        );
    }

    #[test]
    fn test_opaque_ids_use_href_verbatim() {
        let options = HtmlOptions::new("p").unwrap();
        let page = options.build_page(&PageId::from("A"), "<p><a href='B#x'>b</a><a href='#top'>t</a></p>");
        let resolved: Vec<_> = page
            .blocks()
            .next()
            .unwrap()
            .nodes()
            .filter_map(|n| n.as_element().copied())
            .filter(|e| e.tag() == "a")
            .map(|e| e.target().map(|t| t.to_string()))
            .collect();
        assert_eq!(resolved, [Some("B".to_string()), None]);
    }

    #[test]
    fn test_opaque_ids_still_drop_external_and_red_links() {
        let options = HtmlOptions::new("p").unwrap();
        let html = "<p>\
            <a href='https://www.oracle.com/java/'>site</a>\
            <a href='//example.org/x'>proto</a>\
            <a href='mailto:someone@example.org'>mail</a>\
            <a class='new' href='C'>red</a>\
            <a href='D?action=edit&amp;redlink=1'>red2</a>\
            <a href='B'>b</a>\
            </p>";
        let page = options.build_page(&PageId::from("A"), html);
        let resolved: Vec<_> = page
            .blocks()
            .next()
            .unwrap()
            .nodes()
            .filter_map(|n| n.as_element().copied())
            .filter(|e| e.tag() == "a")
            .map(|e| e.target().map(|t| t.to_string()))
            .collect();
        assert_eq!(resolved, [None, None, None, None, None, Some("B".to_string())]);
    }

    #[test]
    fn test_self_link_maps_to_unnormalized_page_id() {
        let id = PageId::from("https://en.wikipedia.org/wiki/Gödel#Life");
        let page = HtmlOptions::new("p")
            .unwrap()
            .build_page(&id, "<p><a href='/wiki/G%C3%B6del'>self</a><a href='/wiki/Logic'>l</a></p>");
        let targets: Vec<_> = page
            .blocks()
            .next()
            .unwrap()
            .nodes()
            .filter_map(|n| n.as_element().and_then(|e| e.target()).cloned())
            .collect();
        assert_eq!(
            targets,
            [id.clone(), PageId::from("https://en.wikipedia.org/wiki/Logic")]
        );
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(HtmlOptions::new("p[").is_err());
    }
}
