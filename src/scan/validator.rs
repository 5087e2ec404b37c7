//! Decides whether a single node is a link the walk may follow.

use std::fmt;

use crate::page::{DocumentNode, ElementNode, PageId};

/// Tags whose content is rendered in italics.
const ITALIC_TAGS: &[&str] = &["i", "em"];

/// Why a node was not a qualifying link. Variants are listed in the order
/// the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRejection {
    NotAnchor,
    Italic,
    Parenthesized,
    /// The anchor has no resolvable target (external, red, or no `href`).
    NoTarget,
    SelfLink,
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkRejection::NotAnchor => "not an anchor",
            LinkRejection::Italic => "inside italics",
            LinkRejection::Parenthesized => "inside parentheses",
            LinkRejection::NoTarget => "no target",
            LinkRejection::SelfLink => "links to its own page",
        })
    }
}

/// Run every check in order and return the target of a qualifying link.
pub fn check<'a>(node: &DocumentNode<'a>, paren_depth: usize) -> Result<&'a PageId, LinkRejection> {
    let element = match node {
        DocumentNode::Element(e) if e.tag() == "a" => e,
        _ => return Err(LinkRejection::NotAnchor),
    };
    if in_italics(element) {
        return Err(LinkRejection::Italic);
    }
    if paren_depth > 0 {
        return Err(LinkRejection::Parenthesized);
    }
    let target = element.target().ok_or(LinkRejection::NoTarget)?;
    if target == element.base_uri() {
        return Err(LinkRejection::SelfLink);
    }
    Ok(target)
}

pub fn is_qualifying(node: &DocumentNode<'_>, paren_depth: usize) -> bool {
    check(node, paren_depth).is_ok()
}

fn in_italics(element: &ElementNode<'_>) -> bool {
    element
        .ancestors()
        .any(|ancestor| ITALIC_TAGS.contains(&ancestor.tag()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Page, PageId};
    use crate::provider::HtmlOptions;
    use proptest::prelude::*;

    const BASE: &str = "https://en.wikipedia.org/wiki/Start";

    fn page(html: &str) -> Page {
        HtmlOptions::new("p")
            .unwrap()
            .build_page(&PageId::from(BASE), html)
    }

    /// Outcome of `check` for every anchor of the first block, at depth 0.
    fn anchors(page: &Page) -> Vec<Result<String, LinkRejection>> {
        let block = page.blocks().next().unwrap();
        block
            .nodes()
            .filter(|n| n.as_element().is_some_and(|e| e.tag() == "a"))
            .map(|n| check(&n, 0).map(|t| t.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_link_qualifies() {
        let page = page("<p><a href='/wiki/Logic'>logic</a></p>");
        assert_eq!(
            anchors(&page),
            [Ok("https://en.wikipedia.org/wiki/Logic".to_string())]
        );
    }

    #[test]
    fn test_text_and_other_elements_are_not_anchors() {
        let page = page("<p>text <b>bold</b></p>");
        let block = page.blocks().next().unwrap();
        for node in block.nodes() {
            assert_eq!(check(&node, 0), Err(LinkRejection::NotAnchor));
        }
    }

    #[test]
    fn test_italic_ancestors_reject() {
        let page = page(
            "<p><i><a href='/wiki/A'>a</a></i><em><span><a href='/wiki/B'>b</a></span></em></p>",
        );
        assert_eq!(
            anchors(&page),
            [Err(LinkRejection::Italic), Err(LinkRejection::Italic)]
        );
    }

    #[test]
    fn test_italics_checked_before_parentheses() {
        let page = page("<p><i><a href='/wiki/A'>a</a></i></p>");
        let block = page.blocks().next().unwrap();
        let anchor = block
            .nodes()
            .find(|n| n.as_element().is_some_and(|e| e.tag() == "a"))
            .unwrap();
        assert_eq!(check(&anchor, 3), Err(LinkRejection::Italic));
    }

    #[test]
    fn test_open_parenthesis_rejects() {
        let page = page("<p><a href='/wiki/A'>a</a></p>");
        let block = page.blocks().next().unwrap();
        let anchor = block
            .nodes()
            .find(|n| n.as_element().is_some_and(|e| e.tag() == "a"))
            .unwrap();
        assert_eq!(check(&anchor, 1), Err(LinkRejection::Parenthesized));
        assert!(is_qualifying(&anchor, 0));
    }

    #[test]
    fn test_self_link_rejects() {
        let page = page("<p><a href='/wiki/Start#History'>here</a><a href='/wiki/Start'>again</a></p>");
        assert_eq!(
            anchors(&page),
            [Err(LinkRejection::SelfLink), Err(LinkRejection::SelfLink)]
        );
    }

    #[test]
    fn test_missing_href_has_no_target() {
        let page = page("<p><a name='anchor'>x</a></p>");
        assert_eq!(anchors(&page), [Err(LinkRejection::NoTarget)]);
    }

    proptest! {
        #[test]
        fn prop_italic_links_never_qualify(
            wrapper in prop_oneof![Just("i"), Just("em")],
            inner in prop_oneof![Just(""), Just("b"), Just("span"), Just("small")],
            slug in "[A-Z][a-z]{1,10}",
            depth in 0usize..3,
        ) {
            let link = format!("<a href='/wiki/{slug}'>{slug}</a>");
            let link = if inner.is_empty() { link } else { format!("<{inner}>{link}</{inner}>") };
            let page = page(&format!("<p>lead <{wrapper}>{link}</{wrapper}></p>"));
            let block = page.blocks().next().unwrap();
            for node in block.nodes() {
                prop_assert!(!is_qualifying(&node, depth));
            }
        }

        #[test]
        fn prop_parenthesized_links_never_qualify(slug in "[A-Z][a-z]{1,10}", depth in 1usize..8) {
            let page = page(&format!("<p><a href='/wiki/{slug}'>{slug}</a></p>"));
            let block = page.blocks().next().unwrap();
            for node in block.nodes() {
                prop_assert!(!is_qualifying(&node, depth));
            }
        }
    }
}
