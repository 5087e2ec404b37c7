//! Finding the first qualifying link on a page.
//!
//! One pass over each content block feeds text nodes to a
//! [`ParenthesisTracker`] and tests element nodes with the link validator,
//! so a link is judged by the parentheses opened *before* it in reading
//! order. The tracker is reset at every block boundary.

mod parens;
mod validator;

pub use parens::ParenthesisTracker;
pub use validator::{LinkRejection, check, is_qualifying};

use crate::page::{DocumentNode, Page, PageId};
use crate::provider::DocumentProvider;

/// Fetch `page` and return its first qualifying link.
///
/// A page the provider cannot deliver has no links.
pub fn first_qualifying_link<P>(provider: &mut P, page: &PageId) -> Option<PageId>
where
    P: DocumentProvider + ?Sized,
{
    match provider.fetch(page) {
        Ok(fetched) => first_link_in_page(&fetched).cloned(),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

/// First qualifying link of an already fetched page, in document order.
pub fn first_link_in_page(page: &Page) -> Option<&PageId> {
    let mut tracker = ParenthesisTracker::new();
    for block in page.blocks() {
        tracker.reset();
        for node in block.nodes() {
            match node {
                DocumentNode::Text(text) => tracker.consume(text.text()),
                DocumentNode::Element(element) => match check(&node, tracker.depth()) {
                    Ok(target) => {
                        log::debug!("{}: first link {target}", page.id());
                        return Some(target);
                    }
                    Err(LinkRejection::NotAnchor) => {}
                    Err(reason) => {
                        log::trace!(
                            "{}: skipping link {:?} ({reason})",
                            page.id(),
                            element.attr("href").unwrap_or_default()
                        );
                    }
                },
            }
        }
    }
    log::debug!("{}: no qualifying link in {} blocks", page.id(), page.block_count());
    None
}
