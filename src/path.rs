//! The walk: follow first links from a start page until the target, a
//! repeat, or a page without links.

use std::collections::HashSet;

use serde::Serialize;

use crate::page::PageId;
use crate::provider::DocumentProvider;
use crate::scan::first_qualifying_link;

/// Pages entered during one walk, in visiting order.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    order: Vec<PageId>,
    seen: HashSet<PageId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page: &PageId) -> bool {
        self.seen.contains(page)
    }

    /// Record a visit. Returns false if the page was already present.
    pub fn insert(&mut self, page: PageId) -> bool {
        if !self.seen.insert(page.clone()) {
            return false;
        }
        self.order.push(page);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[PageId] {
        &self.order
    }

    pub fn into_path(self) -> Vec<PageId> {
        self.order
    }
}

/// How a walk ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WalkResult {
    /// The target was reached; `path` ends with it.
    Success { path: Vec<PageId> },
    /// The next page had already been visited.
    LoopDetected { path: Vec<PageId>, repeated: PageId },
    /// The last page of `path` has no qualifying link, or could not be
    /// fetched.
    DeadEnd { path: Vec<PageId> },
}

impl WalkResult {
    /// Every page the walk entered, in order.
    pub fn path(&self) -> &[PageId] {
        match self {
            WalkResult::Success { path }
            | WalkResult::LoopDetected { path, .. }
            | WalkResult::DeadEnd { path } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WalkResult::Success { .. })
    }

    /// Page the walk stopped on.
    pub fn last(&self) -> Option<&PageId> {
        match self {
            WalkResult::LoopDetected { repeated, .. } => Some(repeated),
            _ => self.path().last(),
        }
    }
}

/// Drives walks against one document provider.
///
/// Each call to [`walk`](Self::walk) starts from an empty [`VisitedSet`];
/// nothing carries over between walks.
#[derive(Debug)]
pub struct PathWalker<P> {
    provider: P,
}

impl<P: DocumentProvider> PathWalker<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    pub fn walk(&mut self, start: &PageId, target: &PageId) -> WalkResult {
        self.walk_with(start, target, |_| {})
    }

    /// Like [`walk`](Self::walk), calling `on_visit` for each page as the
    /// walk arrives at it, including the target or the repeated page.
    pub fn walk_with<F>(&mut self, start: &PageId, target: &PageId, mut on_visit: F) -> WalkResult
    where
        F: FnMut(&PageId),
    {
        let mut visited = VisitedSet::new();
        let mut current = Some(start.clone());

        let result = loop {
            let Some(page) = current.take() else {
                break WalkResult::DeadEnd {
                    path: visited.into_path(),
                };
            };
            on_visit(&page);

            if &page == target {
                let mut path = visited.into_path();
                path.push(page);
                break WalkResult::Success { path };
            }
            if visited.contains(&page) {
                break WalkResult::LoopDetected {
                    path: visited.into_path(),
                    repeated: page,
                };
            }

            log::info!("visiting {page}");
            current = first_qualifying_link(&mut self.provider, &page);
            visited.insert(page);
        };

        match &result {
            WalkResult::Success { path } => log::info!("reached {target} in {} pages", path.len()),
            WalkResult::LoopDetected { repeated, path } => {
                log::info!("loop at {repeated} after {} pages", path.len())
            }
            WalkResult::DeadEnd { path } => log::info!("dead end after {} pages", path.len()),
        }
        result
    }
}

/// Walk from `start` until `target`, a loop, or a dead end.
pub fn run_conjecture<P>(provider: P, start: &PageId, target: &PageId) -> WalkResult
where
    P: DocumentProvider,
{
    PathWalker::new(provider).walk(start, target)
}
