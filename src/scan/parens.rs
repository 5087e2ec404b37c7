//! Open-parenthesis depth over a stream of text nodes.

use memchr::memchr2_iter;

/// Counts unclosed `(` seen so far.
///
/// Text is split into `(`, `)`, whitespace and opaque runs; only the two
/// parenthesis tokens matter. A `)` at depth zero is dropped, so the depth
/// never goes negative and unbalanced text degrades to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParenthesisTracker {
    depth: usize,
}

impl ParenthesisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consume(&mut self, text: &str) {
        for pos in memchr2_iter(b'(', b')', text.as_bytes()) {
            if text.as_bytes()[pos] == b'(' {
                self.depth += 1;
            } else {
                self.depth = self.depth.saturating_sub(1);
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }
}
