//! # Scanner Events
//!
//! The scanner does not build anything. It reports what it recognises as a
//! flat, ordered stream of events, and the tree builder in
//! [`parser`](crate::parser) turns that stream into [`Entity`](crate::Entity)
//! nodes.
//!
//! A construct is bracketed by an `Open` and a `Close`:
//!
//! ```text
//! "'''Bold''' x"
//!
//! Open  { TextBold, raw_start: 0, text_start: 3 }
//! Close { TextBold, text_end: 7, raw_end: 10 }
//! Boundary(0..10)
//! Open  { Text, raw_start: 10, text_start: 10 }
//! Close { Text, text_end: 12, raw_end: 12 }
//! Boundary(10..12)
//! ```
//!
//! All offsets are absolute byte offsets into the scanned buffer.
//!
//! ## Splits
//!
//! A run of five apostrophes opens a construct whose nesting order is not
//! known yet. When the first closing run resolves it, the scanner emits a
//! `Split`: the open construct becomes the inner one, starting at `at`, and a
//! new outer construct is inserted beneath it. The outer construct's text
//! starts at `at` too, so no bytes are lost between the two.

use crate::entity_kind::EntityKind;
use crate::span::Span;

/// An event emitted by the [`Scanner`](super::Scanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A construct was opened.
    ///
    /// `raw_start` is where its delimiters begin, `text_start` where its
    /// content begins.
    Open {
        kind: EntityKind,
        raw_start: usize,
        text_start: usize,
    },

    /// The innermost open construct was closed.
    ///
    /// `kind` can differ from the kind it was opened with: a tag only turns
    /// out to be self-closing at its final `/>`.
    Close {
        kind: EntityKind,
        text_end: usize,
        raw_end: usize,
    },

    /// The innermost open construct was resolved into two nested ones.
    Split {
        outer: EntityKind,
        inner: EntityKind,
        at: usize,
    },

    /// A top-level span is complete. Spans arrive in order and never overlap.
    Boundary(Span),
}

impl Event {
    /// Create an open event whose content starts right after `delimiter` bytes.
    pub fn open(kind: EntityKind, raw_start: usize, delimiter: usize) -> Self {
        Event::Open {
            kind,
            raw_start,
            text_start: raw_start + delimiter,
        }
    }

    /// Create a close event with no closing delimiter.
    pub fn close_at(kind: EntityKind, end: usize) -> Self {
        Event::Close {
            kind,
            text_end: end,
            raw_end: end,
        }
    }
}
