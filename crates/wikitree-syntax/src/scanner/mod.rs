//! # Scanner - Byte-Level Wikitext State Machine
//!
//! The scanner walks the source one byte at a time and cuts it into
//! **top-level spans**: a run of plain text, a bold run, a template, one list
//! line, a heading line. Inside a span it reports every construct it opens
//! and closes as an [`Event`], so the tree builder can follow along without
//! scanning anything itself.
//!
//! ## Two Stacks
//!
//! The automaton keeps two parallel stacks:
//!
//! - the **construct stack** holds what is currently open (`TextItalic`,
//!   `Template`, `ListNumbered`, ...) together with where its delimiters and
//!   its content started,
//! - the **continuation stack** holds which [`Step`] takes over again once
//!   the construct above it closes.
//!
//! Every byte goes to the current step, which answers with a [`Signal`]:
//!
//! ```text
//! Continue    the byte was consumed, read the next one
//! Again(p)    resume at absolute position p, usually the byte just read
//! End(p)      the top-level span ends at p; p is not consumed
//! ```
//!
//! ## Rewind
//!
//! Delimiters are counted before anything is decided: a run of apostrophes
//! is only classified once the first non-apostrophe byte shows up. When a run
//! is only partly consumed (five quotes closing a two-quote italic), the rest
//! of the run is handed back with `Again(p)`. Rewinds never go further back
//! than the current delimiter run, so every byte is read a bounded number of
//! times and the scan stays linear.
//!
//! ## Spans
//!
//! Each call to [`Scanner::next_span`] resets both stacks and scans from the
//! end of the previous span. Nothing survives between spans except the
//! cursor: a construct that starts after top-level text ends the text span
//! first and is scanned again from its own first byte.
//!
//! ```text
//! "in ''a'''''A''' out"
//!
//! Text "in "  |  TextItalic "''a''"  |  TextBold "'''A'''"  |  Text " out"
//! ```
//!
//! ## Byte Safety
//!
//! Every delimiter the scanner reacts to is ASCII. UTF-8 continuation and
//! lead bytes are all `>= 0x80`, so multi-byte characters always pass through
//! as plain content.
//!
//! ## Module Structure
//!
//! - [`event`] - The Event enum
//! - `block` - Line-leading constructs: lists, indents, headings, rules
//! - `inline` - Text, emphasis, templates, links, tags, signatures

mod block;
pub mod event;
mod inline;

use std::collections::VecDeque;

use crate::entity_kind::EntityKind;
use crate::error::SyntaxError;
use crate::span::Span;

pub use event::Event;

/// The scanning states. Each one handles a single byte at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// First byte of a span
    Begin,
    /// Top-level text, or nothing open yet
    Text,
    /// Just past a newline, looking for a line-leading marker
    Newline,
    /// Inside a run of `*`, `#`, `:` markers
    ListMarker,
    /// Content of a list or indent line
    ListItem,
    /// Counting a line-leading `-` run
    Dash,
    /// Counting a line-leading `=` run
    HeadingOpen,
    /// Content of a heading line
    Heading,
    /// Counting a `=` run inside a heading
    HeadingClose,
    /// Counting an apostrophe run
    Quotes,
    /// Content of a bold/italic run
    Emphasis,
    /// Counting `{`
    BraceOpen,
    /// Counting `}`
    BraceClose,
    /// Content of a template
    Template,
    /// Counting `[`
    BracketOpen,
    /// Counting `]`
    BracketClose,
    /// Content of an internal link
    InternalLink,
    /// Content of an external link
    ExternalLink,
    /// Just past `<`
    Lt,
    /// Just past `</`
    LtSlash,
    /// Inside a tag, up to `>`
    TagBody,
    /// Just past `/` inside a tag
    TagSlash,
    /// Counting `~`
    Tilde,
}

/// What a step asks the driving loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Continue,
    Again(usize),
    End(usize),
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: EntityKind,
    raw_start: usize,
    text_start: usize,
}

/// A resumable scanner over one wikitext buffer.
///
/// Iterating yields the events of every span in document order:
///
/// ```
/// use wikitree_syntax::scanner::{Event, Scanner};
/// use wikitree_syntax::{EntityKind, Span};
///
/// let events: Vec<Event> = Scanner::new(b"''hi''")
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(
///     events,
///     vec![
///         Event::open(EntityKind::TextItalic, 0, 2),
///         Event::Close { kind: EntityKind::TextItalic, text_end: 4, raw_end: 6 },
///         Event::Boundary(Span::new(0, 6)),
///     ]
/// );
/// ```
pub struct Scanner<'a> {
    src: &'a [u8],
    cursor: usize,
    span_start: usize,
    frames: Vec<Frame>,
    continuations: Vec<Step>,
    /// Frame indices of the open templates, innermost last.
    templates: Vec<usize>,
    /// Frame indices of the open links, innermost last.
    links: Vec<usize>,
    step: Step,
    run_start: usize,
    nl_at: Option<usize>,
    events: VecDeque<Event>,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            cursor: 0,
            span_start: 0,
            frames: Vec::new(),
            continuations: Vec::new(),
            templates: Vec::new(),
            links: Vec::new(),
            step: Step::Begin,
            run_start: 0,
            nl_at: None,
            events: VecDeque::new(),
            failed: false,
        }
    }

    /// Scan the next top-level span.
    ///
    /// Returns `Ok(None)` once the buffer is exhausted. The events of the
    /// span are queued for the iterator; events of an earlier span that
    /// were never drained are discarded.
    pub fn next_span(&mut self) -> Result<Option<Span>, SyntaxError> {
        let start = self.cursor;
        if start >= self.src.len() {
            return Ok(None);
        }
        self.reset(start);

        let mut i = start;
        let end = loop {
            let byte = self.src.get(i).copied();
            match self.feed(i, byte) {
                Signal::Continue if byte.is_none() => break self.src.len(),
                Signal::Continue => i += 1,
                Signal::Again(at) => i = at,
                Signal::End(at) => break at,
            }
        };

        if end <= start {
            self.failed = true;
            return Err(SyntaxError::new(
                format!("no transition from {:?}", self.step),
                start,
            ));
        }

        if !self.frames.is_empty() {
            log::debug!(
                "auto-closing {} construct(s) at byte {end}",
                self.frames.len()
            );
        }
        while !self.frames.is_empty() {
            self.pop(None, end, end);
        }

        let span = Span::new(start, end);
        log::trace!("span {}..{}", span.start, span.end);
        self.events.push_back(Event::Boundary(span));
        self.cursor = end;
        Ok(Some(span))
    }

    /// Scan the whole buffer, keeping only the span boundaries.
    pub fn collect_spans(mut self) -> Result<Vec<Span>, SyntaxError> {
        let mut spans = Vec::new();
        while let Some(span) = self.next_span()? {
            spans.push(span);
        }
        Ok(spans)
    }

    fn reset(&mut self, start: usize) {
        self.span_start = start;
        self.frames.clear();
        self.continuations.clear();
        self.templates.clear();
        self.links.clear();
        self.events.clear();
        self.step = Step::Begin;
        self.run_start = start;
        self.nl_at = None;
    }

    fn feed(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match self.step {
            Step::Begin => self.begin(i, byte),
            Step::Text => self.text(i, byte),
            Step::Newline => self.newline(i, byte),
            Step::ListMarker => self.list_marker(i, byte),
            Step::ListItem => self.list_item(i, byte),
            Step::Dash => self.dash(i, byte),
            Step::HeadingOpen => self.heading_open(i, byte),
            Step::Heading => self.heading(i, byte),
            Step::HeadingClose => self.heading_close(i, byte),
            Step::Quotes => self.quotes(i, byte),
            Step::Emphasis => self.emphasis(i, byte),
            Step::BraceOpen => self.brace_open(i, byte),
            Step::BraceClose => self.brace_close(i, byte),
            Step::Template => self.template(i, byte),
            Step::BracketOpen => self.bracket_open(i, byte),
            Step::BracketClose => self.bracket_close(i, byte),
            Step::InternalLink => self.internal_link(i, byte),
            Step::ExternalLink => self.external_link(i, byte),
            Step::Lt => self.lt(i, byte),
            Step::LtSlash => self.lt_slash(i, byte),
            Step::TagBody => self.tag_body(i, byte),
            Step::TagSlash => self.tag_slash(i, byte),
            Step::Tilde => self.tilde(i, byte),
        }
    }

    // === Stack helpers ===

    fn top(&self) -> Option<EntityKind> {
        self.frames.last().map(|f| f.kind)
    }

    /// Kind of the construct directly beneath the innermost one.
    fn below_top(&self) -> Option<EntityKind> {
        let len = self.frames.len();
        len.checked_sub(2)
            .and_then(|k| self.frames.get(k))
            .map(|f| f.kind)
    }

    /// Frame index of the innermost open template.
    fn innermost_template(&self) -> Option<usize> {
        self.templates.last().copied()
    }

    /// Frame index and kind of the innermost open link.
    fn innermost_link(&self) -> Option<(usize, EntityKind)> {
        let index = self.links.last().copied()?;
        self.frames.get(index).map(|f| (index, f.kind))
    }

    /// Index stack tracking open frames of `kind`, if it is tracked.
    fn tracked(&mut self, kind: EntityKind) -> Option<&mut Vec<usize>> {
        match kind {
            EntityKind::Template => Some(&mut self.templates),
            EntityKind::LinkInternal | EntityKind::LinkExternal => Some(&mut self.links),
            _ => None,
        }
    }

    /// The step that handles content of the innermost open construct.
    fn resume(&self) -> Step {
        self.continuations.last().copied().unwrap_or(Step::Text)
    }

    fn push(&mut self, kind: EntityKind, raw_start: usize, text_start: usize, body: Step) {
        let index = self.frames.len();
        if let Some(open) = self.tracked(kind) {
            open.push(index);
        }
        self.frames.push(Frame {
            kind,
            raw_start,
            text_start,
        });
        self.continuations.push(body);
        self.events.push_back(Event::Open {
            kind,
            raw_start,
            text_start,
        });
    }

    /// Close the innermost construct, optionally under a refined kind.
    fn pop(&mut self, kind: Option<EntityKind>, text_end: usize, raw_end: usize) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        self.continuations.pop();
        if let Some(open) = self.tracked(frame.kind) {
            open.pop();
        }
        let kind = kind.unwrap_or(frame.kind);
        if kind.is_tag() {
            self.tag_attributes(frame.text_start, text_end);
        }
        self.events.push_back(Event::Close {
            kind,
            text_end,
            raw_end,
        });
    }

    /// Close the innermost construct and resume its parent at `raw_end`.
    fn close(&mut self, text_end: usize, raw_end: usize) -> Signal {
        self.pop(None, text_end, raw_end);
        self.resume_at(raw_end)
    }

    /// Close everything above `index` at `inner_end`, then the construct at
    /// `index` itself.
    fn close_through(
        &mut self,
        index: usize,
        inner_end: usize,
        text_end: usize,
        raw_end: usize,
    ) -> Signal {
        while self.frames.len() > index + 1 {
            log::debug!(
                "force-closing {:?} at byte {inner_end}",
                self.top().unwrap_or(EntityKind::Text)
            );
            self.pop(None, inner_end, inner_end);
        }
        self.close(text_end, raw_end)
    }

    fn resume_at(&mut self, at: usize) -> Signal {
        if self.frames.is_empty() {
            Signal::End(at)
        } else {
            self.step = self.resume();
            Signal::Again(at)
        }
    }

    /// Replace the innermost construct by `outer` containing `inner`.
    ///
    /// Only emphasis is split, so the template and link indices beneath it
    /// stay valid.
    fn split(&mut self, outer: EntityKind, inner: EntityKind, at: usize) {
        let Some(top) = self.frames.last_mut() else {
            return;
        };
        let outer_frame = Frame {
            kind: outer,
            raw_start: top.raw_start,
            text_start: at,
        };
        top.kind = inner;
        top.raw_start = at;

        let index = self.frames.len() - 1;
        self.frames.insert(index, outer_frame);
        self.continuations.insert(index, Step::Emphasis);
        self.events.push_back(Event::Split { outer, inner, at });
    }

    /// Open top-level text at the start of the span, unless something is
    /// already open.
    fn ensure_text(&mut self) {
        if self.frames.is_empty() {
            self.push(EntityKind::Text, self.span_start, self.span_start, Step::Text);
        }
    }

    /// The bytes of a delimiter run turned out to be content.
    fn literal(&mut self, at: usize) -> Signal {
        self.ensure_text();
        self.step = self.resume();
        Signal::Again(at)
    }

    fn enter_run(&mut self, i: usize, step: Step) -> Signal {
        self.run_start = i;
        self.step = step;
        Signal::Continue
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Event, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.events.pop_front() {
                return Some(Ok(event));
            }
            if self.failed {
                return None;
            }
            match self.next_span() {
                Ok(Some(_)) => {}
                Ok(None) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
