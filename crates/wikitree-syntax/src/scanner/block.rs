//! Line-leading constructs: list and indent items, headings, horizontal rules.
//!
//! These are only recognised at the start of a line, and only while nothing
//! but top-level text is open. A line construct that follows text ends the
//! text just before the newline; the newline and any leading whitespace then
//! start the line's own span without being part of its raw bytes.

use super::{Scanner, Signal, Step};
use crate::entity_kind::EntityKind;

impl Scanner<'_> {
    pub(super) fn begin(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'\n') => {
                self.nl_at = Some(i);
                self.step = Step::Newline;
                Signal::Continue
            }
            _ if self.at_line_start() => {
                self.step = Step::Newline;
                Signal::Again(i)
            }
            _ => {
                self.step = Step::Text;
                Signal::Again(i)
            }
        }
    }

    fn at_line_start(&self) -> bool {
        self.span_start == 0 || self.src.get(self.span_start - 1) == Some(&b'\n')
    }

    pub(super) fn newline(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b' ' | b'\t' | b'\r') => Signal::Continue,
            Some(marker @ (b'*' | b'#' | b':')) => self.list_open(i, marker),
            Some(b'-') => self.enter_run(i, Step::Dash),
            Some(b'=') => self.enter_run(i, Step::HeadingOpen),
            Some(b'\n') if self.frames.is_empty() => {
                self.ensure_text();
                self.close(i, i)
            }
            _ => {
                self.step = Step::Text;
                Signal::Again(i)
            }
        }
    }

    /// Start a line construct, or end the top-level text in front of it.
    fn begin_line(
        &mut self,
        kind: EntityKind,
        raw_start: usize,
        text_start: usize,
        body: Step,
    ) -> Option<Signal> {
        if self.top() == Some(EntityKind::Text) {
            let end = self.nl_at.unwrap_or(raw_start);
            self.pop(None, end, end);
            return Some(Signal::End(end));
        }
        self.push(kind, raw_start, text_start, body);
        None
    }

    // === Lists and indents ===

    fn list_open(&mut self, i: usize, marker: u8) -> Signal {
        let Some(kind) = EntityKind::from_list_marker(marker) else {
            return self.literal(i);
        };
        if let Some(signal) = self.begin_line(kind, i, i + 1, Step::ListItem) {
            return signal;
        }
        self.step = Step::ListMarker;
        Signal::Continue
    }

    /// Each further marker nests one more item inside the previous one.
    pub(super) fn list_marker(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte.and_then(EntityKind::from_list_marker) {
            Some(kind) => {
                self.push(kind, i, i + 1, Step::ListItem);
                Signal::Continue
            }
            None => {
                self.step = Step::ListItem;
                Signal::Again(i)
            }
        }
    }

    pub(super) fn list_item(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            None | Some(b'\n') => self.close(i, i),
            Some(c) => self.inline(i, c),
        }
    }

    // === Horizontal rules ===

    pub(super) fn dash(&mut self, i: usize, byte: Option<u8>) -> Signal {
        if byte == Some(b'-') {
            return Signal::Continue;
        }
        let start = self.run_start;
        if i - start < 4 {
            return self.literal(i);
        }
        if let Some(signal) = self.begin_line(EntityKind::HorizontalRule, start, start, Step::Text)
        {
            return signal;
        }
        self.close(i, i)
    }

    // === Headings ===

    pub(super) fn heading_open(&mut self, i: usize, byte: Option<u8>) -> Signal {
        if byte == Some(b'=') {
            return Signal::Continue;
        }
        let start = self.run_start;
        let run = i - start;
        if run < 2 {
            return self.literal(i);
        }
        // Runs longer than five open a level-5 heading; the rest is text.
        let level = run.min(5);
        let kind = EntityKind::heading(level);
        if let Some(signal) = self.begin_line(kind, start, start + level, Step::Heading) {
            return signal;
        }
        self.step = Step::Heading;
        Signal::Again(i)
    }

    pub(super) fn heading(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'=') => self.enter_run(i, Step::HeadingClose),
            None | Some(b'\n') => self.close(i, i),
            Some(c) => self.inline(i, c),
        }
    }

    /// A run at least as long as the heading's level closes it. Extra `=`
    /// stay in the heading text.
    pub(super) fn heading_close(&mut self, i: usize, byte: Option<u8>) -> Signal {
        if byte == Some(b'=') {
            return Signal::Continue;
        }
        let level = self.top().and_then(EntityKind::heading_level).unwrap_or(2);
        if i - self.run_start >= level {
            return self.close(i - level, i);
        }
        self.step = Step::Heading;
        Signal::Again(i)
    }
}
