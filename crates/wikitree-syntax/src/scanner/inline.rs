//! Inline constructs: text, bold/italic runs, templates, links, tags and
//! signatures.
//!
//! ## Apostrophe Runs
//!
//! A run is classified against the innermost open construct `T` once it
//! ends:
//!
//! | T           | 2            | 3                      | 4             | 5+                    |
//! |-------------|--------------|------------------------|---------------|-----------------------|
//! | other       | open italic  | open bold              | `'` + bold    | open bold+italic      |
//! | italic      | close        | close if in bold, else open bold | `'` + 3 | close, rest again  |
//! | bold        | open italic  | close                  | `'` + close   | close, rest again     |
//! | bold+italic | split, close italic | split, close bold | `'` + 3     | close                 |
//!
//! A single apostrophe is always text. "rest again" hands the unused part
//! of the run back, where it meets the next construct out: `''a'''''A'''` is
//! italic `a` followed by bold `A`.

use super::{Event, Scanner, Signal, Step};
use crate::entity_kind::EntityKind;
use crate::span::Span;

impl Scanner<'_> {
    pub(super) fn text(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            None => {
                self.ensure_text();
                Signal::Continue
            }
            Some(b'\n') => {
                self.ensure_text();
                self.nl_at = Some(i);
                self.step = Step::Newline;
                Signal::Continue
            }
            Some(c) => self.inline(i, c),
        }
    }

    /// Handle a content byte of whatever construct is open.
    pub(super) fn inline(&mut self, i: usize, c: u8) -> Signal {
        match c {
            b'\'' => self.enter_run(i, Step::Quotes),
            b'{' => self.enter_run(i, Step::BraceOpen),
            b'}' if self.innermost_template().is_some() => self.enter_run(i, Step::BraceClose),
            b'[' => self.enter_run(i, Step::BracketOpen),
            b']' if self.innermost_link().is_some() => self.enter_run(i, Step::BracketClose),
            b'<' => self.enter_run(i, Step::Lt),
            b'~' => self.enter_run(i, Step::Tilde),
            _ => {
                self.ensure_text();
                Signal::Continue
            }
        }
    }

    /// Start an inline construct, or end the top-level text in front of it.
    ///
    /// Returns `None` when the construct was pushed and scanning goes on.
    fn begin_inline(
        &mut self,
        kind: EntityKind,
        raw_start: usize,
        text_start: usize,
        body: Step,
    ) -> Option<Signal> {
        let text_open = self.top() == Some(EntityKind::Text);
        if text_open || (self.frames.is_empty() && raw_start > self.span_start) {
            self.ensure_text();
            self.pop(None, raw_start, raw_start);
            return Some(Signal::End(raw_start));
        }
        self.push(kind, raw_start, text_start, body);
        None
    }

    // === Bold and italic ===

    pub(super) fn quotes(&mut self, i: usize, byte: Option<u8>) -> Signal {
        if byte == Some(b'\'') {
            return Signal::Continue;
        }
        self.resolve_quotes(i, self.run_start, i - self.run_start)
    }

    fn resolve_quotes(&mut self, i: usize, start: usize, run: usize) -> Signal {
        match self.top() {
            Some(EntityKind::TextItalic) => self.quotes_in_italic(i, start, run),
            Some(EntityKind::TextBold) => self.quotes_in_bold(i, start, run),
            Some(EntityKind::TextBoldItalic) => self.quotes_in_bold_italic(i, start, run),
            _ => self.quotes_outside(i, start, run),
        }
    }

    fn quotes_outside(&mut self, i: usize, start: usize, run: usize) -> Signal {
        match run {
            0 | 1 => self.literal(i),
            2 => self.open_emphasis(i, EntityKind::TextItalic, start, 2),
            3 => self.open_emphasis(i, EntityKind::TextBold, start, 3),
            4 => self.open_emphasis(i, EntityKind::TextBold, start + 1, 3),
            _ => self.open_emphasis(i, EntityKind::TextBoldItalic, i - 5, 5),
        }
    }

    fn quotes_in_italic(&mut self, i: usize, start: usize, run: usize) -> Signal {
        match run {
            0 | 1 => self.literal(i),
            2 => self.close(start, i),
            3 if self.below_top() == Some(EntityKind::TextBold) => self.close(start, start + 2),
            3 => self.open_emphasis(i, EntityKind::TextBold, start, 3),
            4 => self.resolve_quotes(i, start + 1, 3),
            _ => self.close(start, start + 2),
        }
    }

    fn quotes_in_bold(&mut self, i: usize, start: usize, run: usize) -> Signal {
        match run {
            0 | 1 => self.literal(i),
            2 => self.open_emphasis(i, EntityKind::TextItalic, start, 2),
            3 => self.close(start, i),
            4 => self.close(start + 1, i),
            _ => self.close(start, start + 3),
        }
    }

    /// The first closing run decides the nesting order of a five-quote run.
    fn quotes_in_bold_italic(&mut self, i: usize, start: usize, run: usize) -> Signal {
        let text_start = self.frames.last().map_or(start, |f| f.text_start);
        match run {
            0 | 1 => self.literal(i),
            2 => {
                self.split(
                    EntityKind::TextBold,
                    EntityKind::TextItalic,
                    text_start.saturating_sub(2),
                );
                self.close(start, i)
            }
            3 => {
                self.split(
                    EntityKind::TextItalic,
                    EntityKind::TextBold,
                    text_start.saturating_sub(3),
                );
                self.close(start, i)
            }
            4 => self.resolve_quotes(i, start + 1, 3),
            _ => self.close(start, start + 5),
        }
    }

    fn open_emphasis(
        &mut self,
        i: usize,
        kind: EntityKind,
        raw_start: usize,
        delimiter: usize,
    ) -> Signal {
        if let Some(signal) =
            self.begin_inline(kind, raw_start, raw_start + delimiter, Step::Emphasis)
        {
            return signal;
        }
        self.step = Step::Emphasis;
        Signal::Again(i)
    }

    /// Emphasis never spans lines.
    pub(super) fn emphasis(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'\n') => self.close(i, i),
            None => Signal::Continue,
            Some(c) => self.inline(i, c),
        }
    }

    // === Templates ===

    pub(super) fn brace_open(&mut self, i: usize, byte: Option<u8>) -> Signal {
        let run = i - self.run_start;
        if run == 1 && byte == Some(b'{') {
            return Signal::Continue;
        }
        if run < 2 {
            return self.literal(i);
        }
        if let Some(signal) = self.begin_inline(EntityKind::Template, i - 2, i, Step::Template) {
            return signal;
        }
        if byte.is_some_and(|c| c != b'}') {
            self.push(EntityKind::TemplateName, i, i, Step::Template);
        }
        self.step = Step::Template;
        Signal::Again(i)
    }

    /// Templates span lines.
    pub(super) fn template(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'|') => self.next_part(i, EntityKind::TemplateProp, Step::Template),
            None | Some(b'\n') => Signal::Continue,
            Some(c) => self.inline(i, c),
        }
    }

    /// `}}` closes the innermost template and anything still open inside it.
    pub(super) fn brace_close(&mut self, i: usize, byte: Option<u8>) -> Signal {
        let run = i - self.run_start;
        if run == 1 && byte == Some(b'}') {
            return Signal::Continue;
        }
        match self.innermost_template() {
            Some(index) if run == 2 => self.close_through(index, i - 2, i - 2, i),
            _ => self.literal(i),
        }
    }

    /// A `|` ends the current name or prop and starts the next prop.
    fn next_part(&mut self, i: usize, kind: EntityKind, body: Step) -> Signal {
        if self
            .top()
            .is_some_and(|k| k.is_template_part() || k.is_link_part())
        {
            self.pop(None, i, i);
        }
        self.push(kind, i, i + 1, body);
        Signal::Continue
    }

    // === Links ===

    pub(super) fn bracket_open(&mut self, i: usize, byte: Option<u8>) -> Signal {
        let run = i - self.run_start;
        if run == 1 && byte == Some(b'[') {
            return Signal::Continue;
        }
        if run < 2 {
            if byte.is_none_or(|c| c == b'\n') {
                return self.literal(i);
            }
            if let Some(signal) =
                self.begin_inline(EntityKind::LinkExternal, i - 1, i, Step::ExternalLink)
            {
                return signal;
            }
            self.step = Step::ExternalLink;
            return Signal::Again(i);
        }
        if let Some(signal) =
            self.begin_inline(EntityKind::LinkInternal, i - 2, i, Step::InternalLink)
        {
            return signal;
        }
        if byte.is_some_and(|c| c != b']') {
            self.push(EntityKind::LinkInternalName, i, i, Step::InternalLink);
        }
        self.step = Step::InternalLink;
        Signal::Again(i)
    }

    pub(super) fn internal_link(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'|') => self.next_part(i, EntityKind::LinkInternalProp, Step::InternalLink),
            Some(b'\n') => self.close(i, i),
            None => Signal::Continue,
            Some(c) => self.inline(i, c),
        }
    }

    pub(super) fn external_link(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'\n') => self.close(i, i),
            None => Signal::Continue,
            Some(c) => self.inline(i, c),
        }
    }

    /// `]` closes an external link, `]]` an internal one; the innermost
    /// open link decides which is expected.
    pub(super) fn bracket_close(&mut self, i: usize, byte: Option<u8>) -> Signal {
        let start = self.run_start;
        let run = i - start;
        if run == 1 && byte == Some(b']') {
            return Signal::Continue;
        }
        match self.innermost_link() {
            Some((index, EntityKind::LinkExternal)) => {
                self.close_through(index, start, start, start + 1)
            }
            Some((index, _)) if run == 2 => self.close_through(index, start, start, i),
            _ => self.literal(i),
        }
    }

    // === Tags ===

    pub(super) fn lt(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(c) if c.is_ascii_alphabetic() => self.open_tag(i, EntityKind::TagOpen, i - 1),
            Some(b'/') => {
                self.step = Step::LtSlash;
                Signal::Continue
            }
            _ => self.literal(i),
        }
    }

    pub(super) fn lt_slash(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(c) if c.is_ascii_alphabetic() => self.open_tag(i, EntityKind::TagClose, i - 2),
            _ => self.literal(i),
        }
    }

    fn open_tag(&mut self, i: usize, kind: EntityKind, raw_start: usize) -> Signal {
        if let Some(signal) = self.begin_inline(kind, raw_start, i, Step::TagBody) {
            return signal;
        }
        self.step = Step::TagBody;
        Signal::Continue
    }

    /// No markup is recognised inside a tag.
    pub(super) fn tag_body(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'>') => self.close(i, i + 1),
            Some(b'/') => {
                self.step = Step::TagSlash;
                Signal::Continue
            }
            Some(b'\n') => self.close(i, i),
            _ => Signal::Continue,
        }
    }

    pub(super) fn tag_slash(&mut self, i: usize, byte: Option<u8>) -> Signal {
        match byte {
            Some(b'>') => {
                let kind = self.top().map(|k| match k {
                    EntityKind::TagOpen => EntityKind::Tag,
                    other => other,
                });
                self.pop(kind, i - 1, i + 1);
                self.resume_at(i + 1)
            }
            _ => {
                self.step = Step::TagBody;
                Signal::Again(i)
            }
        }
    }

    /// Report the attribute text of a tag between `text_start` and
    /// `text_end`: everything after the name, trailing whitespace excluded.
    pub(super) fn tag_attributes(&mut self, text_start: usize, text_end: usize) {
        let text = Span::new(text_start, text_end).slice(self.src);
        let Some(name_end) = text.iter().position(u8::is_ascii_whitespace) else {
            return;
        };
        let rest = &text[name_end..];
        let Some(first) = rest.iter().position(|b| !b.is_ascii_whitespace()) else {
            return;
        };
        let last = rest
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(first, |p| p + 1);

        let start = text_start + name_end + first;
        let end = text_start + name_end + last;
        self.events
            .push_back(Event::open(EntityKind::TagAttributes, start, 0));
        self.events
            .push_back(Event::close_at(EntityKind::TagAttributes, end));
    }

    // === Signatures ===

    pub(super) fn tilde(&mut self, i: usize, byte: Option<u8>) -> Signal {
        if byte == Some(b'~') {
            return Signal::Continue;
        }
        let start = self.run_start;
        let kind = match i - start {
            0..=2 => return self.literal(i),
            3 => EntityKind::Signature,
            _ => EntityKind::SignatureTimestamp,
        };
        if let Some(signal) = self.begin_inline(kind, start, start, Step::Text) {
            return signal;
        }
        self.close(i, i)
    }
}
