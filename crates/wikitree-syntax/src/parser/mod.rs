//! # Parser - Building the Entity Tree
//!
//! The parser drives the [`Scanner`] to the end of the buffer and folds its
//! event stream into a tree. It keeps its own stack of in-progress entities,
//! mirroring the scanner's construct stack:
//!
//! ```text
//! Open  → push an in-progress entity
//! Close → pop it, finish it, attach it to the entity beneath
//! Split → replace the top entity by an outer/inner pair
//! ```
//!
//! When a close empties the stack, the finished entity is top-level and goes
//! to [`Sections`], which decides whether it belongs to the root or to the
//! heading whose section it falls in.
//!
//! ## Positions
//!
//! Children are collected with absolute spans. Their `position` is filled in
//! when the parent itself is finished, after any split has settled where the
//! parent starts.
//!
//! ## Public API
//!
//! ```
//! use wikitree_syntax::{EntityKind, parse_from_text};
//!
//! let doc = parse_from_text("{{name|prop1|prop2}}").unwrap();
//! let template = doc.root().children().next().unwrap();
//!
//! assert_eq!(template.kind(), EntityKind::Template);
//! assert_eq!(template.text_str(), "name|prop1|prop2");
//! ```

mod sections;

use crate::entity::{Document, Entity};
use crate::entity_kind::EntityKind;
use crate::error::SyntaxError;
use crate::scanner::{Event, Scanner};
use crate::span::Span;
use sections::Sections;

/// Parse a wikitext buffer into a document owning a copy of it.
pub fn parse(source: &[u8]) -> Result<Document, SyntaxError> {
    let root = parse_tree(source)?;
    Ok(Document::new(source, root))
}

/// Parse a string; equivalent to `parse(text.as_bytes())`.
pub fn parse_from_text(text: &str) -> Result<Document, SyntaxError> {
    parse(text.as_bytes())
}

/// Parse a buffer into a bare tree whose spans refer to `source`.
pub fn parse_tree(source: &[u8]) -> Result<Entity, SyntaxError> {
    let mut builder = TreeBuilder::new(source.len());
    for event in Scanner::new(source) {
        builder.event(event?);
    }
    Ok(builder.finish())
}

struct OpenEntity {
    kind: EntityKind,
    raw_start: usize,
    text_start: usize,
    children: Vec<Entity>,
}

impl OpenEntity {
    fn finish(self, kind: EntityKind, text_end: usize, raw_end: usize) -> Entity {
        let mut children = self.children;
        for child in &mut children {
            child.position = child.raw.start - self.raw_start;
        }
        Entity {
            kind,
            position: 0,
            raw: Span::new(self.raw_start, raw_end),
            text: Span::new(self.text_start, text_end),
            children,
        }
    }
}

/// Consumes scanner events and assembles the tree.
pub struct TreeBuilder {
    len: usize,
    open: Vec<OpenEntity>,
    sections: Sections,
}

impl TreeBuilder {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            open: Vec::new(),
            sections: Sections::new(),
        }
    }

    pub fn event(&mut self, event: Event) {
        match event {
            Event::Open {
                kind,
                raw_start,
                text_start,
            } => self.open.push(OpenEntity {
                kind,
                raw_start,
                text_start,
                children: Vec::new(),
            }),
            Event::Close {
                kind,
                text_end,
                raw_end,
            } => self.close(kind, text_end, raw_end),
            Event::Split { outer, inner, at } => self.split(outer, inner, at),
            Event::Boundary(span) => {
                debug_assert!(self.open.is_empty(), "span {span:?} ended with open entities");
            }
        }
    }

    /// The root entity, spanning the whole buffer.
    pub fn finish(mut self) -> Entity {
        while !self.open.is_empty() {
            self.close_innermost(self.len);
        }
        let mut root = Entity::new(EntityKind::Root, Span::new(0, self.len), Span::new(0, self.len));
        root.children = self.sections.finish();
        root
    }

    fn close(&mut self, kind: EntityKind, text_end: usize, raw_end: usize) {
        let Some(frame) = self.open.pop() else {
            log::debug!("{kind:?} closed at byte {raw_end} without being opened");
            return;
        };
        let entity = frame.finish(kind, text_end, raw_end);
        match self.open.last_mut() {
            Some(parent) => parent.children.push(entity),
            None => self.sections.attach(entity),
        }
    }

    fn close_innermost(&mut self, at: usize) {
        let kind = self.open.last().map_or(EntityKind::Text, |f| f.kind);
        self.close(kind, at, at);
    }

    fn split(&mut self, outer: EntityKind, inner: EntityKind, at: usize) {
        let Some(top) = self.open.pop() else {
            log::debug!("split at byte {at} without an open entity");
            return;
        };
        self.open.push(OpenEntity {
            kind: outer,
            raw_start: top.raw_start,
            text_start: at,
            children: Vec::new(),
        });
        self.open.push(OpenEntity {
            kind: inner,
            raw_start: at,
            ..top
        });
    }
}
