//! The entity tree and the document that owns its source bytes.
//!
//! An [`Entity`] holds only offsets. Bytes are resolved through a
//! [`Document`], or any buffer the entity was parsed from, so the tree has no
//! lifetime and can be moved around freely.
//!
//! Nesting depth is unbounded, so dropping, cloning and comparing trees walk
//! them with an explicit stack instead of recursing.

use std::borrow::Cow;

use crate::entity_kind::EntityKind;
use crate::span::Span;

/// One node of the tree.
#[derive(Debug)]
pub struct Entity {
    pub kind: EntityKind,
    /// Offset of `raw.start` from the parent's `raw.start`.
    pub position: usize,
    /// The construct including its delimiters, as absolute offsets.
    pub raw: Span,
    /// The construct without its delimiters, as absolute offsets.
    pub text: Span,
    pub children: Vec<Entity>,
}

impl Entity {
    pub fn new(kind: EntityKind, raw: Span, text: Span) -> Self {
        Self {
            kind,
            position: 0,
            raw,
            text,
            children: Vec::new(),
        }
    }

    pub fn raw_in<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        self.raw.slice(source)
    }

    pub fn text_in<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        self.text.slice(source)
    }

    /// The children that follow a heading's line rather than sit inside it.
    ///
    /// Empty for every other kind.
    pub fn section(&self) -> &[Entity] {
        if !self.kind.is_heading() {
            return &[];
        }
        let inline = self
            .children
            .iter()
            .take_while(|child| child.raw.start < self.raw.end)
            .count();
        &self.children[inline..]
    }

    /// Pre-order walk over this entity and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Equal apart from the children themselves.
    fn same_node(&self, other: &Entity) -> bool {
        self.kind == other.kind
            && self.position == other.position
            && self.raw == other.raw
            && self.text == other.text
            && self.children.len() == other.children.len()
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut entity) = stack.pop() {
            stack.append(&mut entity.children);
        }
    }
}

impl Clone for Entity {
    fn clone(&self) -> Self {
        // Each entry is a source node and the clones of its first children.
        let mut stack = vec![(self, Vec::with_capacity(self.children.len()))];
        while let Some((node, built)) = stack.pop() {
            if let Some(child) = node.children.get(built.len()) {
                stack.push((node, built));
                stack.push((child, Vec::with_capacity(child.children.len())));
                continue;
            }
            let entity = Entity {
                kind: node.kind,
                position: node.position,
                raw: node.raw,
                text: node.text,
                children: built,
            };
            match stack.last_mut() {
                Some((_, siblings)) => siblings.push(entity),
                None => return entity,
            }
        }
        // The loop returns once the root itself is rebuilt.
        Entity::new(self.kind, self.raw, self.text)
    }
}

/// Pre-order walks with equal child counts at every node visit the same
/// shape.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.descendants();
        let mut right = other.descendants();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.same_node(b) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Entity {}

/// Iterator returned by [`Entity::descendants`].
pub struct Descendants<'e> {
    stack: Vec<&'e Entity>,
}

impl<'e> Iterator for Descendants<'e> {
    type Item = &'e Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let entity = self.stack.pop()?;
        self.stack.extend(entity.children.iter().rev());
        Some(entity)
    }
}

/// A parsed page: the source buffer and the root of its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: Box<[u8]>,
    root: Entity,
}

impl Document {
    pub fn new(source: impl Into<Box<[u8]>>, root: Entity) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn root(&self) -> EntityRef<'_> {
        EntityRef {
            source: &self.source,
            entity: &self.root,
        }
    }

    pub fn root_entity(&self) -> &Entity {
        &self.root
    }

    pub fn into_parts(self) -> (Box<[u8]>, Entity) {
        (self.source, self.root)
    }

    /// The top-level entities in document order, with heading sections
    /// flattened back out.
    pub fn top_level(&self) -> Vec<EntityRef<'_>> {
        fn walk<'a>(source: &'a [u8], entities: &'a [Entity], out: &mut Vec<EntityRef<'a>>) {
            for entity in entities {
                out.push(EntityRef { source, entity });
                walk(source, entity.section(), out);
            }
        }

        let mut out = Vec::new();
        walk(&self.source, &self.root.children, &mut out);
        out
    }
}

/// An entity paired with the bytes it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'a> {
    source: &'a [u8],
    entity: &'a Entity,
}

impl<'a> EntityRef<'a> {
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind
    }

    pub fn position(&self) -> usize {
        self.entity.position
    }

    pub fn raw(&self) -> &'a [u8] {
        self.entity.raw_in(self.source)
    }

    pub fn text(&self) -> &'a [u8] {
        self.entity.text_in(self.source)
    }

    /// The raw bytes as UTF-8, replacing invalid sequences.
    pub fn raw_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.raw())
    }

    /// The text bytes as UTF-8, replacing invalid sequences.
    pub fn text_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.text())
    }

    pub fn children(self) -> impl Iterator<Item = EntityRef<'a>> + 'a {
        let source = self.source;
        self.entity
            .children
            .iter()
            .map(move |entity| EntityRef { source, entity })
    }

    pub fn descendants(self) -> impl Iterator<Item = EntityRef<'a>> + 'a {
        let source = self.source;
        self.entity
            .descendants()
            .map(move |entity| EntityRef { source, entity })
    }
}
