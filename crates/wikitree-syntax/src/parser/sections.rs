//! Heading sections.
//!
//! Top-level entities do not all hang off the root. A heading stays the
//! parent of everything after it until a heading of the same or a lower
//! level shows up:
//!
//! ```text
//! == A ==          Root
//! text               Heading2 A
//! === B ===            Text
//! more                 Heading3 B
//! == C ==                Text
//!                    Heading2 C
//! ```
//!
//! The open headings form a stack. `parents` has one slot per level 2-5
//! holding the stack depth a new heading of that level attaches at, with
//! depth 0 meaning the root.

use crate::entity::Entity;

pub(crate) struct Sections {
    root: Vec<Entity>,
    open: Vec<Entity>,
    parents: [usize; 4],
}

impl Sections {
    pub(crate) fn new() -> Self {
        Self {
            root: Vec::new(),
            open: Vec::new(),
            parents: [0; 4],
        }
    }

    /// Attach a completed top-level entity.
    pub(crate) fn attach(&mut self, entity: Entity) {
        let Some(level) = entity.kind.heading_level() else {
            self.append(entity);
            return;
        };

        let depth = self.parents[level - 2];
        self.fold_to(depth);
        log::trace!("{:?} opens a section at depth {depth}", entity.kind);
        self.open.push(entity);

        let below = self.open.len();
        for slot in &mut self.parents[level - 1..] {
            *slot = below;
        }
    }

    /// All top-level entities, with every open section folded in.
    pub(crate) fn finish(mut self) -> Vec<Entity> {
        self.fold_to(0);
        self.root
    }

    fn append(&mut self, mut entity: Entity) {
        match self.open.last_mut() {
            Some(heading) => {
                entity.position = entity.raw.start - heading.raw.start;
                heading.children.push(entity);
            }
            None => {
                entity.position = entity.raw.start;
                self.root.push(entity);
            }
        }
    }

    fn fold_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(heading) = self.open.pop() {
                self.append(heading);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_kind::EntityKind;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    fn entity(kind: EntityKind, start: usize) -> Entity {
        Entity::new(kind, Span::new(start, start + 1), Span::new(start, start + 1))
    }

    /// Render the nesting as `kind(children...)`.
    fn shape(entities: &[Entity]) -> String {
        entities
            .iter()
            .map(|e| {
                let name = match e.kind.heading_level() {
                    Some(level) => format!("H{level}"),
                    None => "T".to_string(),
                };
                if e.children.is_empty() {
                    name
                } else {
                    format!("{name}({})", shape(&e.children))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build(kinds: &[EntityKind]) -> Vec<Entity> {
        let mut sections = Sections::new();
        for (start, kind) in kinds.iter().enumerate() {
            sections.attach(entity(*kind, start));
        }
        sections.finish()
    }

    use EntityKind::{Heading2 as H2, Heading3 as H3, Heading4 as H4, Text as T};

    #[test]
    fn content_before_any_heading_stays_at_root() {
        assert_eq!(shape(&build(&[T, H2, T])), "T H2(T)");
    }

    #[test]
    fn deeper_headings_nest() {
        assert_eq!(shape(&build(&[H2, T, H3, T, H4, T])), "H2(T H3(T H4(T)))");
    }

    #[test]
    fn same_level_heading_becomes_a_sibling() {
        assert_eq!(shape(&build(&[H2, H3, T, H3, T])), "H2(H3(T) H3(T))");
    }

    #[test]
    fn lower_level_heading_closes_deeper_sections() {
        assert_eq!(shape(&build(&[H2, H3, H4, T, H2, T])), "H2(H3(H4(T))) H2(T)");
    }

    #[test]
    fn skipped_level_attaches_to_the_nearest_ancestor() {
        assert_eq!(shape(&build(&[H2, H4, T, H3, T])), "H2(H4(T) H3(T))");
    }

    #[test]
    fn leading_deep_heading_is_replaced_by_a_shallower_one() {
        assert_eq!(shape(&build(&[H3, T, H2, T, H3])), "H3(T) H2(T H3)");
    }

    #[test]
    fn section_positions_are_relative_to_the_heading() {
        let entities = build(&[T, H2, T, T]);
        assert_eq!(entities[0].position, 0);
        assert_eq!(entities[1].position, 1);
        let section: Vec<_> = entities[1].children.iter().map(|e| e.position).collect();
        assert_eq!(section, vec![1, 2]);
    }
}
